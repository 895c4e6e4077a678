/**
 * Access Cookie Handling
 *
 * Login sets the access token as the `access_token_cookie` cookie. On every
 * authenticated request whose token expires within the refresh window, a
 * freshly issued token is attached to the response in the same cookie.
 */

use axum::{
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::Response,
};
use chrono::{DateTime, Duration, Utc};

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::middleware::auth::AuthenticatedUser;

/// Name of the cookie carrying the access token
pub const ACCESS_COOKIE: &str = "access_token_cookie";

/// `Set-Cookie` value for an access token
pub fn access_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", ACCESS_COOKIE, token)
}

/// Read the access token from the request cookies
pub fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_COOKIE)
        .map(|(_, token)| token.to_string())
}

/// True when a token expiring at `expires_at` should be re-issued
pub fn needs_refresh(expires_at: DateTime<Utc>, window: Duration, now: DateTime<Utc>) -> bool {
    expires_at - now < window
}

/// Attach a fresh access cookie to `response` if the presented token is
/// close to expiry
///
/// Signing failures are logged and the response is left as it is.
pub fn refresh_access_cookie(
    response: &mut Response,
    sessions: &SessionKeys,
    user: &AuthenticatedUser,
    window: Duration,
) {
    if !needs_refresh(user.expires_at, window, Utc::now()) {
        return;
    }

    let token = match sessions.create_token(user.user_id, &user.email) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to refresh access token: {:?}", e);
            return;
        }
    };

    match HeaderValue::from_str(&access_cookie(&token)) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
            tracing::debug!("Access token refreshed for {}", user.email);
        }
        Err(e) => tracing::error!("Invalid cookie value: {:?}", e),
    }
}
