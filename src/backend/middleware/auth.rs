/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the access token from the
 * `Authorization: Bearer` header (or, failing that, the access cookie) and
 * provides the user to handlers.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::backend::error::BackendError;
use crate::backend::middleware::refresh::{cookie_token, refresh_access_cookie};
use crate::backend::server::state::AppState;
use crate::shared::ObjectId;

/// Authenticated user data extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: ObjectId,
    pub email: String,
    /// Expiry of the presented token
    pub expires_at: DateTime<Utc>,
}

/// Token from the bearer header, falling back to the access cookie
fn request_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());
    bearer.or_else(|| cookie_token(headers))
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the access token from the Authorization header or cookie
/// 2. Verifies the token
/// 3. Checks that the user still exists
/// 4. Attaches user data to request extensions for use in handlers
/// 5. Re-issues the token as a cookie when it is close to expiry
///
/// Returns 401 Unauthorized if the token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = request_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing access token");
        BackendError::unauthorized("Missing authorization token.")
    })?;

    let claims = app_state.sessions.verify_token(&token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token.")
    })?;

    let (user_id, expires_at) = match (claims.user_id(), claims.expires_at()) {
        (Some(user_id), Some(expires_at)) => (user_id, expires_at),
        _ => {
            tracing::warn!("Malformed claims in token for {}", claims.email);
            return Err(BackendError::unauthorized("Invalid or expired token."));
        }
    };

    if app_state.users.find_by_id(user_id).await?.is_none() {
        tracing::warn!("Token for unknown user: {}", user_id);
        return Err(BackendError::unauthorized("User not found."));
    }

    let user = AuthenticatedUser {
        user_id,
        email: claims.email,
        expires_at,
    };
    request.extensions_mut().insert(user.clone());

    let mut response = next.run(request).await;
    refresh_access_cookie(
        &mut response,
        &app_state.sessions,
        &user,
        app_state.config.refresh_window,
    );
    Ok(response)
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers to automatically extract
/// the authenticated user from request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Missing authorization token.")
            })?;

        Ok(AuthUser(user))
    }
}
