/**
 * User Profile Handler
 *
 * GET /user_profile returns the authenticated user's document. The route
 * sits behind the auth middleware, so the user id comes from the verified
 * token.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::users::UserResponse;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// {
///   "_id": { "$oid": "6f1c0a4e2b7d4f0e9d3a8c1b5e2f7a90" },
///   "username": "alice",
///   "email": "alice@example.com",
///   "is_confirmed": false
/// }
/// ```
pub async fn user_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> BackendResult<Json<UserResponse>> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("user", auth.user_id))?;

    Ok(Json(UserResponse::from(&user)))
}
