/**
 * Email Confirmation Handler
 *
 * GET /confirm_email/{token} marks the account named by the token as
 * confirmed and returns its user document.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::users::UserResponse;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// Confirm email handler
///
/// # Errors
///
/// * `400 Bad Request` - "The link is either invalid or has expired." when
///   the token is forged, expired, issued for another purpose, or names an
///   unknown account
pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> BackendResult<Json<UserResponse>> {
    let email = state.confirmations.verify(&token).ok_or_else(|| {
        tracing::warn!("Rejected confirmation token");
        BackendError::InvalidOrExpiredToken
    })?;

    let user = state
        .users
        .mark_confirmed(&email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Confirmation token for unknown email: {}", email);
            BackendError::InvalidOrExpiredToken
        })?;

    tracing::info!("Email confirmed: {}", user.email);
    Ok(Json(UserResponse::from(&user)))
}
