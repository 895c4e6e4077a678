/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate username and email format
 * 2. Reject an email that is already registered
 * 3. Validate password strength
 * 4. Hash password using bcrypt
 * 5. Create the (unconfirmed) user
 * 6. Issue an email-confirmation token and mail the confirmation link
 * 7. Return username, email and the confirmation token
 *
 * Mail delivery failures are logged; registration still succeeds.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::mailer::{confirmation_body, CONFIRMATION_SUBJECT};
use crate::backend::auth::users::User;
use crate::backend::auth::validation::{validate_email, validate_password, validate_username};
use crate::backend::error::{BackendError, BackendResult, StoreError};
use crate::backend::server::state::AppState;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - validation failure (one message per rule) or
///   "Email already exists."
/// * `500 Internal Server Error` - hashing, storage or token signing failure
///
/// # Example Request
///
/// ```http
/// POST /register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "Longenough1!"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> BackendResult<(StatusCode, Json<RegisterResponse>)> {
    tracing::info!("Register request for username: {}, email: {}", request.username, request.email);

    validate_username(&request.username)?;
    validate_email(&request.email)?;

    if state.users.find_by_email(&request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(BackendError::EmailExists);
    }

    validate_password(&request.password)?;

    let password_hash = hash(&request.password, state.config.bcrypt_cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::from(e)
    })?;

    let user = User::new(request.username, request.email, password_hash);
    let user = state.users.create_user(user).await.map_err(|e| match e {
        StoreError::Duplicate(_) => BackendError::EmailExists,
        other => {
            tracing::error!("Failed to create user: {:?}", other);
            other.into()
        }
    })?;

    let token = state.confirmations.issue(&user.email)?;
    let link = format!("{}/confirm_email/{}", state.config.public_base_url, token);
    let body = confirmation_body(&user.username, &link);
    if let Err(e) = state.mailer.send(&user.email, CONFIRMATION_SUBJECT, &body).await {
        tracing::warn!("Failed to send confirmation mail to {}: {}", user.email, e);
    }

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: user.username,
            email: user.email,
            token,
        }),
    ))
}
