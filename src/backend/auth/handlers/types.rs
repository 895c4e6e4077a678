/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the register, login, confirm and
 * profile handlers.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    /// Plain password (hashed before storage)
    pub password: String,
}

/// Registration response
///
/// `token` is the email-confirmation token, not an access token.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RegisterResponse {
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response carrying the access token
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TokenResponse {
    pub token: String,
}
