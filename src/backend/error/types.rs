/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the backend server. Every handler
 * returns `Result<_, BackendError>` and the error is converted to an HTTP
 * response in `conversion.rs`.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - registration input rejected (one message per rule)
 * - `EmailExists` - registration with an email already in use
 * - `InvalidCredentials` - unknown email or wrong password on login
 * - `InvalidOrExpiredToken` - bad email confirmation link
 * - `NotFound` - board or user absent
 * - `Unauthorized` - missing/invalid token, or the board belongs to someone else
 * - `ColumnConflict` - a column name would appear twice on one board
 * - `HandlerError` - malformed request (bad identifiers, wrong body shape)
 *
 * ## Server Errors
 *
 * - `Store` - database failure
 * - `Internal` - hashing or token signing failure
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::validation::ValidationError;
use crate::shared::SharedError;

/// Persistence errors raised by the board and user stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A uniqueness constraint rejected the write
    #[error("Duplicate {0}")]
    Duplicate(&'static str),
}

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use taskboard::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// let err = BackendError::not_found("board", "6f1c0a4e2b7d4f0e9d3a8c1b5e2f7a90");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g. malformed body, invalid path parameter)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already exists.")]
    EmailExists,

    #[error("Your password is invalid.")]
    InvalidCredentials,

    #[error("The link is either invalid or has expired.")]
    InvalidOrExpiredToken,

    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("A column named '{0}' already exists on this board.")]
    ColumnConflict(String),

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    ///
    /// `NotFound` maps to 400 to stay wire-compatible with existing clients.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EmailExists => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidOrExpiredToken => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::ColumnConflict(_) => StatusCode::BAD_REQUEST,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client
    ///
    /// Server faults are reported generically; the detail goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized(message) => message.clone(),
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(format!("password hashing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for BackendError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::internal(format!("token signing failed: {}", err))
    }
}
