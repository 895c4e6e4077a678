//! Shared Error Types
//!
//! Errors raised by the wire model itself, independent of any handler.
//!
//! # Usage
//!
//! ```rust
//! use taskboard::shared::error::SharedError;
//!
//! let error = SharedError::invalid_id("not-an-id");
//! assert_eq!(error.to_string(), "Invalid identifier: not-an-id");
//! ```
use thiserror::Error;

/// Errors raised while handling wire-level board and user data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// The value could not be parsed as an object identifier
    #[error("Invalid identifier: {value}")]
    InvalidId {
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new invalid identifier error
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::InvalidId {
            value: value.into(),
        }
    }
}
