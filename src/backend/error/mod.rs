//! Backend Error Module
//!
//! Error types of the backend server and their conversion into HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and StoreError
//! └── conversion.rs - IntoResponse implementation
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, StoreError};

/// Result alias used by handlers and managers
pub type BackendResult<T> = Result<T, BackendError>;

/// Result alias used by the stores
pub type StoreResult<T> = Result<T, StoreError>;
