//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── confirm.rs  - Email confirmation handler
//! └── profile.rs  - Current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /register - User registration
//! - **`login`** - POST /login - User authentication
//! - **`confirm_email`** - GET /confirm_email/{token} - Account confirmation
//! - **`user_profile`** - GET /user_profile - Current user info (token required)

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Email confirmation handler
pub mod confirm;

/// Current user handler
pub mod profile;

// Re-export commonly used types
pub use types::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};

// Re-export handlers
pub use confirm::confirm_email;
pub use login::login;
pub use profile::user_profile;
pub use register::register;
