//! Authentication Module
//!
//! This module handles user registration, email confirmation, login and
//! access tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model, UserStore trait, in-memory store
//! ├── db.rs           - PostgreSQL UserStore
//! ├── validation.rs   - Registration input rules
//! ├── sessions.rs     - Access-token (JWT) management
//! ├── confirmation.rs - Email-confirmation tokens
//! ├── mailer.rs       - Confirmation mail delivery
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → user stored unconfirmed →
//!    confirmation link mailed → confirmation token returned
//! 2. **Confirm**: confirmation token → user marked confirmed
//! 3. **Login**: email, password → access token returned and set as cookie
//! 4. **Protected routes**: access token (bearer header or cookie) → verified
//!    by the auth middleware
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access tokens expire after `ACCESS_TOKEN_TTL_MINUTES` and are re-issued
//!   when close to expiry
//! - Confirmation tokens are signed with a separate key (secret + salt)
//! - Unknown email and wrong password are indistinguishable (401)

/// User data model and storage
pub mod users;

/// PostgreSQL user store
pub mod db;

/// Registration input validation
pub mod validation;

/// JWT token generation and validation
pub mod sessions;

/// Email confirmation tokens
pub mod confirmation;

/// Mail delivery
pub mod mailer;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use confirmation::ConfirmationTokens;
pub use db::PgUserStore;
pub use handlers::{confirm_email, login, register, user_profile};
pub use mailer::{LogMailer, MailError, Mailer, SmtpMailer};
pub use sessions::{Claims, SessionKeys};
pub use users::{MemoryUserStore, User, UserResponse, UserStore};
pub use validation::ValidationError;
