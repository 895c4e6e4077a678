//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Access-token verification for protected routes, plus the
//!   `AuthUser` extractor
//! - **`refresh`** - Access cookie parsing and near-expiry re-issue

pub mod auth;
pub mod refresh;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use refresh::{access_cookie, ACCESS_COOKIE};
