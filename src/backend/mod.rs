//! Backend Module
//!
//! This module contains all server-side code of the task board service.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, confirmation, login, tokens, user storage
//! - **`boards`** - Board aggregate transforms, board storage, board handlers
//! - **`middleware`** - Access-token verification and cookie refresh
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Accounts and tokens
//! ├── boards/         - Boards, columns, tasks, subtasks
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Storage
//!
//! With `DATABASE_URL` set, users and boards live in PostgreSQL (boards as
//! one row with a JSONB column tree). Without it, in-memory stores are used.
//! Both implement the same `UserStore` / `BoardStore` traits.

/// Server initialization and state management
pub mod server;

/// HTTP route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Board operations
pub mod boards;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;

// Re-export commonly used types
pub use error::{BackendError, BackendResult};
pub use server::AppState;
