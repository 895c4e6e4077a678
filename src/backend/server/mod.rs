//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading from the environment, database pool
//! - **`init`** - Store and mailer selection, app creation, shutdown
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (env, database)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `.env` and environment into `AppConfig`
//! 2. **Store Selection**: PostgreSQL when `DATABASE_URL` is set, memory otherwise
//! 3. **Router Creation**: Configures all routes and middleware
//! 4. **Shutdown**: The database pool is closed after the server stops

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::load_config;
pub use init::{build_state, close, create_app};
pub use state::AppState;
