//! Taskboard - Main Library
//!
//! A multi-user Kanban task-board service: users register, confirm their
//! email and log in; each user owns boards made of named columns holding
//! tasks, and tasks hold subtasks. Everything is served as a JSON API over
//! HTTP.
//!
//! # Module Structure
//!
//! - **`shared`** - The board data model, identifiers, configuration and
//!   shared error types. No I/O.
//! - **`backend`** - The Axum server: stores (PostgreSQL or in-memory),
//!   authentication, board operations, routes and middleware.
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskboard::backend::server::{create_app, load_config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//! let (app, _state) = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for identifier and wire-format problems
//! - `backend::error::BackendError` for everything a handler can return;
//!   it converts into a `{"msg", "status"}` JSON response

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
