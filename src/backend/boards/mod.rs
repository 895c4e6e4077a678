//! Boards Module
//!
//! The board aggregate: a board owns columns, columns own tasks, tasks own
//! subtasks. All writes go through [`aggregate::BoardPatch`] transforms that
//! a [`store::BoardStore`] applies atomically.
//!
//! # Module Structure
//!
//! ```text
//! boards/
//! ├── mod.rs       - Module exports and documentation
//! ├── aggregate.rs - BoardPatch transforms and PatchResult
//! ├── store.rs     - BoardStore trait and in-memory store
//! ├── db.rs        - PostgreSQL BoardStore
//! ├── manager.rs   - BoardManager (operations used by the handlers)
//! └── handlers.rs  - HTTP handlers for /api/*
//! ```

pub mod aggregate;
pub mod store;
pub mod db;
pub mod manager;
pub mod handlers;

pub use aggregate::{BoardPatch, PatchResult};
pub use db::PgBoardStore;
pub use manager::BoardManager;
pub use store::{BoardStore, MemoryBoardStore};
