//! Shared Module
//!
//! Types that make up the wire model of the API: the board aggregate, its
//! identifiers, configuration and the error types raised while handling them.
//! Nothing in here touches the network or the database.

/// Board, column, task and subtask data structures
pub mod board;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use board::{
    Board, BoardSummary, Column, ColumnDraft, ObjectId, Subtask, SubtaskDraft, Task, TaskDraft,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, MailConfig};
pub use error::SharedError;
