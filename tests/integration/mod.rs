//! Integration tests
//!
//! - `api` - HTTP endpoints against the in-memory stores
//! - `database` - PostgreSQL stores (ignored unless a database is available)

pub mod database;
