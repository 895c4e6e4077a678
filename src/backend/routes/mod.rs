//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, CORS and tracing layers
//! └── api_routes.rs   - Account and board endpoints
//! ```
//!
//! # Route Types
//!
//! ## Public Routes
//!
//! - `POST /register` - User registration
//! - `POST /login` - User login
//! - `GET /confirm_email/{token}` - Email confirmation
//!
//! ## Protected Routes (access token required)
//!
//! - `GET /user_profile` - Current user
//! - `/api/*` - Board, column and task operations
//!
//! Unknown routes fall through to a JSON 404.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
