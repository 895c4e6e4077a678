/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The validated configuration
 * - The user store and the board manager (PostgreSQL or in-memory)
 * - Token signing keys for access and confirmation tokens
 * - The mailer used for confirmation links
 * - The optional database pool, closed on shutdown
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use taskboard::backend::boards::BoardManager;
 *
 * async fn handler(State(boards): State<BoardManager>) {
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::{
    ConfirmationTokens, LogMailer, Mailer, MemoryUserStore, SessionKeys, UserStore,
};
use crate::backend::boards::{BoardManager, MemoryBoardStore};
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub boards: BoardManager,
    pub sessions: Arc<SessionKeys>,
    pub confirmations: Arc<ConfirmationTokens>,
    pub mailer: Arc<dyn Mailer>,
    /// `None` when running on the in-memory stores
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Assemble state from already-built stores and mailer
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        boards: BoardManager,
        mailer: Arc<dyn Mailer>,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionKeys::from_config(&config)),
            confirmations: Arc::new(ConfirmationTokens::from_config(&config)),
            config: Arc::new(config),
            users,
            boards,
            mailer,
            db_pool,
        }
    }

    /// State backed by in-memory stores and the logging mailer
    pub fn in_memory(config: AppConfig) -> Self {
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let boards = BoardManager::new(Arc::new(MemoryBoardStore::new()), users.clone());
        Self::new(config, users, boards, Arc::new(LogMailer), None)
    }
}

/// Implement FromRef for BoardManager
///
/// This allows the board handlers to extract the manager directly using
/// `State(BoardManager)`.
impl FromRef<AppState> for BoardManager {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.boards.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
