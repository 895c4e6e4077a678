/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, mailer setup and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database pool if `DATABASE_URL` is configured
 * 2. Select PostgreSQL or in-memory stores accordingly
 * 3. Select the SMTP or logging mailer
 * 4. Build `AppState` and the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::{LogMailer, Mailer, PgUserStore, SmtpMailer, UserStore};
use crate::backend::boards::{BoardManager, PgBoardStore};
use crate::backend::error::StoreError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

fn select_mailer(config: &AppConfig) -> Arc<dyn Mailer> {
    let Some(mail) = &config.mail else {
        tracing::info!("MAIL_SERVER not set. Confirmation links will be logged.");
        return Arc::new(LogMailer);
    };

    match SmtpMailer::new(mail) {
        Ok(mailer) => {
            tracing::info!("Sending mail through {}:{}", mail.server, mail.port);
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::error!("Failed to configure SMTP transport: {}", e);
            tracing::warn!("Confirmation links will be logged instead.");
            Arc::new(LogMailer)
        }
    }
}

/// Build the application state from configuration
///
/// # Errors
///
/// Fails if a database is configured but cannot be reached or migrated.
pub async fn build_state(config: AppConfig) -> Result<AppState, StoreError> {
    tracing::info!("Initializing task board server");

    let mailer = select_mailer(&config);

    let state = match load_database(&config).await? {
        Some(pool) => {
            let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
            let boards = BoardManager::new(Arc::new(PgBoardStore::new(pool.clone())), users.clone());
            AppState::new(config, users, boards, mailer, Some(pool))
        }
        None => {
            let mut state = AppState::in_memory(config);
            state.mailer = mailer;
            state
        }
    };

    tracing::info!(
        "State initialized ({} store)",
        if state.db_pool.is_some() { "postgres" } else { "memory" }
    );
    Ok(state)
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: AppConfig) -> Result<(Router<()>, AppState), StoreError> {
    let state = build_state(config).await?;
    let app = create_router(state.clone());
    tracing::info!("Router configured");
    Ok((app, state))
}

/// Release resources held by the state
pub async fn close(state: &AppState) {
    if let Some(pool) = &state.db_pool {
        tracing::info!("Closing database connection pool");
        pool.close().await;
    }
}
