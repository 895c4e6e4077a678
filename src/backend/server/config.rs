/**
 * Server Configuration
 *
 * This module loads the application configuration from the environment
 * (optionally seeded from a `.env` file) and opens the optional PostgreSQL
 * connection.
 *
 * # Configuration Sources
 *
 * | Variable                      | Default                 |
 * |-------------------------------|-------------------------|
 * | `DATABASE_URL`                | unset (in-memory store) |
 * | `JWT_SECRET`                  | required in release     |
 * | `SECURITY_PASSWORD_SALT`      | empty                   |
 * | `ACCESS_TOKEN_TTL_MINUTES`    | 60                      |
 * | `ACCESS_TOKEN_REFRESH_MINUTES`| 30                      |
 * | `CONFIRMATION_TOKEN_TTL_SECS` | 3600                    |
 * | `BCRYPT_COST`                 | bcrypt default          |
 * | `PUBLIC_BASE_URL`             | http://127.0.0.1:8000   |
 * | `SERVER_PORT`                 | 8000                    |
 * | `MAIL_SERVER` and `MAIL_*`    | unset (log mailer)      |
 */

use std::str::FromStr;

use chrono::Duration;
use sqlx::PgPool;

use crate::backend::error::StoreError;
use crate::shared::config::DEV_JWT_SECRET;
use crate::shared::{AppConfig, ConfigError, MailConfig};

/// Source of configuration values, keyed by variable name
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.trim().is_empty())
    }
}

impl EnvSource for std::collections::HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        std::collections::HashMap::get(self, key).map(|value| value.to_string())
    }
}

fn parse<T: FromStr>(env: &dyn EnvSource, key: &'static str) -> Result<Option<T>, ConfigError> {
    match env.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

fn parse_flag(env: &dyn EnvSource, key: &'static str) -> Result<bool, ConfigError> {
    match env.get(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(value) => match value.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key,
                value: value.clone(),
            }),
        },
    }
}

fn load_mail(env: &dyn EnvSource) -> Result<Option<MailConfig>, ConfigError> {
    let Some(server) = env.get("MAIL_SERVER") else {
        return Ok(None);
    };
    let use_ssl = parse_flag(env, "MAIL_USE_SSL")?;
    let default_port = if use_ssl { 465 } else { 587 };
    Ok(Some(MailConfig {
        server,
        port: parse(env, "MAIL_PORT")?.unwrap_or(default_port),
        username: env.get("MAIL_USERNAME"),
        password: env.get("MAIL_PASSWORD"),
        use_tls: parse_flag(env, "MAIL_USE_TLS")?,
        use_ssl,
        default_sender: env.get("MAIL_DEFAULT_SENDER").unwrap_or_default(),
    }))
}

/// Build the configuration from an environment source
///
/// # Errors
///
/// Returns `ConfigError` for unparsable values, for a missing `JWT_SECRET`
/// in release builds, and for anything `AppConfig::validate` rejects.
pub fn config_from_env(env: &dyn EnvSource) -> Result<AppConfig, ConfigError> {
    let mut builder = AppConfig::builder();

    if let Some(url) = env.get("DATABASE_URL") {
        builder = builder.database_url(url);
    }

    match env.get("JWT_SECRET") {
        Some(secret) => builder = builder.jwt_secret(secret),
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set. Using the development secret.");
            builder = builder.jwt_secret(DEV_JWT_SECRET);
        }
        None => return Err(ConfigError::MissingValue("JWT_SECRET")),
    }

    if let Some(salt) = env.get("SECURITY_PASSWORD_SALT") {
        builder = builder.password_salt(salt);
    }
    if let Some(minutes) = parse::<i64>(env, "ACCESS_TOKEN_TTL_MINUTES")? {
        builder = builder.access_token_ttl(Duration::minutes(minutes));
    }
    if let Some(minutes) = parse::<i64>(env, "ACCESS_TOKEN_REFRESH_MINUTES")? {
        builder = builder.refresh_window(Duration::minutes(minutes));
    }
    if let Some(seconds) = parse::<i64>(env, "CONFIRMATION_TOKEN_TTL_SECS")? {
        builder = builder.confirmation_token_ttl(Duration::seconds(seconds));
    }
    if let Some(cost) = parse::<u32>(env, "BCRYPT_COST")? {
        builder = builder.bcrypt_cost(cost);
    }
    if let Some(url) = env.get("PUBLIC_BASE_URL") {
        builder = builder.public_base_url(url);
    }
    if let Some(port) = parse::<u16>(env, "SERVER_PORT")? {
        builder = builder.server_port(port);
    }
    if let Some(mail) = load_mail(env)? {
        builder = builder.mail(mail);
    }

    builder.build()
}

/// Load the configuration from `.env` and the process environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();
    config_from_env(&ProcessEnv)
}

/// Open the database pool and run migrations
///
/// # Returns
///
/// - `Ok(None)` if `DATABASE_URL` is not configured; the server then runs on
///   the in-memory stores
/// - `Ok(Some(pool))` once connected and migrated
///
/// # Errors
///
/// Connection and migration failures are returned; the server does not
/// silently fall back to memory when a database was asked for.
pub async fn load_database(config: &AppConfig) -> Result<Option<PgPool>, StoreError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set. Boards and users are kept in memory.");
        return Ok(None);
    };

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(Some(pool))
}
