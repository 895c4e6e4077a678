//! Application configuration module
//!
//! Provides the configuration types for the server. Values are collected
//! through [`AppConfigBuilder`] (the server reads them from the environment,
//! tests set them directly) and validated when the builder is finished.

use chrono::Duration;
use thiserror::Error;

/// Development-only signing secret used when none is configured
pub const DEV_JWT_SECRET: &str = "taskboard-development-secret";

/// Outbound mail settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Upgrade the connection with STARTTLS
    pub use_tls: bool,
    /// Connect over implicit TLS
    pub use_ssl: bool,
    pub default_sender: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL URL; `None` selects the in-memory stores
    pub database_url: Option<String>,
    /// Secret for access-token signatures
    pub jwt_secret: String,
    /// Mixed into the confirmation-token secret
    pub password_salt: String,
    pub access_token_ttl: Duration,
    pub confirmation_token_ttl: Duration,
    /// Tokens expiring within this window are re-issued on the response;
    /// zero disables the refresh
    pub refresh_window: Duration,
    pub bcrypt_cost: u32,
    /// Base URL used to build email confirmation links
    pub public_base_url: String,
    pub server_port: u16,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.access_token_ttl <= Duration::zero() {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_TTL_MINUTES",
                value: self.access_token_ttl.num_minutes().to_string(),
            });
        }
        if self.refresh_window < Duration::zero() {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_REFRESH_MINUTES",
                value: self.refresh_window.num_minutes().to_string(),
            });
        }
        if self.confirmation_token_ttl <= Duration::zero() {
            return Err(ConfigError::InvalidValue {
                key: "CONFIRMATION_TOKEN_TTL_SECS",
                value: self.confirmation_token_ttl.num_seconds().to_string(),
            });
        }
        if !self.public_base_url.starts_with("http://") && !self.public_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.public_base_url.clone()));
        }
        if let Some(mail) = &self.mail {
            if mail.default_sender.trim().is_empty() {
                return Err(ConfigError::MissingValue("MAIL_DEFAULT_SENDER"));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            password_salt: String::new(),
            access_token_ttl: Duration::minutes(60),
            confirmation_token_ttl: Duration::seconds(3600),
            refresh_window: Duration::minutes(30),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            public_base_url: "http://127.0.0.1:8000".to_string(),
            server_port: 8000,
            mail: None,
        }
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn password_salt(mut self, salt: impl Into<String>) -> Self {
        self.config.password_salt = salt.into();
        self
    }

    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.config.access_token_ttl = ttl;
        self
    }

    pub fn confirmation_token_ttl(mut self, ttl: Duration) -> Self {
        self.config.confirmation_token_ttl = ttl;
        self
    }

    pub fn refresh_window(mut self, window: Duration) -> Self {
        self.config.refresh_window = window;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.public_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    pub fn mail(mut self, mail: MailConfig) -> Self {
        self.config.mail = Some(mail);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
