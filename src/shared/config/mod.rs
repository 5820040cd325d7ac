//! Application configuration module
//!
//! Configuration is resolved in three layers, each overriding the previous:
//!
//! 1. Built-in defaults (suitable for local development)
//! 2. An optional TOML file named by `TASKBOARD_CONFIG`
//! 3. Environment variables (`SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`, ...)
//!
//! ```rust
//! use taskboard::shared::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .port(4100)
//!     .jwt_secret("test-secret")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.port, 4100);
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_JWT_SECRET: &str = "your_jwt_secret";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Port the HTTP/WebSocket server listens on
    pub port: u16,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    /// Lifetime of access tokens in seconds
    pub access_token_ttl_secs: u64,
    /// Lifetime of refresh tokens in seconds
    pub refresh_token_ttl_secs: u64,
    /// Allowed CORS origin for the browser client
    pub client_url: String,
    /// Capacity of the fan-out broadcast channel
    pub broadcast_capacity: usize,
    /// Interval of the background consistency sweep (0 disables it)
    pub reconcile_interval_secs: u64,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            database_url: None,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            access_token_ttl_secs: 12 * 60 * 60,
            refresh_token_ttl_secs: 7 * 24 * 60 * 60,
            client_url: "http://localhost:5173".to_string(),
            broadcast_capacity: 1000,
            reconcile_interval_secs: 0,
            bcrypt_cost: 10,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from defaults, the optional TOML file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("TASKBOARD_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        let config = base.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Override fields from environment-style key lookups
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            self.port = parse_number("SERVER_PORT", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("ACCESS_TOKEN_TTL_SECS") {
            self.access_token_ttl_secs = parse_number("ACCESS_TOKEN_TTL_SECS", &ttl)?;
        }
        if let Some(ttl) = lookup("REFRESH_TOKEN_TTL_SECS") {
            self.refresh_token_ttl_secs = parse_number("REFRESH_TOKEN_TTL_SECS", &ttl)?;
        }
        if let Some(url) = lookup("CLIENT_URL") {
            self.client_url = url;
        }
        if let Some(capacity) = lookup("BROADCAST_CAPACITY") {
            self.broadcast_capacity = parse_number("BROADCAST_CAPACITY", &capacity)?;
        }
        if let Some(interval) = lookup("RECONCILE_INTERVAL_SECS") {
            self.reconcile_interval_secs = parse_number("RECONCILE_INTERVAL_SECS", &interval)?;
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_number("BCRYPT_COST", &cost)?;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "broadcast_capacity",
                message: "must be greater than zero".to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "bcrypt_cost",
                message: format!("{} is outside 4..=31", self.bcrypt_cost),
            });
        }
        if self.access_token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "access_token_ttl_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Whether the signing secret is still the development fallback
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        message: format!("'{}' is not a valid number", raw),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// Set the fan-out channel capacity
    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.config.broadcast_capacity = capacity;
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Set the consistency sweep interval
    pub fn reconcile_interval_secs(mut self, secs: u64) -> Self {
        self.config.reconcile_interval_secs = secs;
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
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read config file {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse config file: {0}")]
    Parse(String),
}
