//! Application configuration
//!
//! Loaded from environment variables (with `.env` support via dotenvy).
//! `AppConfig::in_memory` builds a self-contained configuration for tests
//! and local runs that needs neither PostgreSQL nor Redis.

use std::env;
use std::str::FromStr;

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageBackend,
    /// Present whenever `storage` is `Postgres`
    pub database: Option<DatabaseConfig>,
    /// Sessions live in Redis when set, in process memory otherwise
    pub redis: Option<RedisConfig>,
    pub session: SessionConfig,
    pub messages: MessageConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// Where users, follow edges, and messages are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl StorageBackend {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue("STORAGE_BACKEND", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Login session configuration
#[derive(Clone, Deserialize)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    pub secret: String,
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[redacted]")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// Message rules
#[derive(Debug, Clone, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_message_max_length")]
    pub max_length: usize,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Minimum accepted length of `SESSION_SECRET`
const MIN_SECRET_LENGTH: usize = 16;

/// Longest session lifetime accepted: ten years
pub const MAX_SESSION_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

// Default value functions
fn default_app_name() -> String {
    "warbler".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_session_ttl() -> i64 {
    604_800 // 7 days
}

fn default_cookie_name() -> String {
    "warbler_session".to_string()
}

fn default_message_max_length() -> usize {
    warbler_core::DEFAULT_MAX_MESSAGE_LENGTH
}

/// Read and parse an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage = env::var("STORAGE_BACKEND")
            .map(|s| s.parse())
            .unwrap_or(Ok(StorageBackend::default()))?;

        let database = match env::var("DATABASE_URL") {
            Ok(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
            }),
            Err(_) if storage == StorageBackend::Postgres => {
                return Err(ConfigError::MissingVar("DATABASE_URL"));
            }
            Err(_) => None,
        };

        let redis = match env::var("REDIS_URL") {
            Ok(url) => Some(RedisConfig {
                url,
                max_connections: parse_var(
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections(),
                )?,
            }),
            Err(_) => None,
        };

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: parse_var("APP_ENV", Environment::default())?,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("API_PORT", default_port())?,
            },
            storage,
            database,
            redis,
            session: SessionConfig {
                secret: env::var("SESSION_SECRET")
                    .map_err(|_| ConfigError::MissingVar("SESSION_SECRET"))?,
                ttl_seconds: parse_var("SESSION_TTL_SECONDS", default_session_ttl())?,
                cookie_name: env::var("SESSION_COOKIE_NAME")
                    .unwrap_or_else(|_| default_cookie_name()),
                cookie_secure: parse_var("SESSION_COOKIE_SECURE", false)?,
            },
            messages: MessageConfig {
                max_length: parse_var("MESSAGE_MAX_LENGTH", default_message_max_length())?,
            },
            snowflake: SnowflakeConfig {
                worker_id: parse_var("WORKER_ID", 0)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Self-contained configuration backed by in-memory storage and sessions
    #[must_use]
    pub fn in_memory(secret: impl Into<String>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port: 0,
            },
            storage: StorageBackend::Memory,
            database: None,
            redis: None,
            session: SessionConfig {
                secret: secret.into(),
                ttl_seconds: default_session_ttl(),
                cookie_name: default_cookie_name(),
                cookie_secure: false,
            },
            messages: MessageConfig {
                max_length: default_message_max_length(),
            },
            snowflake: SnowflakeConfig { worker_id: 0 },
        }
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns the first constraint that does not hold
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage == StorageBackend::Postgres && self.database.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL"));
        }
        if self.session.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::InvalidValue(
                "SESSION_SECRET",
                format!("must be at least {MIN_SECRET_LENGTH} characters"),
            ));
        }
        if !(1..=MAX_SESSION_TTL_SECONDS).contains(&self.session.ttl_seconds) {
            return Err(ConfigError::InvalidValue(
                "SESSION_TTL_SECONDS",
                self.session.ttl_seconds.to_string(),
            ));
        }
        if self.messages.max_length == 0 {
            return Err(ConfigError::InvalidValue("MESSAGE_MAX_LENGTH", "0".to_string()));
        }
        if self.snowflake.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                self.snowflake.worker_id.to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
