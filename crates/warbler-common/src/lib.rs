//! # warbler-common
//!
//! Shared utilities including configuration, error handling, password hashing,
//! session tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{PasswordService, SessionClaims, SessionTokenService};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, MessageConfig, RedisConfig,
    ServerConfig, SessionConfig, SnowflakeConfig, StorageBackend, MAX_SESSION_TTL_SECONDS,
};
pub use error::AppError;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
