//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, MessageConfig, RedisConfig,
    ServerConfig, SessionConfig, SnowflakeConfig, StorageBackend, MAX_SESSION_TTL_SECONDS,
};
