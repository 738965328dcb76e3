//! # warbler-core
//!
//! Domain layer for Warbler: users, directed follow edges, messages, sessions,
//! and the repository traits the infrastructure crates implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{FollowEdge, Message, Session, User, DEFAULT_MAX_MESSAGE_LENGTH};
pub use error::DomainError;
pub use traits::{FollowRepository, MessageRepository, RepoResult, SessionStore, UserRepository};
pub use value_objects::{SessionContext, Snowflake, SnowflakeGenerator, SnowflakeParseError};
