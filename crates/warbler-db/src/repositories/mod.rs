//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in warbler-core.

mod error;
mod follow;
mod message;
mod user;

pub use follow::PgFollowRepository;
pub use message::PgMessageRepository;
pub use user::PgUserRepository;
