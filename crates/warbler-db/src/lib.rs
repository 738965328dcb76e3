//! # warbler-db
//!
//! Storage layer implementing the warbler-core repository traits.
//!
//! - PostgreSQL via SQLx: connection pool, schema bootstrap, models, mappers,
//!   and `Pg*Repository` implementations
//! - `MemoryStore`: an in-process backend with the same atomicity guarantees
//!
//! ```rust,ignore
//! use warbler_db::{create_pool, ensure_schema, DatabaseConfig, PgUserRepository};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! ensure_schema(&pool).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

pub use memory::MemoryStore;
pub use pool::{create_pool, ensure_schema, DatabaseConfig, PgPool};
pub use repositories::{PgFollowRepository, PgMessageRepository, PgUserRepository};
