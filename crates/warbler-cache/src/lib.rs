//! # warbler-cache
//!
//! Login session storage behind the `SessionStore` trait.
//!
//! - `RedisSessionStore`: sessions shared across server instances, expired by Redis TTLs
//! - `MemorySessionStore`: a single-process store for development and tests
//!
//! ```ignore
//! use warbler_cache::{RedisPool, RedisSessionStore};
//!
//! let pool = RedisPool::from_config(&redis_config)?;
//! let sessions = RedisSessionStore::new(pool);
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::{MemorySessionStore, RedisSessionStore};
