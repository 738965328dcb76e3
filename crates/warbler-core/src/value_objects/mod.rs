//! Value objects - immutable types that represent domain concepts

mod session_context;
mod snowflake;

pub use session_context::SessionContext;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
