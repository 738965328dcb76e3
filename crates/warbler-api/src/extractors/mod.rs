//! Axum extractors for request handling
//!
//! Custom extractors for the session gate, path parameters, and validated forms.

mod path;
mod session;
mod validated;

pub use path::{MessageIdPath, SnowflakePath, UserIdPath};
pub use session::CurrentSession;
pub use validated::ValidatedForm;
