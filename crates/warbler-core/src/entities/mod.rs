//! Domain entities - core business objects

mod follow;
mod message;
mod session;
mod user;

pub use follow::FollowEdge;
pub use message::{Message, DEFAULT_MAX_MESSAGE_LENGTH};
pub use session::Session;
pub use user::{User, DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL};
