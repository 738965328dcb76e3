//! Database models - SQLx-compatible structs for PostgreSQL tables

mod follow;
mod message;
mod user;

pub use follow::FollowModel;
pub use message::MessageModel;
pub use user::UserModel;
