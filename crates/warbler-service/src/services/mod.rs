//! Business logic services

pub mod auth;
pub mod context;
pub mod error;
pub mod follow;
pub mod message;
pub mod user;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use follow::FollowService;
pub use message::MessageService;
pub use user::UserService;
