//! Ports implemented by the storage and session crates

mod repositories;

pub use repositories::{
    FollowRepository, MessageRepository, RepoResult, SessionStore, UserRepository,
};
