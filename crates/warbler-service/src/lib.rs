//! # warbler-service
//!
//! Application layer: services, DTOs, and the dependency container they share.
//! Every operation receives its caller's identity explicitly, as a user id or
//! a `SessionContext`; nothing here reads request-global state.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    AuthService, FollowService, MessageService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
