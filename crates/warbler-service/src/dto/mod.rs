//! Data transfer objects for API requests and responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateMessageRequest, LoginRequest, SignupRequest};
pub use responses::{
    CurrentUserResponse, FollowListResponse, HealthResponse, MessageResponse, ProfileResponse,
    SessionGrant, TimelineResponse, UserResponse,
};
