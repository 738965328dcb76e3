//! Follow edge - a directed "follower receives followee's messages" relationship

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Directed edge from `follower_id` to `followed_id`.
///
/// Edges are asymmetric: an edge (A, B) says nothing about (B, A).
/// At most one edge exists per ordered pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEdge {
    pub follower_id: Snowflake,
    pub followed_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl FollowEdge {
    /// Create a new edge, rejecting self-follows
    pub fn new(follower_id: Snowflake, followed_id: Snowflake) -> Result<Self, DomainError> {
        if follower_id == followed_id {
            return Err(DomainError::SelfFollow);
        }

        Ok(Self {
            follower_id,
            followed_id,
            created_at: Utc::now(),
        })
    }

    /// Check whether this edge connects the given ordered pair
    #[inline]
    pub fn connects(&self, follower_id: Snowflake, followed_id: Snowflake) -> bool {
        self.follower_id == follower_id && self.followed_id == followed_id
    }
}
