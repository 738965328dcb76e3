//! Follow model -> entity mapper

use warbler_core::{FollowEdge, Snowflake};

use crate::models::FollowModel;

// Rows already satisfy the no-self-follow CHECK, so no validation here
impl From<FollowModel> for FollowEdge {
    fn from(model: FollowModel) -> Self {
        FollowEdge {
            follower_id: Snowflake::new(model.follower_id),
            followed_id: Snowflake::new(model.followed_id),
            created_at: model.created_at,
        }
    }
}
