//! User service - user lookup and profile pages

use tracing::instrument;
use warbler_core::{DomainError, SessionContext, Snowflake, User};

use crate::dto::{CurrentUserResponse, MessageResponse, ProfileResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::follow::FollowService;
use super::message::MessageService;

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Find a user or fail with `UserNotFound`
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::UserNotFound(user_id)))
    }

    /// The signed-in user's own account
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.get_user(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Public profile of `user_id` as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn get_profile(
        &self,
        viewer: SessionContext,
        user_id: Snowflake,
    ) -> ServiceResult<ProfileResponse> {
        let user = self.get_user(user_id).await?;

        let follows = FollowService::new(self.ctx);
        let (following_count, followers_count) = follows.counts(user_id).await?;

        let (is_following, is_followed_by) = match viewer.current_user_id() {
            Some(viewer_id) if viewer_id != user_id => (
                follows.is_following(viewer_id, user_id).await?,
                follows.is_followed_by(viewer_id, user_id).await?,
            ),
            _ => (false, false),
        };

        let messages = MessageService::new(self.ctx)
            .list_user_messages(user_id)
            .await?
            .into_iter()
            .map(MessageResponse::from)
            .collect();

        Ok(ProfileResponse {
            user: UserResponse::from(user),
            messages,
            following_count,
            followers_count,
            is_following,
            is_followed_by,
        })
    }
}
