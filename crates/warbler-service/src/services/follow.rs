//! Follow graph service
//!
//! Directed follow edges between users. Mutations go through `follow` and
//! `unfollow` only; the repository performs each one atomically.

use tracing::{info, instrument};
use warbler_core::{DomainError, FollowEdge, Snowflake, User};

use crate::dto::{FollowListResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Make `follower_id` follow `followee_id`. Following twice is a no-op.
    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: Snowflake, followee_id: Snowflake) -> ServiceResult<()> {
        let edge = FollowEdge::new(follower_id, followee_id)?;

        if self.ctx.follow_repo().follow(&edge).await? {
            info!(follower_id = %follower_id, followee_id = %followee_id, "User followed");
        }
        Ok(())
    }

    /// Remove the edge if present
    #[instrument(skip(self))]
    pub async fn unfollow(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> ServiceResult<()> {
        if self.ctx.follow_repo().unfollow(follower_id, followee_id).await? {
            info!(follower_id = %follower_id, followee_id = %followee_id, "User unfollowed");
        }
        Ok(())
    }

    /// Does `a` follow `b`?
    pub async fn is_following(&self, a: Snowflake, b: Snowflake) -> ServiceResult<bool> {
        Ok(self.ctx.follow_repo().is_following(a, b).await?)
    }

    /// Is `a` followed by `b`?
    pub async fn is_followed_by(&self, a: Snowflake, b: Snowflake) -> ServiceResult<bool> {
        self.is_following(b, a).await
    }

    /// Users following `user_id`; empty for unknown users
    pub async fn list_followers(&self, user_id: Snowflake) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.follow_repo().find_followers(user_id).await?)
    }

    /// Users `user_id` follows; empty for unknown users
    pub async fn list_following(&self, user_id: Snowflake) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.follow_repo().find_following(user_id).await?)
    }

    /// `(following, followers)` for `user_id`
    pub async fn counts(&self, user_id: Snowflake) -> ServiceResult<(i64, i64)> {
        let repo = self.ctx.follow_repo();
        Ok((
            repo.count_following(user_id).await?,
            repo.count_followers(user_id).await?,
        ))
    }

    /// Followers page; the user must exist
    #[instrument(skip(self))]
    pub async fn get_followers(&self, user_id: Snowflake) -> ServiceResult<FollowListResponse> {
        let user = self.require_user(user_id).await?;
        let users = self.list_followers(user_id).await?;
        Ok(Self::list_response(&user, users))
    }

    /// Following page; the user must exist
    #[instrument(skip(self))]
    pub async fn get_following(&self, user_id: Snowflake) -> ServiceResult<FollowListResponse> {
        let user = self.require_user(user_id).await?;
        let users = self.list_following(user_id).await?;
        Ok(Self::list_response(&user, users))
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::UserNotFound(user_id)))
    }

    fn list_response(user: &User, users: Vec<User>) -> FollowListResponse {
        FollowListResponse {
            user: UserResponse::from(user),
            users: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, user};

    #[tokio::test]
    async fn test_no_edges_initially() {
        let ctx = context();
        let a = user(&ctx, "a").await;
        let b = user(&ctx, "b").await;
        let service = FollowService::new(&ctx);

        assert!(!service.is_following(a, b).await.unwrap());
        assert!(!service.is_following(b, a).await.unwrap());
    }

    #[tokio::test]
    async fn test_follow_is_directed() {
        let ctx = context();
        let a = user(&ctx, "a").await;
        let b = user(&ctx, "b").await;
        let service = FollowService::new(&ctx);

        service.follow(a, b).await.unwrap();

        assert!(service.is_following(a, b).await.unwrap());
        assert!(!service.is_following(b, a).await.unwrap());
        assert!(service.is_followed_by(b, a).await.unwrap());
        assert!(!service.is_followed_by(a, b).await.unwrap());
    }

    #[tokio::test]
    async fn test_self_follow_rejected() {
        let ctx = context();
        let a = user(&ctx, "a").await;

        let err = FollowService::new(&ctx).follow(a, a).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::SelfFollow)));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_follow_twice_single_edge() {
        let ctx = context();
        let a = user(&ctx, "a").await;
        let b = user(&ctx, "b").await;
        let service = FollowService::new(&ctx);

        service.follow(a, b).await.unwrap();
        service.follow(a, b).await.unwrap();

        assert_eq!(service.list_followers(b).await.unwrap().len(), 1);
        assert_eq!(service.counts(a).await.unwrap(), (1, 0));
        assert_eq!(service.counts(b).await.unwrap(), (0, 1));
    }

    #[tokio::test]
    async fn test_follow_unknown_user() {
        let ctx = context();
        let a = user(&ctx, "a").await;

        let err = FollowService::new(&ctx)
            .follow(a, Snowflake::new(404))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_unfollow_is_noop_when_absent() {
        let ctx = context();
        let a = user(&ctx, "a").await;
        let b = user(&ctx, "b").await;
        let service = FollowService::new(&ctx);

        service.unfollow(a, b).await.unwrap();
        service.follow(a, b).await.unwrap();
        service.unfollow(a, b).await.unwrap();
        assert!(!service.is_following(a, b).await.unwrap());
    }

    #[tokio::test]
    async fn test_listings() {
        let ctx = context();
        let a = user(&ctx, "a").await;
        let b = user(&ctx, "b").await;
        let c = user(&ctx, "c").await;
        let service = FollowService::new(&ctx);

        service.follow(b, a).await.unwrap();
        service.follow(c, a).await.unwrap();
        service.follow(a, c).await.unwrap();

        let followers = service.get_followers(a).await.unwrap();
        let names: Vec<_> = followers.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["b", "c"]);

        let following = service.get_following(a).await.unwrap();
        assert_eq!(following.users.len(), 1);
        assert_eq!(following.users[0].username, "c");

        // Listings are restartable: reading again sees the same store state
        assert_eq!(service.list_followers(a).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_listings() {
        let ctx = context();
        let service = FollowService::new(&ctx);
        let ghost = Snowflake::new(404);

        assert!(service.list_followers(ghost).await.unwrap().is_empty());
        assert!(service.list_following(ghost).await.unwrap().is_empty());
        assert_eq!(service.get_followers(ghost).await.unwrap_err().status_code(), 404);
    }
}
