//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use warbler_core::{
    DomainError, FollowEdge, FollowRepository, RepoResult, Snowflake, User,
};

use crate::models::{FollowModel, UserModel};

use super::error::{map_db_error, map_missing_user_error};

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self, edge), fields(follower_id = %edge.follower_id, followed_id = %edge.followed_id))]
    async fn follow(&self, edge: &FollowEdge) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock both endpoints so neither can disappear before the insert
        let found: Vec<i64> = sqlx::query_scalar(
            r"
            SELECT id FROM users WHERE id = ANY($1) FOR SHARE
            ",
        )
        .bind(vec![
            edge.follower_id.into_inner(),
            edge.followed_id.into_inner(),
        ])
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for id in [edge.follower_id, edge.followed_id] {
            if !found.contains(&id.into_inner()) {
                return Err(DomainError::UserNotFound(id));
            }
        }

        let inserted = sqlx::query_as::<_, FollowModel>(
            r"
            INSERT INTO follows (follower_id, followed_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            RETURNING follower_id, followed_id, created_at
            ",
        )
        .bind(edge.follower_id.into_inner())
        .bind(edge.followed_id.into_inner())
        .bind(edge.created_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_missing_user_error(e, edge.followed_id))?;

        tx.commit().await.map_err(map_db_error)?;

        if let Some(row) = inserted {
            let stored = FollowEdge::from(row);
            debug!(created_at = %stored.created_at, "Follow edge stored");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    #[instrument(skip(self))]
    async fn unfollow(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM follows
            WHERE follower_id = $1 AND followed_id = $2
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followed_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn is_following(
        &self,
        follower_id: Snowflake,
        followed_id: Snowflake,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2
            )
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followed_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.username, u.email, u.image_url, u.header_image_url, u.bio,
                   u.location, u.created_at
            FROM follows f
            INNER JOIN users u ON u.id = f.follower_id
            WHERE f.followed_id = $1
            ORDER BY f.created_at, u.id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_following(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.username, u.email, u.image_url, u.header_image_url, u.bio,
                   u.location, u.created_at
            FROM follows f
            INNER JOIN users u ON u.id = f.followed_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at, u.id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_followers(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(r"SELECT COUNT(*) FROM follows WHERE followed_id = $1")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_following(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(r"SELECT COUNT(*) FROM follows WHERE follower_id = $1")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
