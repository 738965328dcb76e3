//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use warbler_core::{DomainError, Message, MessageRepository, RepoResult, Snowflake};

use crate::models::MessageModel;

use super::error::{map_db_error, map_missing_user_error};

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, text, author_id, created_at
            FROM messages
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id, author_id = %message.author_id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, text, author_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(message.id.into_inner())
        .bind(&message.text)
        .bind(message.author_id.into_inner())
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_missing_user_error(e, message.author_id))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, text, author_id, created_at
            FROM messages
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(author_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_timeline(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, text, author_id, created_at
            FROM messages
            WHERE author_id = $1
               OR author_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete_authored(&self, id: Snowflake, requester_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let author_id = sqlx::query_scalar::<_, i64>(
            r"
            SELECT author_id FROM messages WHERE id = $1 FOR UPDATE
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::MessageNotFound(id))?;

        if author_id != requester_id.into_inner() {
            return Err(DomainError::NotMessageAuthor);
        }

        sqlx::query(r"DELETE FROM messages WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
