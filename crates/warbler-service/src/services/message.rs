//! Message service
//!
//! Short text messages owned by their author. Only the author may delete one.

use tracing::{info, instrument, warn};
use warbler_core::{DomainError, Message, Snowflake};

use crate::dto::{CreateMessageRequest, MessageResponse, TimelineResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Page size for profile and timeline listings
pub const LIST_LIMIT: i64 = 100;

pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a message written by `author_id`
    #[instrument(skip(self, request), fields(author_id = %author_id))]
    pub async fn create_message(
        &self,
        author_id: Snowflake,
        request: CreateMessageRequest,
    ) -> ServiceResult<Message> {
        Message::validate_text(&request.text, self.ctx.message_max_length())?;

        let message = Message::new(self.ctx.generate_id(), author_id, request.text);
        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message.id, "Message created");
        Ok(message)
    }

    pub async fn find_by_id(&self, message_id: Snowflake) -> ServiceResult<Option<Message>> {
        Ok(self.ctx.message_repo().find_by_id(message_id).await?)
    }

    /// Fetch a message or fail with 404
    #[instrument(skip(self))]
    pub async fn get_message(&self, message_id: Snowflake) -> ServiceResult<MessageResponse> {
        self.find_by_id(message_id)
            .await?
            .map(MessageResponse::from)
            .ok_or_else(|| ServiceError::from(DomainError::MessageNotFound(message_id)))
    }

    /// Permanently delete a message on behalf of its author
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        message_id: Snowflake,
        requester_id: Snowflake,
    ) -> ServiceResult<()> {
        match self
            .ctx
            .message_repo()
            .delete_authored(message_id, requester_id)
            .await
        {
            Ok(()) => {
                info!(message_id = %message_id, "Message deleted");
                Ok(())
            }
            Err(DomainError::NotMessageAuthor) => {
                warn!(message_id = %message_id, requester_id = %requester_id, "Delete refused: not the author");
                Err(DomainError::NotMessageAuthor.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// A user's own messages, newest first
    pub async fn list_user_messages(&self, user_id: Snowflake) -> ServiceResult<Vec<Message>> {
        Ok(self
            .ctx
            .message_repo()
            .find_by_author(user_id, LIST_LIMIT)
            .await?)
    }

    /// Messages by `user_id` and everyone they follow, newest first
    #[instrument(skip(self))]
    pub async fn timeline(&self, user_id: Snowflake) -> ServiceResult<TimelineResponse> {
        let messages = self
            .ctx
            .message_repo()
            .find_timeline(user_id, LIST_LIMIT)
            .await?;

        Ok(TimelineResponse {
            messages: messages.into_iter().map(MessageResponse::from).collect(),
        })
    }
}
