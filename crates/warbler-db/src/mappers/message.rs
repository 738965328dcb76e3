//! Message model -> entity mapper

use warbler_core::{Message, Snowflake};

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            text: model.text,
            author_id: Snowflake::new(model.author_id),
            created_at: model.created_at,
        }
    }
}
