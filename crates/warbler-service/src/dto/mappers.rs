//! Entity to DTO mappers

use warbler_core::{Message, User};

use super::responses::{CurrentUserResponse, MessageResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            image_url: user.image_url_or_default().to_string(),
            header_image_url: user.header_image_url_or_default().to_string(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            image_url: user.image_url_or_default().to_string(),
            created_at: user.created_at,
        }
    }
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            text: message.text.clone(),
            author_id: message.author_id.to_string(),
            created_at: message.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}
