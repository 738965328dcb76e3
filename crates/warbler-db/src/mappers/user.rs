//! User model -> entity mapper

use warbler_core::{Snowflake, User};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            image_url: model.image_url,
            header_image_url: model.header_image_url,
            bio: model.bio,
            location: model.location,
            created_at: model.created_at,
        }
    }
}
