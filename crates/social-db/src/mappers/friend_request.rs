//! Friend request model -> entity mapper

use social_core::entities::{FriendRequest, FriendRequestStatus};
use social_core::error::DomainError;
use social_core::value_objects::Snowflake;

use crate::models::FriendRequestModel;

impl TryFrom<FriendRequestModel> for FriendRequest {
    type Error = DomainError;

    fn try_from(model: FriendRequestModel) -> Result<Self, Self::Error> {
        Ok(FriendRequest {
            id: Snowflake::new(model.request_id),
            sender_id: Snowflake::new(model.sender_id),
            receiver_id: Snowflake::new(model.receiver_id),
            status: model.status.parse::<FriendRequestStatus>()?,
            created_at: model.created_at,
            responded_at: model.responded_at,
        })
    }
}
