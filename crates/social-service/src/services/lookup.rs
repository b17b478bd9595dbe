//! Existence checks shared by the services
//!
//! Each runs inside the caller's transaction, so what it finds is what the
//! following writes are validated against.

use social_core::entities::{FriendRequest, Group, Post, User};
use social_core::traits::GraphTransaction;
use social_core::{DomainError, Snowflake};

use super::error::ServiceResult;

pub(crate) async fn require_user(
    tx: &mut dyn GraphTransaction,
    user_id: Snowflake,
) -> ServiceResult<User> {
    Ok(tx
        .find_user(user_id)
        .await?
        .ok_or(DomainError::UserNotFound(user_id))?)
}

pub(crate) async fn require_post(
    tx: &mut dyn GraphTransaction,
    post_id: Snowflake,
) -> ServiceResult<Post> {
    Ok(tx
        .find_post(post_id)
        .await?
        .ok_or(DomainError::PostNotFound(post_id))?)
}

pub(crate) async fn require_group(
    tx: &mut dyn GraphTransaction,
    group_id: Snowflake,
) -> ServiceResult<Group> {
    Ok(tx
        .find_group(group_id)
        .await?
        .ok_or(DomainError::GroupNotFound(group_id))?)
}

pub(crate) async fn require_friend_request(
    tx: &mut dyn GraphTransaction,
    request_id: Snowflake,
) -> ServiceResult<FriendRequest> {
    Ok(tx
        .find_friend_request(request_id)
        .await?
        .ok_or(DomainError::FriendRequestNotFound(request_id))?)
}
