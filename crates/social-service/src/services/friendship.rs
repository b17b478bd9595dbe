//! Friendship service
//!
//! Owns the friend request lifecycle and the friendship edge:
//!
//! ```text
//! pending --accept--> accepted
//! pending --reject--> rejected
//! ```
//!
//! Both end states are terminal. Accepting creates the canonical
//! `(min, max)` friendship row and bumps the friend counters of both users in
//! the same transaction. A rejected or unfriended pair may start over with a
//! new request.

use social_core::entities::{NewFriendRequest, NewFriendship, RequestDecision};
use social_core::{DomainError, Snowflake, UserPair};
use tracing::{info, instrument, warn};

use crate::dto::{FriendRequestResponse, FriendshipResponse, RequestResolutionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup::{require_friend_request, require_user};

/// Friendship service
pub struct FriendshipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendshipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Propose a friendship from `sender_id` to `receiver_id`
    ///
    /// Fails with `DuplicatePending` if a pending request already connects
    /// the pair in either direction, and with `AlreadyFriends` if they are
    /// friends.
    #[instrument(skip(self))]
    pub async fn send_friend_request(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
    ) -> ServiceResult<FriendRequestResponse> {
        let pair = UserPair::new(sender_id, receiver_id)?;

        let mut tx = self.ctx.begin().await?;
        require_user(tx.as_mut(), sender_id).await?;
        require_user(tx.as_mut(), receiver_id).await?;

        if let Some(existing) = tx.find_pending_request(pair).await? {
            warn!(request_id = %existing.id, "Pending request already connects the pair");
            return Err(DomainError::DuplicatePending(sender_id, receiver_id).into());
        }
        if tx.find_friendship(pair).await?.is_some() {
            return Err(DomainError::AlreadyFriends(pair.low(), pair.high()).into());
        }

        let request = tx
            .insert_friend_request(NewFriendRequest {
                sender_id,
                receiver_id,
                created_at: self.ctx.now(),
            })
            .await?;
        tx.commit().await?;

        info!(request_id = %request.id, "Friend request sent");

        Ok(FriendRequestResponse::from(request))
    }

    /// Accept or reject a pending request
    ///
    /// Fails with `AlreadyResolved` once the request has left `pending`.
    #[instrument(skip(self))]
    pub async fn respond_to_request(
        &self,
        request_id: Snowflake,
        decision: RequestDecision,
    ) -> ServiceResult<RequestResolutionResponse> {
        let mut tx = self.ctx.begin().await?;
        let mut request = require_friend_request(tx.as_mut(), request_id).await?;

        let now = self.ctx.now();
        request.resolve(decision, now)?;
        tx.resolve_friend_request(&request).await?;

        let friendship = match decision {
            RequestDecision::Accept => {
                let pair = request.pair()?;
                if tx.find_friendship(pair).await?.is_some() {
                    return Err(DomainError::AlreadyFriends(pair.low(), pair.high()).into());
                }
                let friendship = tx
                    .insert_friendship(NewFriendship {
                        pair,
                        created_at: now,
                    })
                    .await?;
                tx.adjust_friend_counts(pair, 1).await?;
                Some(friendship)
            }
            RequestDecision::Reject => None,
        };
        tx.commit().await?;

        info!(
            request_id = %request.id,
            status = %request.status,
            "Friend request resolved"
        );

        Ok(RequestResolutionResponse {
            request: FriendRequestResponse::from(request),
            friendship: friendship.map(FriendshipResponse::from),
        })
    }

    /// Remove the friendship between two users and decrement both counters
    #[instrument(skip(self))]
    pub async fn unfriend(&self, user_id: Snowflake, friend_id: Snowflake) -> ServiceResult<()> {
        let pair = UserPair::new(user_id, friend_id)?;

        let mut tx = self.ctx.begin().await?;
        if !tx.delete_friendship(pair).await? {
            return Err(DomainError::NotFriends(pair.low(), pair.high()).into());
        }
        tx.adjust_friend_counts(pair, -1).await?;
        tx.commit().await?;

        info!(pair = %pair, "Friendship removed");

        Ok(())
    }

    /// Pending requests addressed to `user_id`, oldest first
    #[instrument(skip(self))]
    pub async fn list_friend_requests(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<FriendRequestResponse>> {
        let mut tx = self.ctx.begin().await?;
        require_user(tx.as_mut(), user_id).await?;
        let requests = tx.list_pending_requests(user_id).await?;
        tx.commit().await?;

        Ok(requests.iter().map(FriendRequestResponse::from).collect())
    }

    /// IDs of everyone `user_id` is friends with, in the order the
    /// friendships were made
    #[instrument(skip(self))]
    pub async fn list_friends(&self, user_id: Snowflake) -> ServiceResult<Vec<Snowflake>> {
        let mut tx = self.ctx.begin().await?;
        require_user(tx.as_mut(), user_id).await?;
        let friendships = tx.list_friendships(user_id).await?;
        tx.commit().await?;

        Ok(friendships
            .iter()
            .filter_map(|f| f.friend_of(user_id))
            .collect())
    }
}
