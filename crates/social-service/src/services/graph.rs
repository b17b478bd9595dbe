//! GraphConsistencyService - owned entry point to the social graph
//!
//! Bundles the per-domain services behind one cloneable handle so callers
//! (and spawned tasks) don't need to manage a [`ServiceContext`] borrow.
//! Every method is a single attempt; callers that want to absorb
//! `TransactionConflict` wrap the call in [`retry_on_conflict`] with
//! [`GraphConsistencyService::retry_policy`].
//!
//! [`retry_on_conflict`]: super::retry::retry_on_conflict

use social_core::entities::RequestDecision;
use social_core::Snowflake;

use crate::dto::{
    CreateGroupRequest, CreatePostRequest, FriendRequestResponse, GroupPostResponse,
    GroupResponse, PostResponse, ReactionCountResponse, ReactionResponse,
    RequestResolutionResponse, SignUpRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::friendship::FriendshipService;
use super::group::GroupService;
use super::post::PostService;
use super::reaction::ReactionService;
use super::retry::RetryPolicy;
use super::user::UserService;

#[derive(Debug, Clone)]
pub struct GraphConsistencyService {
    ctx: ServiceContext,
}

impl GraphConsistencyService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.ctx.retry_policy()
    }

    // =========================================================================
    // Friend requests and friendships
    // =========================================================================

    pub async fn send_friend_request(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
    ) -> ServiceResult<FriendRequestResponse> {
        FriendshipService::new(&self.ctx)
            .send_friend_request(sender_id, receiver_id)
            .await
    }

    pub async fn respond_to_request(
        &self,
        request_id: Snowflake,
        decision: RequestDecision,
    ) -> ServiceResult<RequestResolutionResponse> {
        FriendshipService::new(&self.ctx)
            .respond_to_request(request_id, decision)
            .await
    }

    pub async fn unfriend(&self, user_id: Snowflake, friend_id: Snowflake) -> ServiceResult<()> {
        FriendshipService::new(&self.ctx)
            .unfriend(user_id, friend_id)
            .await
    }

    pub async fn list_friend_requests(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<FriendRequestResponse>> {
        FriendshipService::new(&self.ctx)
            .list_friend_requests(user_id)
            .await
    }

    pub async fn list_friends(&self, user_id: Snowflake) -> ServiceResult<Vec<Snowflake>> {
        FriendshipService::new(&self.ctx).list_friends(user_id).await
    }

    // =========================================================================
    // Reactions
    // =========================================================================

    pub async fn react(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: &str,
    ) -> ServiceResult<ReactionResponse> {
        ReactionService::new(&self.ctx)
            .react(post_id, user_id, reaction_type)
            .await
    }

    pub async fn remove_reaction(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<bool> {
        ReactionService::new(&self.ctx)
            .remove_reaction(post_id, user_id)
            .await
    }

    pub async fn reaction_counts(
        &self,
        post_id: Snowflake,
    ) -> ServiceResult<Vec<ReactionCountResponse>> {
        ReactionService::new(&self.ctx).reaction_counts(post_id).await
    }

    // =========================================================================
    // Groups
    // =========================================================================

    pub async fn share_to_group(
        &self,
        group_id: Snowflake,
        post_id: Snowflake,
        shared_by: Option<Snowflake>,
    ) -> ServiceResult<GroupPostResponse> {
        GroupService::new(&self.ctx)
            .share_to_group(group_id, post_id, shared_by)
            .await
    }

    pub async fn create_group(&self, request: CreateGroupRequest) -> ServiceResult<GroupResponse> {
        GroupService::new(&self.ctx).create_group(request).await
    }

    pub async fn create_group_post(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<GroupPostResponse> {
        GroupService::new(&self.ctx)
            .create_group_post(group_id, user_id, request)
            .await
    }

    pub async fn list_group_posts(
        &self,
        group_id: Snowflake,
    ) -> ServiceResult<Vec<GroupPostResponse>> {
        GroupService::new(&self.ctx).list_group_posts(group_id).await
    }

    // =========================================================================
    // Users and posts
    // =========================================================================

    pub async fn sign_up(&self, request: SignUpRequest) -> ServiceResult<UserResponse> {
        UserService::new(&self.ctx).sign_up(request).await
    }

    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        UserService::new(&self.ctx).get_user(user_id).await
    }

    pub async fn create_post(
        &self,
        user_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        PostService::new(&self.ctx).create_post(user_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::retry::retry_on_conflict;
    use crate::services::test_support::memory_context;
    use std::time::Duration;

    fn service() -> (GraphConsistencyService, social_db::MemoryGraphStore) {
        let (ctx, store) = memory_context();
        let ctx = ctx.with_retry_policy(RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        });
        (GraphConsistencyService::new(ctx), store)
    }

    async fn user(service: &GraphConsistencyService, name: &str) -> Snowflake {
        service.sign_up(SignUpRequest::new(name)).await.unwrap().id
    }

    #[tokio::test]
    async fn test_concurrent_sends_only_one_wins() {
        let (service, store) = service();
        let a = user(&service, "a").await;
        let b = user(&service, "b").await;

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                let (from, to) = if i % 2 == 0 { (a, b) } else { (b, a) };
                tokio::spawn(async move { service.send_friend_request(from, to).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(e) => assert_eq!(e.error_code(), "DUPLICATE_PENDING"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(store.snapshot().await.friend_requests.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reacts_leave_one_row() {
        let (service, store) = service();
        let author = user(&service, "author").await;
        let post = service
            .create_post(author, CreatePostRequest::new("race"))
            .await
            .unwrap();

        let handles: Vec<_> = ["like", "love", "wow", "sad"]
            .into_iter()
            .map(|kind| {
                let service = service.clone();
                let post_id = post.id;
                tokio::spawn(async move { service.react(post_id, author, kind).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.reactions.len(), 1);
    }

    #[tokio::test]
    async fn test_conflicts_are_surfaced_then_retried_by_caller() {
        let (service, store) = service();
        let a = user(&service, "a").await;
        let b = user(&service, "b").await;

        store.inject_conflicts(1);
        let err = service.send_friend_request(a, b).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(store.snapshot().await.friend_requests.is_empty());

        store.inject_conflicts(2);
        let request = retry_on_conflict(service.retry_policy(), || {
            service.send_friend_request(a, b)
        })
        .await
        .unwrap();
        assert_eq!(request.sender_id, a);
        assert_eq!(store.snapshot().await.friend_requests.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_accept_leaves_nothing_behind() {
        let (service, store) = service();
        let a = user(&service, "a").await;
        let b = user(&service, "b").await;
        let request = service.send_friend_request(a, b).await.unwrap();

        store.inject_conflicts(1);
        service
            .respond_to_request(request.id, RequestDecision::Accept)
            .await
            .unwrap_err();

        let snapshot = store.snapshot().await;
        assert!(snapshot.friendships.is_empty());
        assert!(snapshot.friend_requests[&request.id].is_pending());
        assert_eq!(snapshot.users[&a].num_followers, 0);

        // The request is still answerable
        let resolution = service
            .respond_to_request(request.id, RequestDecision::Accept)
            .await
            .unwrap();
        assert!(resolution.friendship.is_some());
    }

    #[tokio::test]
    async fn test_share_flow() {
        let (service, _) = service();
        let author = user(&service, "author").await;
        let group = service
            .create_group(CreateGroupRequest {
                name: "readers".to_string(),
            })
            .await
            .unwrap();
        let share = service
            .create_group_post(group.id, author, CreatePostRequest::new("chapter one"))
            .await
            .unwrap();
        service
            .share_to_group(group.id, share.post_id, Some(author))
            .await
            .unwrap();

        let shares = service.list_group_posts(group.id).await.unwrap();
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.post_id == share.post_id));
    }
}
