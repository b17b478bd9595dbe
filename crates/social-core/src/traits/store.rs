//! Transactional store traits (ports)
//!
//! The graph service never talks to a database directly. It opens a
//! [`GraphTransaction`] through a [`GraphStore`], performs its reads and
//! writes on it, and commits. Implementations must give each transaction
//! serializable semantics with respect to the rows it touches, and must
//! discard all writes of a transaction that is dropped without `commit`.
//!
//! Identifiers of inserted rows are chosen by the store.

use async_trait::async_trait;

use crate::entities::{
    FriendRequest, Friendship, Group, GroupPost, NewFriendRequest, NewFriendship, NewGroup,
    NewGroupPost, NewPost, NewReaction, NewUser, Post, Reaction, ReactionCount, User,
};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, UserPair};

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Entry point to a backing store
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Open a new atomic scope
    async fn begin(&self) -> RepoResult<Box<dyn GraphTransaction>>;
}

/// One atomic unit of reads and writes
///
/// Failures surfaced by the isolation layer (serialization failures,
/// deadlocks) are reported as [`DomainError::TransactionConflict`], either
/// from the failing statement or from `commit`.
#[async_trait]
pub trait GraphTransaction: Send {
    // =========================================================================
    // Users, posts and groups
    // =========================================================================

    async fn find_user(&mut self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn insert_user(&mut self, user: NewUser) -> RepoResult<User>;

    /// Add `delta` to both `num_followers` and `num_followings` of each user
    /// in the pair
    async fn adjust_friend_counts(&mut self, pair: UserPair, delta: i32) -> RepoResult<()>;

    async fn find_post(&mut self, id: Snowflake) -> RepoResult<Option<Post>>;

    async fn insert_post(&mut self, post: NewPost) -> RepoResult<Post>;

    async fn find_group(&mut self, id: Snowflake) -> RepoResult<Option<Group>>;

    async fn insert_group(&mut self, group: NewGroup) -> RepoResult<Group>;

    // =========================================================================
    // Friend requests
    // =========================================================================

    async fn find_friend_request(&mut self, id: Snowflake) -> RepoResult<Option<FriendRequest>>;

    /// The pending request connecting the pair in either direction, if any
    async fn find_pending_request(&mut self, pair: UserPair) -> RepoResult<Option<FriendRequest>>;

    async fn insert_friend_request(&mut self, request: NewFriendRequest)
        -> RepoResult<FriendRequest>;

    /// Persist the status and `responded_at` of a request that was pending.
    /// Fails with `AlreadyResolved` if the stored row is no longer pending.
    async fn resolve_friend_request(&mut self, request: &FriendRequest) -> RepoResult<()>;

    /// Pending requests addressed to `receiver_id`, oldest first
    async fn list_pending_requests(&mut self, receiver_id: Snowflake)
        -> RepoResult<Vec<FriendRequest>>;

    // =========================================================================
    // Friendships
    // =========================================================================

    async fn find_friendship(&mut self, pair: UserPair) -> RepoResult<Option<Friendship>>;

    /// Fails with `AlreadyFriends` if the ordered pair already exists
    async fn insert_friendship(&mut self, friendship: NewFriendship) -> RepoResult<Friendship>;

    /// Returns whether a row was removed
    async fn delete_friendship(&mut self, pair: UserPair) -> RepoResult<bool>;

    /// Friendships `user_id` takes part in, oldest first
    async fn list_friendships(&mut self, user_id: Snowflake) -> RepoResult<Vec<Friendship>>;

    // =========================================================================
    // Reactions
    // =========================================================================

    async fn find_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>>;

    /// Insert, or overwrite type and `created_at` of the existing (post, user) row
    async fn upsert_reaction(&mut self, reaction: NewReaction) -> RepoResult<Reaction>;

    /// Returns whether a row was removed
    async fn delete_reaction(&mut self, post_id: Snowflake, user_id: Snowflake)
        -> RepoResult<bool>;

    /// Per-type counts for a post, most frequent first
    async fn count_reactions(&mut self, post_id: Snowflake) -> RepoResult<Vec<ReactionCount>>;

    // =========================================================================
    // Group posts
    // =========================================================================

    async fn insert_group_post(&mut self, share: NewGroupPost) -> RepoResult<GroupPost>;

    /// Shares into a group, oldest first
    async fn list_group_posts(&mut self, group_id: Snowflake) -> RepoResult<Vec<GroupPost>>;

    // =========================================================================
    // Lifecycle
    // =========================================================================

    async fn commit(self: Box<Self>) -> RepoResult<()>;

    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}
