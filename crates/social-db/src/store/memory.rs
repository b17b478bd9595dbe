//! In-process implementation of GraphStore
//!
//! Transactions are fully serial: `begin` takes an owned lock on the
//! committed state and works on a private copy of it, `commit` publishes the
//! copy. Dropping a transaction releases the lock and discards the copy.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument, warn};

use social_core::entities::{
    FriendRequest, FriendRequestStatus, Friendship, Group, GroupPost, NewFriendRequest,
    NewFriendship, NewGroup, NewGroupPost, NewPost, NewReaction, NewUser, Post, Reaction,
    ReactionCount, User,
};
use social_core::error::DomainError;
use social_core::traits::{GraphStore, GraphTransaction, RepoResult};
use social_core::value_objects::{Snowflake, SnowflakeGenerator, UserPair};

/// Committed contents of a [`MemoryGraphStore`]
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    pub users: BTreeMap<Snowflake, User>,
    pub posts: BTreeMap<Snowflake, Post>,
    pub groups: BTreeMap<Snowflake, Group>,
    pub friend_requests: BTreeMap<Snowflake, FriendRequest>,
    pub friendships: BTreeMap<UserPair, Friendship>,
    /// Keyed by (post, user)
    pub reactions: BTreeMap<(Snowflake, Snowflake), Reaction>,
    pub group_posts: BTreeMap<Snowflake, GroupPost>,
}

impl MemorySnapshot {
    /// Pending requests per unordered pair
    pub fn pending_count(&self, pair: &UserPair) -> usize {
        self.friend_requests
            .values()
            .filter(|r| r.is_pending() && r.connects(pair))
            .count()
    }

    /// Number of friendships `user_id` takes part in
    pub fn degree(&self, user_id: Snowflake) -> usize {
        self.friendships
            .keys()
            .filter(|pair| pair.contains(user_id))
            .count()
    }
}

/// In-memory graph store
#[derive(Clone)]
pub struct MemoryGraphStore {
    state: Arc<Mutex<MemorySnapshot>>,
    ids: Arc<SnowflakeGenerator>,
    injected_conflicts: Arc<AtomicU32>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::with_worker_id(0)
    }

    pub fn with_worker_id(worker_id: u16) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemorySnapshot::default())),
            ids: Arc::new(SnowflakeGenerator::new(worker_id)),
            injected_conflicts: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Make the next `n` commits fail with `TransactionConflict`
    ///
    /// Stands in for serialization failures a database would report.
    pub fn inject_conflicts(&self, n: u32) {
        self.injected_conflicts.fetch_add(n, Ordering::AcqRel);
    }

    /// Copy of the committed state; waits for any open transaction to finish
    pub async fn snapshot(&self) -> MemorySnapshot {
        self.state.lock().await.clone()
    }
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn begin(&self) -> RepoResult<Box<dyn GraphTransaction>> {
        let committed = Arc::clone(&self.state).lock_owned().await;
        let staged = committed.clone();

        Ok(Box::new(MemoryGraphTx {
            committed,
            staged,
            ids: Arc::clone(&self.ids),
            injected_conflicts: Arc::clone(&self.injected_conflicts),
        }))
    }
}

/// One serial transaction over a [`MemoryGraphStore`]
pub struct MemoryGraphTx {
    committed: OwnedMutexGuard<MemorySnapshot>,
    staged: MemorySnapshot,
    ids: Arc<SnowflakeGenerator>,
    injected_conflicts: Arc<AtomicU32>,
}

impl MemoryGraphTx {
    fn user_mut(&mut self, id: Snowflake) -> RepoResult<&mut User> {
        self.staged
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))
    }

    fn take_injected_conflict(&self) -> bool {
        self.injected_conflicts
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }
}

fn oldest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by_key(key);
    rows
}

#[async_trait]
impl GraphTransaction for MemoryGraphTx {
    // =========================================================================
    // Users, posts and groups
    // =========================================================================

    async fn find_user(&mut self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.staged.users.get(&id).cloned())
    }

    async fn insert_user(&mut self, user: NewUser) -> RepoResult<User> {
        let user = user.into_user(self.ids.generate());
        self.staged.users.insert(user.id, user.clone());
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn adjust_friend_counts(&mut self, pair: UserPair, delta: i32) -> RepoResult<()> {
        // Check both before touching either so a failure leaves no half update
        if !self.staged.users.contains_key(&pair.high()) {
            return Err(DomainError::UserNotFound(pair.high()));
        }
        self.user_mut(pair.low())?.adjust_friend_counts(delta);
        self.user_mut(pair.high())?.adjust_friend_counts(delta);
        Ok(())
    }

    async fn find_post(&mut self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.staged.posts.get(&id).cloned())
    }

    async fn insert_post(&mut self, post: NewPost) -> RepoResult<Post> {
        if !self.staged.users.contains_key(&post.user_id) {
            return Err(DomainError::UserNotFound(post.user_id));
        }
        let post = post.into_post(self.ids.generate());
        self.staged.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_group(&mut self, id: Snowflake) -> RepoResult<Option<Group>> {
        Ok(self.staged.groups.get(&id).cloned())
    }

    async fn insert_group(&mut self, group: NewGroup) -> RepoResult<Group> {
        let group = group.into_group(self.ids.generate());
        self.staged.groups.insert(group.id, group.clone());
        Ok(group)
    }

    // =========================================================================
    // Friend requests
    // =========================================================================

    async fn find_friend_request(&mut self, id: Snowflake) -> RepoResult<Option<FriendRequest>> {
        Ok(self.staged.friend_requests.get(&id).cloned())
    }

    async fn find_pending_request(&mut self, pair: UserPair) -> RepoResult<Option<FriendRequest>> {
        Ok(self
            .staged
            .friend_requests
            .values()
            .find(|r| r.is_pending() && r.connects(&pair))
            .cloned())
    }

    #[instrument(skip(self, request), fields(sender_id = %request.sender_id, receiver_id = %request.receiver_id))]
    async fn insert_friend_request(
        &mut self,
        request: NewFriendRequest,
    ) -> RepoResult<FriendRequest> {
        let pair = UserPair::new(request.sender_id, request.receiver_id)?;
        for id in [request.sender_id, request.receiver_id] {
            if !self.staged.users.contains_key(&id) {
                return Err(DomainError::UserNotFound(id));
            }
        }
        // Same guarantee as the partial unique index in PostgreSQL
        if self.staged.pending_count(&pair) > 0 {
            return Err(DomainError::DuplicatePending(
                request.sender_id,
                request.receiver_id,
            ));
        }

        let request = request.into_request(self.ids.generate());
        self.staged
            .friend_requests
            .insert(request.id, request.clone());
        Ok(request)
    }

    #[instrument(skip(self, request), fields(request_id = %request.id))]
    async fn resolve_friend_request(&mut self, request: &FriendRequest) -> RepoResult<()> {
        let stored = self
            .staged
            .friend_requests
            .get_mut(&request.id)
            .ok_or(DomainError::FriendRequestNotFound(request.id))?;

        if stored.status != FriendRequestStatus::Pending {
            return Err(DomainError::AlreadyResolved(request.id));
        }
        stored.status = request.status;
        stored.responded_at = request.responded_at;
        Ok(())
    }

    async fn list_pending_requests(
        &mut self,
        receiver_id: Snowflake,
    ) -> RepoResult<Vec<FriendRequest>> {
        let rows = self
            .staged
            .friend_requests
            .values()
            .filter(|r| r.is_pending() && r.receiver_id == receiver_id)
            .cloned()
            .collect();
        Ok(oldest_first(rows, |r: &FriendRequest| (r.created_at, r.id)))
    }

    // =========================================================================
    // Friendships
    // =========================================================================

    async fn find_friendship(&mut self, pair: UserPair) -> RepoResult<Option<Friendship>> {
        Ok(self.staged.friendships.get(&pair).cloned())
    }

    #[instrument(skip(self, friendship), fields(pair = %friendship.pair))]
    async fn insert_friendship(&mut self, friendship: NewFriendship) -> RepoResult<Friendship> {
        let pair = friendship.pair;
        if self.staged.friendships.contains_key(&pair) {
            return Err(DomainError::AlreadyFriends(pair.low(), pair.high()));
        }

        let friendship = friendship.into_friendship(self.ids.generate());
        self.staged.friendships.insert(pair, friendship.clone());
        Ok(friendship)
    }

    async fn delete_friendship(&mut self, pair: UserPair) -> RepoResult<bool> {
        Ok(self.staged.friendships.remove(&pair).is_some())
    }

    async fn list_friendships(&mut self, user_id: Snowflake) -> RepoResult<Vec<Friendship>> {
        let rows = self
            .staged
            .friendships
            .iter()
            .filter(|(pair, _)| pair.contains(user_id))
            .map(|(_, f)| f.clone())
            .collect();
        Ok(oldest_first(rows, |f: &Friendship| (f.created_at, f.id)))
    }

    // =========================================================================
    // Reactions
    // =========================================================================

    async fn find_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self.staged.reactions.get(&(post_id, user_id)).cloned())
    }

    #[instrument(skip(self, reaction), fields(post_id = %reaction.post_id, user_id = %reaction.user_id))]
    async fn upsert_reaction(&mut self, reaction: NewReaction) -> RepoResult<Reaction> {
        if !self.staged.posts.contains_key(&reaction.post_id) {
            return Err(DomainError::PostNotFound(reaction.post_id));
        }

        let key = (reaction.post_id, reaction.user_id);
        let row = match self.staged.reactions.get_mut(&key) {
            Some(existing) => {
                existing.reaction_type = reaction.reaction_type;
                existing.created_at = reaction.created_at;
                debug!(reaction_id = %existing.id, "Reaction replaced");
                existing.clone()
            }
            None => {
                let row = reaction.into_reaction(self.ids.generate());
                self.staged.reactions.insert(key, row.clone());
                row
            }
        };
        Ok(row)
    }

    async fn delete_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        Ok(self.staged.reactions.remove(&(post_id, user_id)).is_some())
    }

    async fn count_reactions(&mut self, post_id: Snowflake) -> RepoResult<Vec<ReactionCount>> {
        let mut counts = BTreeMap::new();
        for reaction in self.staged.reactions.values().filter(|r| r.post_id == post_id) {
            *counts.entry(reaction.reaction_type).or_insert(0_i64) += 1;
        }

        let mut counts: Vec<ReactionCount> = counts
            .into_iter()
            .map(|(reaction_type, count)| ReactionCount {
                reaction_type,
                count,
            })
            .collect();
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.reaction_type.as_str().cmp(b.reaction_type.as_str()))
        });
        Ok(counts)
    }

    // =========================================================================
    // Group posts
    // =========================================================================

    async fn insert_group_post(&mut self, share: NewGroupPost) -> RepoResult<GroupPost> {
        if !self.staged.groups.contains_key(&share.group_id) {
            return Err(DomainError::GroupNotFound(share.group_id));
        }
        if !self.staged.posts.contains_key(&share.post_id) {
            return Err(DomainError::PostNotFound(share.post_id));
        }

        let share = share.into_group_post(self.ids.generate());
        self.staged.group_posts.insert(share.id, share.clone());
        Ok(share)
    }

    async fn list_group_posts(&mut self, group_id: Snowflake) -> RepoResult<Vec<GroupPost>> {
        let rows = self
            .staged
            .group_posts
            .values()
            .filter(|g| g.group_id == group_id)
            .cloned()
            .collect();
        Ok(oldest_first(rows, |g: &GroupPost| (g.created_at, g.id)))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        if self.take_injected_conflict() {
            warn!("Injected conflict, discarding transaction");
            return Err(DomainError::TransactionConflict);
        }

        let MemoryGraphTx {
            mut committed,
            staged,
            ..
        } = *self;
        *committed = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        Ok(())
    }
}
