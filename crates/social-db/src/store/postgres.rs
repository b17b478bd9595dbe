//! PostgreSQL implementation of GraphStore
//!
//! Every transaction runs at `SERIALIZABLE`. Conflicts the database detects
//! surface as `TransactionConflict`; the unique indexes on `friendships` and
//! pending `friend_requests` back up the checks the service performs.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use social_core::entities::{
    FriendRequest, Friendship, Group, GroupPost, NewFriendRequest, NewFriendship, NewGroup,
    NewGroupPost, NewPost, NewReaction, NewUser, Post, Reaction, ReactionCount, User,
};
use social_core::error::DomainError;
use social_core::traits::{GraphStore, GraphTransaction, RepoResult};
use social_core::value_objects::{Snowflake, SnowflakeGenerator, UserPair};

use crate::models::{
    FriendRequestModel, FriendshipModel, GroupModel, GroupPostModel, PostModel,
    ReactionCountModel, ReactionModel, UserModel,
};

use super::error::{map_db_error, map_unique_violation};

const FRIENDSHIPS_PAIR_KEY: &str = "friendships_pair_key";
const ONE_PENDING_REQUEST: &str = "friend_requests_one_pending";

/// PostgreSQL implementation of GraphStore
#[derive(Clone)]
pub struct PgGraphStore {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgGraphStore {
    /// Create a store; `worker_id` must be unique among writers sharing the database
    pub fn new(pool: PgPool, worker_id: u16) -> Self {
        Self {
            pool,
            ids: Arc::new(SnowflakeGenerator::new(worker_id)),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl GraphStore for PgGraphStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn GraphTransaction>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        Ok(Box::new(PgGraphTx {
            tx,
            ids: Arc::clone(&self.ids),
        }))
    }
}

/// One serializable transaction
pub struct PgGraphTx {
    tx: Transaction<'static, Postgres>,
    ids: Arc<SnowflakeGenerator>,
}

#[async_trait]
impl GraphTransaction for PgGraphTx {
    // =========================================================================
    // Users, posts and groups
    // =========================================================================

    #[instrument(skip(self))]
    async fn find_user(&mut self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT user_id, user_name, name, bio, num_followings, num_followers, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_name = %user.user_name))]
    async fn insert_user(&mut self, user: NewUser) -> RepoResult<User> {
        let user = user.into_user(self.ids.generate());

        sqlx::query(
            r#"
            INSERT INTO users (user_id, user_name, name, bio, num_followings, num_followers, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.into_inner())
        .bind(&user.user_name)
        .bind(&user.name)
        .bind(&user.bio)
        .bind(user.num_followings)
        .bind(user.num_followers)
        .bind(user.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn adjust_friend_counts(&mut self, pair: UserPair, delta: i32) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET num_followers = GREATEST(num_followers + $3, 0),
                num_followings = GREATEST(num_followings + $3, 0)
            WHERE user_id IN ($1, $2)
            "#,
        )
        .bind(pair.low().into_inner())
        .bind(pair.high().into_inner())
        .bind(delta)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() != 2 {
            return Err(DomainError::InternalError(format!(
                "friend counters of {pair} touched {} rows",
                result.rows_affected()
            )));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_post(&mut self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT post_id, user_id, content, created_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post), fields(user_id = %post.user_id))]
    async fn insert_post(&mut self, post: NewPost) -> RepoResult<Post> {
        let post = post.into_post(self.ids.generate());

        sqlx::query(
            r#"
            INSERT INTO posts (post_id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.user_id.into_inner())
        .bind(&post.content)
        .bind(post.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn find_group(&mut self, id: Snowflake) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r#"
            SELECT group_id, name, created_at
            FROM chat_groups
            WHERE group_id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self, group), fields(name = %group.name))]
    async fn insert_group(&mut self, group: NewGroup) -> RepoResult<Group> {
        let group = group.into_group(self.ids.generate());

        sqlx::query(
            r#"
            INSERT INTO chat_groups (group_id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(group.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(group)
    }

    // =========================================================================
    // Friend requests
    // =========================================================================

    #[instrument(skip(self))]
    async fn find_friend_request(&mut self, id: Snowflake) -> RepoResult<Option<FriendRequest>> {
        let result = sqlx::query_as::<_, FriendRequestModel>(
            r#"
            SELECT request_id, sender_id, receiver_id, status, created_at, responded_at
            FROM friend_requests
            WHERE request_id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        result.map(FriendRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending_request(&mut self, pair: UserPair) -> RepoResult<Option<FriendRequest>> {
        let result = sqlx::query_as::<_, FriendRequestModel>(
            r#"
            SELECT request_id, sender_id, receiver_id, status, created_at, responded_at
            FROM friend_requests
            WHERE LEAST(sender_id, receiver_id) = $1
              AND GREATEST(sender_id, receiver_id) = $2
              AND status = 'pending'
            "#,
        )
        .bind(pair.low().into_inner())
        .bind(pair.high().into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        result.map(FriendRequest::try_from).transpose()
    }

    #[instrument(skip(self, request), fields(sender_id = %request.sender_id, receiver_id = %request.receiver_id))]
    async fn insert_friend_request(
        &mut self,
        request: NewFriendRequest,
    ) -> RepoResult<FriendRequest> {
        let request = request.into_request(self.ids.generate());

        sqlx::query(
            r#"
            INSERT INTO friend_requests (request_id, sender_id, receiver_id, status, created_at, responded_at)
            VALUES ($1, $2, $3, $4, $5, NULL)
            "#,
        )
        .bind(request.id.into_inner())
        .bind(request.sender_id.into_inner())
        .bind(request.receiver_id.into_inner())
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, ONE_PENDING_REQUEST, || {
                DomainError::DuplicatePending(request.sender_id, request.receiver_id)
            })
        })?;

        Ok(request)
    }

    #[instrument(skip(self, request), fields(request_id = %request.id, status = %request.status))]
    async fn resolve_friend_request(&mut self, request: &FriendRequest) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE friend_requests
            SET status = $2, responded_at = $3
            WHERE request_id = $1 AND status = 'pending'
            "#,
        )
        .bind(request.id.into_inner())
        .bind(request.status.as_str())
        .bind(request.responded_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyResolved(request.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_pending_requests(
        &mut self,
        receiver_id: Snowflake,
    ) -> RepoResult<Vec<FriendRequest>> {
        let results = sqlx::query_as::<_, FriendRequestModel>(
            r#"
            SELECT request_id, sender_id, receiver_id, status, created_at, responded_at
            FROM friend_requests
            WHERE receiver_id = $1 AND status = 'pending'
            ORDER BY created_at, request_id
            "#,
        )
        .bind(receiver_id.into_inner())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(FriendRequest::try_from).collect()
    }

    // =========================================================================
    // Friendships
    // =========================================================================

    #[instrument(skip(self))]
    async fn find_friendship(&mut self, pair: UserPair) -> RepoResult<Option<Friendship>> {
        let result = sqlx::query_as::<_, FriendshipModel>(
            r#"
            SELECT friendship_id, user_id_1, user_id_2, created_at
            FROM friendships
            WHERE user_id_1 = $1 AND user_id_2 = $2
            "#,
        )
        .bind(pair.low().into_inner())
        .bind(pair.high().into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Friendship::from))
    }

    #[instrument(skip(self, friendship), fields(pair = %friendship.pair))]
    async fn insert_friendship(&mut self, friendship: NewFriendship) -> RepoResult<Friendship> {
        let pair = friendship.pair;
        let friendship = friendship.into_friendship(self.ids.generate());

        sqlx::query(
            r#"
            INSERT INTO friendships (friendship_id, user_id_1, user_id_2, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(friendship.id.into_inner())
        .bind(friendship.user_id_1.into_inner())
        .bind(friendship.user_id_2.into_inner())
        .bind(friendship.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, FRIENDSHIPS_PAIR_KEY, || {
                DomainError::AlreadyFriends(pair.low(), pair.high())
            })
        })?;

        Ok(friendship)
    }

    #[instrument(skip(self))]
    async fn delete_friendship(&mut self, pair: UserPair) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM friendships WHERE user_id_1 = $1 AND user_id_2 = $2
            "#,
        )
        .bind(pair.low().into_inner())
        .bind(pair.high().into_inner())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_friendships(&mut self, user_id: Snowflake) -> RepoResult<Vec<Friendship>> {
        let results = sqlx::query_as::<_, FriendshipModel>(
            r#"
            SELECT friendship_id, user_id_1, user_id_2, created_at
            FROM friendships
            WHERE user_id_1 = $1 OR user_id_2 = $1
            ORDER BY created_at, friendship_id
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Friendship::from).collect())
    }

    // =========================================================================
    // Reactions
    // =========================================================================

    #[instrument(skip(self))]
    async fn find_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT reaction_id, post_id, user_id, reaction_type, created_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, reaction), fields(post_id = %reaction.post_id, user_id = %reaction.user_id))]
    async fn upsert_reaction(&mut self, reaction: NewReaction) -> RepoResult<Reaction> {
        let candidate = self.ids.generate();

        // The existing row keeps its reaction_id
        let model = sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO reactions (reaction_id, post_id, user_id, reaction_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (post_id, user_id) DO UPDATE
            SET reaction_type = EXCLUDED.reaction_type,
                created_at = EXCLUDED.created_at
            RETURNING reaction_id, post_id, user_id, reaction_type, created_at
            "#,
        )
        .bind(candidate.into_inner())
        .bind(reaction.post_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(reaction.reaction_type.as_str())
        .bind(reaction.created_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        debug!(
            reaction_id = model.reaction_id,
            replaced = model.reaction_id != candidate.into_inner(),
            "Reaction upserted"
        );

        Reaction::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_reactions(&mut self, post_id: Snowflake) -> RepoResult<Vec<ReactionCount>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE post_id = $1
            GROUP BY reaction_type
            ORDER BY count DESC, reaction_type
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ReactionCount::try_from).collect()
    }

    // =========================================================================
    // Group posts
    // =========================================================================

    #[instrument(skip(self, share), fields(group_id = %share.group_id, post_id = %share.post_id))]
    async fn insert_group_post(&mut self, share: NewGroupPost) -> RepoResult<GroupPost> {
        let share = share.into_group_post(self.ids.generate());

        sqlx::query(
            r#"
            INSERT INTO group_posts (group_post_id, group_id, post_id, shared_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(share.id.into_inner())
        .bind(share.group_id.into_inner())
        .bind(share.post_id.into_inner())
        .bind(share.shared_by.map(Snowflake::into_inner))
        .bind(share.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(share)
    }

    #[instrument(skip(self))]
    async fn list_group_posts(&mut self, group_id: Snowflake) -> RepoResult<Vec<GroupPost>> {
        let results = sqlx::query_as::<_, GroupPostModel>(
            r#"
            SELECT group_post_id, group_id, post_id, shared_by, created_at
            FROM group_posts
            WHERE group_id = $1
            ORDER BY created_at, group_post_id
            "#,
        )
        .bind(group_id.into_inner())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(GroupPost::from).collect())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        self.tx.rollback().await.map_err(map_db_error)
    }
}
