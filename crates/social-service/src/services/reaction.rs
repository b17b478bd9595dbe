//! Reaction service
//!
//! A user holds at most one reaction per post. Reacting again replaces the
//! type and timestamp of the existing row instead of adding another.

use social_core::entities::{NewReaction, ReactionType};
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{ReactionCountResponse, ReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup::{require_post, require_user};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set `user_id`'s reaction on `post_id`
    ///
    /// `reaction_type` is matched case-insensitively against the closed set;
    /// anything else fails with `InvalidReactionType` before the store is
    /// touched.
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: &str,
    ) -> ServiceResult<ReactionResponse> {
        let reaction_type: ReactionType = reaction_type.parse()?;

        let mut tx = self.ctx.begin().await?;
        require_post(tx.as_mut(), post_id).await?;
        require_user(tx.as_mut(), user_id).await?;

        let reaction = tx
            .upsert_reaction(NewReaction {
                post_id,
                user_id,
                reaction_type,
                created_at: self.ctx.now(),
            })
            .await?;
        tx.commit().await?;

        info!(
            reaction_id = %reaction.id,
            reaction_type = %reaction.reaction_type,
            "Reaction set"
        );

        Ok(ReactionResponse::from(reaction))
    }

    /// Drop `user_id`'s reaction on `post_id`; returns whether there was one
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<bool> {
        let mut tx = self.ctx.begin().await?;
        require_post(tx.as_mut(), post_id).await?;
        let removed = tx.delete_reaction(post_id, user_id).await?;
        tx.commit().await?;

        if removed {
            info!(post_id = %post_id, user_id = %user_id, "Reaction removed");
        }

        Ok(removed)
    }

    /// Per-type totals for a post, most frequent first
    #[instrument(skip(self))]
    pub async fn reaction_counts(
        &self,
        post_id: Snowflake,
    ) -> ServiceResult<Vec<ReactionCountResponse>> {
        let mut tx = self.ctx.begin().await?;
        require_post(tx.as_mut(), post_id).await?;
        let counts = tx.count_reactions(post_id).await?;
        tx.commit().await?;

        Ok(counts.into_iter().map(ReactionCountResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{create_post, memory_context, sign_up};

    #[tokio::test]
    async fn test_react_then_overwrite() {
        let (ctx, store) = memory_context();
        let author = sign_up(&ctx, "author").await;
        let fan = sign_up(&ctx, "fan").await;
        let post = create_post(&ctx, author.id).await;
        let service = ReactionService::new(&ctx);

        let first = service.react(post.id, fan.id, "love").await.unwrap();
        let second = service.react(post.id, fan.id, "sad").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.reaction_type, ReactionType::Sad);
        assert!(second.created_at > first.created_at);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.reactions.len(), 1);
        assert_eq!(
            snapshot.reactions[&(post.id, fan.id)].reaction_type,
            ReactionType::Sad
        );
    }

    #[tokio::test]
    async fn test_same_reaction_twice_is_idempotent() {
        let (ctx, store) = memory_context();
        let author = sign_up(&ctx, "author").await;
        let post = create_post(&ctx, author.id).await;
        let service = ReactionService::new(&ctx);

        service.react(post.id, author.id, "like").await.unwrap();
        service.react(post.id, author.id, "LIKE").await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.reactions.len(), 1);
        assert_eq!(
            snapshot.reactions[&(post.id, author.id)].reaction_type,
            ReactionType::Like
        );
    }

    #[tokio::test]
    async fn test_invalid_reaction_type() {
        let (ctx, store) = memory_context();
        let author = sign_up(&ctx, "author").await;
        let post = create_post(&ctx, author.id).await;

        let err = ReactionService::new(&ctx)
            .react(post.id, author.id, "meh")
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "INVALID_REACTION_TYPE");
        assert_eq!(err.status_code(), 400);
        assert!(store.snapshot().await.reactions.is_empty());
    }

    #[tokio::test]
    async fn test_post_and_user_must_exist() {
        let (ctx, _) = memory_context();
        let author = sign_up(&ctx, "author").await;
        let post = create_post(&ctx, author.id).await;
        let service = ReactionService::new(&ctx);

        let err = service
            .react(Snowflake::new(1), author.id, "wow")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_POST");

        let err = service
            .react(post.id, Snowflake::new(1), "wow")
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_USER");
    }

    #[tokio::test]
    async fn test_remove_and_count() {
        let (ctx, _) = memory_context();
        let a = sign_up(&ctx, "a").await;
        let b = sign_up(&ctx, "b").await;
        let c = sign_up(&ctx, "c").await;
        let post = create_post(&ctx, a.id).await;
        let service = ReactionService::new(&ctx);

        service.react(post.id, a.id, "haha").await.unwrap();
        service.react(post.id, b.id, "angry").await.unwrap();
        service.react(post.id, c.id, "angry").await.unwrap();

        let counts = service.reaction_counts(post.id).await.unwrap();
        assert_eq!(counts[0].reaction_type, ReactionType::Angry);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].reaction_type, ReactionType::Haha);

        assert!(service.remove_reaction(post.id, b.id).await.unwrap());
        assert!(!service.remove_reaction(post.id, b.id).await.unwrap());

        let counts = service.reaction_counts(post.id).await.unwrap();
        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|c| c.count == 1));
    }
}
