//! Post service

use social_core::entities::NewPost;
use social_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreatePostRequest, PostResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup::{require_post, require_user};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a post; the author must exist
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        user_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        let mut tx = self.ctx.begin().await?;
        require_user(tx.as_mut(), user_id).await?;
        let post = tx
            .insert_post(NewPost {
                user_id,
                content: request.content,
                created_at: self.ctx.now(),
            })
            .await?;
        tx.commit().await?;

        info!(post_id = %post.id, user_id = %user_id, "Post created");

        Ok(PostResponse::from(post))
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let mut tx = self.ctx.begin().await?;
        let post = require_post(tx.as_mut(), post_id).await?;
        tx.commit().await?;

        Ok(PostResponse::from(post))
    }
}
