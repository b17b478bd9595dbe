//! Group service
//!
//! Shares are events: the same post can be shared into the same group any
//! number of times, and each share is a separate row.

use social_core::entities::{NewGroup, NewGroupPost, NewPost};
use social_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateGroupRequest, CreatePostRequest, GroupPostResponse, GroupResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup::{require_group, require_post, require_user};

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_group(&self, request: CreateGroupRequest) -> ServiceResult<GroupResponse> {
        request.validate()?;

        let mut tx = self.ctx.begin().await?;
        let group = tx
            .insert_group(NewGroup {
                name: request.name,
                created_at: self.ctx.now(),
            })
            .await?;
        tx.commit().await?;

        info!(group_id = %group.id, "Group created");

        Ok(GroupResponse::from(group))
    }

    /// Record a share of `post_id` into `group_id`
    ///
    /// `shared_by` is `None` when the original poster is publishing; when
    /// set, that user must exist.
    #[instrument(skip(self))]
    pub async fn share_to_group(
        &self,
        group_id: Snowflake,
        post_id: Snowflake,
        shared_by: Option<Snowflake>,
    ) -> ServiceResult<GroupPostResponse> {
        let mut tx = self.ctx.begin().await?;
        require_group(tx.as_mut(), group_id).await?;
        require_post(tx.as_mut(), post_id).await?;
        if let Some(user_id) = shared_by {
            require_user(tx.as_mut(), user_id).await?;
        }

        let share = tx
            .insert_group_post(NewGroupPost {
                group_id,
                post_id,
                shared_by,
                created_at: self.ctx.now(),
            })
            .await?;
        tx.commit().await?;

        info!(group_post_id = %share.id, reshare = share.is_reshare(), "Post shared to group");

        Ok(GroupPostResponse::from(share))
    }

    /// Write a new post straight into a group
    ///
    /// The post and its share are created in one transaction; the share has
    /// no `shared_by` because the author is the original poster.
    #[instrument(skip(self, request))]
    pub async fn create_group_post(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<GroupPostResponse> {
        request.validate()?;

        let mut tx = self.ctx.begin().await?;
        require_group(tx.as_mut(), group_id).await?;
        require_user(tx.as_mut(), user_id).await?;

        let now = self.ctx.now();
        let post = tx
            .insert_post(NewPost {
                user_id,
                content: request.content,
                created_at: now,
            })
            .await?;
        let share = tx
            .insert_group_post(NewGroupPost {
                group_id,
                post_id: post.id,
                shared_by: None,
                created_at: now,
            })
            .await?;
        tx.commit().await?;

        info!(group_post_id = %share.id, post_id = %post.id, "Group post created");

        Ok(GroupPostResponse::from(share))
    }

    /// Every share into `group_id`, oldest first
    #[instrument(skip(self))]
    pub async fn list_group_posts(
        &self,
        group_id: Snowflake,
    ) -> ServiceResult<Vec<GroupPostResponse>> {
        let mut tx = self.ctx.begin().await?;
        require_group(tx.as_mut(), group_id).await?;
        let shares = tx.list_group_posts(group_id).await?;
        tx.commit().await?;

        Ok(shares.iter().map(GroupPostResponse::from).collect())
    }
}
