//! User service
//!
//! Handles sign-up and profile lookups.

use social_core::entities::NewUser;
use social_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{SignUpRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup::require_user;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a user with both friend counters at zero
    #[instrument(skip(self, request), fields(user_name = %request.user_name))]
    pub async fn sign_up(&self, request: SignUpRequest) -> ServiceResult<UserResponse> {
        request.validate()?;

        let mut tx = self.ctx.begin().await?;
        let user = tx
            .insert_user(NewUser {
                user_name: request.user_name,
                name: request.name,
                bio: request.bio,
                created_at: self.ctx.now(),
            })
            .await?;
        tx.commit().await?;

        info!(user_id = %user.id, "User signed up");

        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let mut tx = self.ctx.begin().await?;
        let user = require_user(tx.as_mut(), user_id).await?;
        tx.commit().await?;

        Ok(UserResponse::from(user))
    }
}
