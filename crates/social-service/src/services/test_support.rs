//! Fixtures for service unit tests

use std::sync::Arc;

use social_core::{Snowflake, VirtualClock};
use social_db::MemoryGraphStore;

use crate::dto::{CreatePostRequest, PostResponse, SignUpRequest, UserResponse};

use super::context::ServiceContext;
use super::post::PostService;
use super::user::UserService;

/// Context over a fresh memory store and a virtual clock; the store handle
/// is returned for snapshots
pub(crate) fn memory_context() -> (ServiceContext, MemoryGraphStore) {
    let store = MemoryGraphStore::new();
    let ctx = ServiceContext::new(Arc::new(store.clone()), Arc::new(VirtualClock::default()));
    (ctx, store)
}

pub(crate) async fn sign_up(ctx: &ServiceContext, user_name: &str) -> UserResponse {
    UserService::new(ctx)
        .sign_up(SignUpRequest::new(user_name))
        .await
        .unwrap()
}

pub(crate) async fn create_post(ctx: &ServiceContext, author: Snowflake) -> PostResponse {
    PostService::new(ctx)
        .create_post(author, CreatePostRequest::new("hello graph"))
        .await
        .unwrap()
}
