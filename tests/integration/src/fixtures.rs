//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use social_core::Snowflake;
use social_service::dto::{CreateGroupRequest, CreatePostRequest, SignUpRequest};
use social_service::GraphConsistencyService;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub fn sign_up_request() -> SignUpRequest {
    let suffix = unique_suffix();
    SignUpRequest {
        user_name: format!("testuser{suffix}"),
        name: Some(format!("Test User {suffix}")),
        bio: None,
    }
}

pub fn group_request() -> CreateGroupRequest {
    CreateGroupRequest {
        name: format!("Test Group {}", unique_suffix()),
    }
}

pub fn post_request() -> CreatePostRequest {
    CreatePostRequest::new(format!("post number {}", unique_suffix()))
}

/// Sign up `n` users and return their IDs in creation order
pub async fn sign_up_users(service: &GraphConsistencyService, n: usize) -> anyhow::Result<Vec<Snowflake>> {
    let mut ids = Vec::with_capacity(n);
    for _ in 0..n {
        ids.push(service.sign_up(sign_up_request()).await?.id);
    }
    Ok(ids)
}
