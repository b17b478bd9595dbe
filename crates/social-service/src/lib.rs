//! # social-service
//!
//! Application layer: every operation that changes the social graph runs
//! here as one store transaction.
//!
//! - [`GraphConsistencyService`]: owned entry point for callers
//! - Per-domain services borrowing a [`ServiceContext`]
//! - Request/response DTOs
//! - [`retry_on_conflict`] for callers retrying `TransactionConflict`

pub mod dto;
pub mod services;

pub use services::{
    retry_on_conflict, FriendshipService, GraphConsistencyService, GroupService, PostService,
    ReactionService, RetryPolicy, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, UserService,
};
