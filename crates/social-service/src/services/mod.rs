//! Business logic services
//!
//! Each operation opens one transaction on the context's store, validates the
//! intent against what it reads there, writes, and commits. Any error drops
//! the transaction, which discards its writes.

pub mod context;
pub mod error;
pub mod friendship;
pub mod graph;
pub mod group;
mod lookup;
pub mod post;
pub mod reaction;
pub mod retry;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use friendship::FriendshipService;
pub use graph::GraphConsistencyService;
pub use group::GroupService;
pub use post::PostService;
pub use reaction::ReactionService;
pub use retry::{retry_on_conflict, RetryPolicy};
pub use user::UserService;
