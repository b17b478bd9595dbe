//! # social-core
//!
//! Domain layer for the social graph: entities, value objects, the clock
//! abstraction, domain errors, and the transactional store traits.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod clock;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use clock::{Clock, SystemClock, VirtualClock};
pub use entities::{
    FriendRequest, FriendRequestStatus, Friendship, Group, GroupPost, NewFriendRequest,
    NewFriendship, NewGroup, NewGroupPost, NewPost, NewReaction, NewUser, Post, Reaction,
    ReactionCount, ReactionType, RequestDecision, User,
};
pub use error::DomainError;
pub use traits::{GraphStore, GraphTransaction, RepoResult};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError, UserPair};
