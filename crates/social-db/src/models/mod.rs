//! Database models - SQLx-compatible structs for PostgreSQL tables

mod friend_request;
mod friendship;
mod group;
mod group_post;
mod post;
mod reaction;
mod user;

pub use friend_request::FriendRequestModel;
pub use friendship::FriendshipModel;
pub use group::GroupModel;
pub use group_post::GroupPostModel;
pub use post::PostModel;
pub use reaction::{ReactionCountModel, ReactionModel};
pub use user::UserModel;
