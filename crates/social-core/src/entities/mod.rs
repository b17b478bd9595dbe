//! Domain entities - core business objects

mod friend_request;
mod friendship;
mod group;
mod group_post;
mod post;
mod reaction;
mod user;

pub use friend_request::{FriendRequest, FriendRequestStatus, NewFriendRequest, RequestDecision};
pub use friendship::{Friendship, NewFriendship};
pub use group::{Group, NewGroup};
pub use group_post::{GroupPost, NewGroupPost};
pub use post::{NewPost, Post};
pub use reaction::{NewReaction, Reaction, ReactionCount, ReactionType};
pub use user::{NewUser, User};
