//! Data transfer objects for service inputs and outputs
//!
//! This module provides:
//! - Request DTOs with validation
//! - Response DTOs for serializing results
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateGroupRequest, CreatePostRequest, RespondToRequestRequest, SignUpRequest};

pub use responses::{
    FriendRequestResponse, FriendshipResponse, GroupPostResponse, GroupResponse, PostResponse,
    ReactionCountResponse, ReactionResponse, RequestResolutionResponse, UserResponse,
};
