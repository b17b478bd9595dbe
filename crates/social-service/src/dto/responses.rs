//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs serialize as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use social_core::{FriendRequestStatus, ReactionType, Snowflake};

// ============================================================================
// User / Post / Group Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub user_name: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub num_followings: i32,
    pub num_followers: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One share of a post into a group
#[derive(Debug, Clone, Serialize)]
pub struct GroupPostResponse {
    pub id: Snowflake,
    pub group_id: Snowflake,
    pub post_id: Snowflake,
    /// Absent when the author published into the group directly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_by: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Friendship Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestResponse {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendshipResponse {
    pub id: Snowflake,
    pub user_id_1: Snowflake,
    pub user_id_2: Snowflake,
    pub created_at: DateTime<Utc>,
}

/// Outcome of answering a friend request
#[derive(Debug, Clone, Serialize)]
pub struct RequestResolutionResponse {
    pub request: FriendRequestResponse,
    /// Present when the request was accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendship: Option<FriendshipResponse>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReactionCountResponse {
    pub reaction_type: ReactionType,
    pub count: i64,
}
