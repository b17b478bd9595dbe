//! Friend request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for friend_requests table
#[derive(Debug, Clone, FromRow)]
pub struct FriendRequestModel {
    pub request_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    /// 'pending' | 'accepted' | 'rejected'
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}
