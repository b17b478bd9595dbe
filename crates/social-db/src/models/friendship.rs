//! Friendship database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct FriendshipModel {
    pub friendship_id: i64,
    pub user_id_1: i64,
    pub user_id_2: i64,
    pub created_at: DateTime<Utc>,
}
