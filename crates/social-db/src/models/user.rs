//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub user_id: i64,
    pub user_name: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub num_followings: i32,
    pub num_followers: i32,
    pub created_at: DateTime<Utc>,
}
