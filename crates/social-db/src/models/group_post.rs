//! Group post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct GroupPostModel {
    pub group_post_id: i64,
    pub group_id: i64,
    pub post_id: i64,
    pub shared_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}
