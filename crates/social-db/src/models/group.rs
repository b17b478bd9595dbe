//! Group database model (`chat_groups` table)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub group_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
