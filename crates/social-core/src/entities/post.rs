//! Post entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn into_post(self, id: Snowflake) -> Post {
        Post {
            id,
            user_id: self.user_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}
