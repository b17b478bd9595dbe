//! GroupPost entity - a post shared into a group
//!
//! Shares are events, not relations: the same post may be shared into the
//! same group any number of times and every share is its own row.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPost {
    pub id: Snowflake,
    pub group_id: Snowflake,
    pub post_id: Snowflake,
    /// `None` when the original poster published directly into the group
    pub shared_by: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl GroupPost {
    #[inline]
    pub fn is_reshare(&self) -> bool {
        self.shared_by.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewGroupPost {
    pub group_id: Snowflake,
    pub post_id: Snowflake,
    pub shared_by: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl NewGroupPost {
    pub fn into_group_post(self, id: Snowflake) -> GroupPost {
        GroupPost {
            id,
            group_id: self.group_id,
            post_id: self.post_id,
            shared_by: self.shared_by,
            created_at: self.created_at,
        }
    }
}
