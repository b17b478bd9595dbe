//! Group entity (`chat_groups` table)

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl NewGroup {
    pub fn into_group(self, id: Snowflake) -> Group {
        Group {
            id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}
