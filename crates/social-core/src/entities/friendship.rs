//! Friendship entity - undirected edge stored in canonical order

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, UserPair};

/// Friendship between two users, `user_id_1 < user_id_2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub id: Snowflake,
    pub user_id_1: Snowflake,
    pub user_id_2: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    /// Friend of `user_id` on this edge, if `user_id` is part of it
    pub fn friend_of(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.user_id_1 {
            Some(self.user_id_2)
        } else if user_id == self.user_id_2 {
            Some(self.user_id_1)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewFriendship {
    pub pair: UserPair,
    pub created_at: DateTime<Utc>,
}

impl NewFriendship {
    pub fn into_friendship(self, id: Snowflake) -> Friendship {
        Friendship {
            id,
            user_id_1: self.pair.low(),
            user_id_2: self.pair.high(),
            created_at: self.created_at,
        }
    }
}
