//! User entity - identity anchor of the social graph

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User account with denormalized relationship counters
///
/// `num_followers` and `num_followings` always equal the number of
/// friendships the user takes part in. Only the graph service mutates them,
/// inside the same transaction as the friendship change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub user_name: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub num_followings: i32,
    pub num_followers: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Apply a friendship delta (+1 on accept, -1 on unfriend) to both counters
    pub fn adjust_friend_counts(&mut self, delta: i32) {
        self.num_followers = (self.num_followers + delta).max(0);
        self.num_followings = (self.num_followings + delta).max(0);
    }

    /// Name to show in feeds, falling back to the handle
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.user_name)
    }
}

/// Values for a user row; the store assigns the ID
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Materialize the row once the store has chosen an ID
    pub fn into_user(self, id: Snowflake) -> User {
        User {
            id,
            user_name: self.user_name,
            name: self.name,
            bio: self.bio,
            num_followings: 0,
            num_followers: 0,
            created_at: self.created_at,
        }
    }
}
