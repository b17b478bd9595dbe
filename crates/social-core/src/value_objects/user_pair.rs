//! Canonical unordered pair of users
//!
//! Friend requests and friendships are looked up by the unordered pair
//! {a, b}. Every read or write touching those tables goes through `UserPair`,
//! which stores the identifiers sorted so `(a, b)` and `(b, a)` compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserPair {
    low: Snowflake,
    high: Snowflake,
}

impl UserPair {
    /// Canonicalize two distinct users into a pair
    pub fn new(a: Snowflake, b: Snowflake) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::SelfRelation(a));
        }
        Ok(if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        })
    }

    /// Smaller identifier (`user_id_1` in storage)
    #[inline]
    pub fn low(&self) -> Snowflake {
        self.low
    }

    /// Larger identifier (`user_id_2` in storage)
    #[inline]
    pub fn high(&self) -> Snowflake {
        self.high
    }

    #[inline]
    pub fn contains(&self, user_id: Snowflake) -> bool {
        self.low == user_id || self.high == user_id
    }

    /// The member of the pair that is not `user_id`
    pub fn other(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.low {
            Some(self.high)
        } else if user_id == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for UserPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}
