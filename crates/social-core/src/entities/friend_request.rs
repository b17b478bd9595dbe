//! FriendRequest entity and its lifecycle
//!
//! ```text
//! pending --accept--> accepted (terminal)
//! pending --reject--> rejected (terminal)
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Snowflake, UserPair};

/// Status of a friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for FriendRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FriendRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InternalError(format!(
                "unknown friend request status: {other}"
            ))),
        }
    }
}

/// Receiver's answer to a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accept,
    Reject,
}

impl RequestDecision {
    /// Status the request moves to under this decision
    pub fn target_status(self) -> FriendRequestStatus {
        match self {
            Self::Accept => FriendRequestStatus::Accepted,
            Self::Reject => FriendRequestStatus::Rejected,
        }
    }
}

/// Directed proposal `sender_id -> receiver_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRequest {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl FriendRequest {
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == FriendRequestStatus::Pending
    }

    /// Whether this request connects the unordered pair, in either direction
    pub fn connects(&self, pair: &UserPair) -> bool {
        pair.contains(self.sender_id) && pair.contains(self.receiver_id)
    }

    /// Canonical pair of the two participants
    pub fn pair(&self) -> Result<UserPair, DomainError> {
        UserPair::new(self.sender_id, self.receiver_id)
    }

    /// Apply the receiver's decision
    ///
    /// Only a pending request can be resolved; any later call fails with
    /// `AlreadyResolved` and leaves the request untouched.
    pub fn resolve(
        &mut self,
        decision: RequestDecision,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::AlreadyResolved(self.id));
        }
        self.status = decision.target_status();
        self.responded_at = Some(at);
        Ok(())
    }
}

/// Values for a new pending request
#[derive(Debug, Clone)]
pub struct NewFriendRequest {
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl NewFriendRequest {
    pub fn into_request(self, id: Snowflake) -> FriendRequest {
        FriendRequest {
            id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            status: FriendRequestStatus::Pending,
            created_at: self.created_at,
            responded_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(sender: i64, receiver: i64) -> FriendRequest {
        NewFriendRequest {
            sender_id: Snowflake::new(sender),
            receiver_id: Snowflake::new(receiver),
            created_at: Utc::now(),
        }
        .into_request(Snowflake::new(100))
    }

    #[test]
    fn test_new_request_is_pending() {
        let req = pending(1, 2);
        assert!(req.is_pending());
        assert!(req.responded_at.is_none());
    }

    #[test]
    fn test_accept_sets_status_and_timestamp() {
        let mut req = pending(1, 2);
        let now = Utc::now();
        req.resolve(RequestDecision::Accept, now).unwrap();
        assert_eq!(req.status, FriendRequestStatus::Accepted);
        assert_eq!(req.responded_at, Some(now));
    }

    #[test]
    fn test_terminal_states_reject_further_transitions() {
        let mut req = pending(1, 2);
        req.resolve(RequestDecision::Reject, Utc::now()).unwrap();
        let first_response = req.responded_at;

        let err = req.resolve(RequestDecision::Accept, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyResolved(id) if id == Snowflake::new(100)));
        assert_eq!(req.status, FriendRequestStatus::Rejected);
        assert_eq!(req.responded_at, first_response);
    }

    #[test]
    fn test_connects_either_direction() {
        let req = pending(5, 3);
        let pair = UserPair::new(Snowflake::new(3), Snowflake::new(5)).unwrap();
        assert!(req.connects(&pair));
        assert_eq!(req.pair().unwrap(), pair);

        let other = UserPair::new(Snowflake::new(3), Snowflake::new(4)).unwrap();
        assert!(!req.connects(&other));
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            FriendRequestStatus::Pending,
            FriendRequestStatus::Accepted,
            FriendRequestStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<FriendRequestStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<FriendRequestStatus>().is_err());
    }
}
