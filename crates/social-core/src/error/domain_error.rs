//! Domain errors - error types for the social graph

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Group not found: {0}")]
    GroupNotFound(Snowflake),

    #[error("Friend request not found: {0}")]
    FriendRequestNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reaction type: {0}")]
    InvalidReactionType(String),

    #[error("User {0} cannot form a relationship with themselves")]
    SelfRelation(Snowflake),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("A pending friend request already exists between {0} and {1}")]
    DuplicatePending(Snowflake, Snowflake),

    #[error("Users {0} and {1} are already friends")]
    AlreadyFriends(Snowflake, Snowflake),

    #[error("Friend request {0} has already been resolved")]
    AlreadyResolved(Snowflake),

    #[error("Users {0} and {1} are not friends")]
    NotFriends(Snowflake, Snowflake),

    #[error("Transaction conflict, retry the operation")]
    TransactionConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::FriendRequestNotFound(_) => "UNKNOWN_FRIEND_REQUEST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",
            Self::SelfRelation(_) => "SELF_RELATION",

            // Conflict
            Self::DuplicatePending(..) => "DUPLICATE_PENDING",
            Self::AlreadyFriends(..) => "ALREADY_FRIENDS",
            Self::AlreadyResolved(_) => "ALREADY_RESOLVED",
            Self::NotFriends(..) => "NOT_FRIENDS",
            Self::TransactionConflict => "TRANSACTION_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::GroupNotFound(_)
                | Self::FriendRequestNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidReactionType(_) | Self::SelfRelation(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicatePending(..)
                | Self::AlreadyFriends(..)
                | Self::AlreadyResolved(_)
                | Self::NotFriends(..)
                | Self::TransactionConflict
        )
    }

    /// Only store-level isolation failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransactionConflict)
    }
}
