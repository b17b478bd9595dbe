//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use social_core::RequestDecision;
use validator::Validate;

// ============================================================================
// User Requests
// ============================================================================

/// Sign-up request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 50, message = "User name must be 1-50 characters"))]
    pub user_name: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
}

impl SignUpRequest {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            name: None,
            bio: None,
        }
    }
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request, also used for posts published straight into a group
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
}

impl CreatePostRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

// ============================================================================
// Group Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Group name must be 1-100 characters"))]
    pub name: String,
}

// ============================================================================
// Friend Requests
// ============================================================================

/// Receiver's answer, `{"decision": "accept"}` or `{"decision": "reject"}`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RespondToRequestRequest {
    pub decision: RequestDecision,
}
