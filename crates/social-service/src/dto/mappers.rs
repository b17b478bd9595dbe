//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_core::entities::{
    FriendRequest, Friendship, Group, GroupPost, Post, Reaction, ReactionCount, User,
};

use super::responses::{
    FriendRequestResponse, FriendshipResponse, GroupPostResponse, GroupResponse, PostResponse,
    ReactionCountResponse, ReactionResponse, UserResponse,
};

// ============================================================================
// User / Post / Group Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
            num_followings: user.num_followings,
            num_followers: user.num_followers,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            created_at: group.created_at,
        }
    }
}

impl From<&GroupPost> for GroupPostResponse {
    fn from(share: &GroupPost) -> Self {
        Self {
            id: share.id,
            group_id: share.group_id,
            post_id: share.post_id,
            shared_by: share.shared_by,
            created_at: share.created_at,
        }
    }
}

impl From<GroupPost> for GroupPostResponse {
    fn from(share: GroupPost) -> Self {
        Self::from(&share)
    }
}

// ============================================================================
// Friendship Mappers
// ============================================================================

impl From<&FriendRequest> for FriendRequestResponse {
    fn from(request: &FriendRequest) -> Self {
        Self {
            id: request.id,
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            status: request.status,
            created_at: request.created_at,
            responded_at: request.responded_at,
        }
    }
}

impl From<FriendRequest> for FriendRequestResponse {
    fn from(request: FriendRequest) -> Self {
        Self::from(&request)
    }
}

impl From<Friendship> for FriendshipResponse {
    fn from(friendship: Friendship) -> Self {
        Self {
            id: friendship.id,
            user_id_1: friendship.user_id_1,
            user_id_2: friendship.user_id_2,
            created_at: friendship.created_at,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self {
            id: reaction.id,
            post_id: reaction.post_id,
            user_id: reaction.user_id,
            reaction_type: reaction.reaction_type,
            created_at: reaction.created_at,
        }
    }
}

impl From<ReactionCount> for ReactionCountResponse {
    fn from(count: ReactionCount) -> Self {
        Self {
            reaction_type: count.reaction_type,
            count: count.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use social_core::{FriendRequestStatus, ReactionType, Snowflake};

    #[test]
    fn test_friend_request_json_shape() {
        let request = FriendRequest {
            id: Snowflake::new(42),
            sender_id: Snowflake::new(1),
            receiver_id: Snowflake::new(2),
            status: FriendRequestStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        };
        let json = serde_json::to_value(FriendRequestResponse::from(&request)).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["sender_id"], "1");
        assert_eq!(json["status"], "pending");
        assert!(json["responded_at"].is_null());
    }

    #[test]
    fn test_group_post_omits_missing_sharer() {
        let share = GroupPost {
            id: Snowflake::new(1),
            group_id: Snowflake::new(2),
            post_id: Snowflake::new(3),
            shared_by: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(GroupPostResponse::from(&share)).unwrap();
        assert!(json.get("shared_by").is_none());
    }

    #[test]
    fn test_reaction_count_json() {
        let json = serde_json::to_value(ReactionCountResponse::from(ReactionCount {
            reaction_type: ReactionType::Haha,
            count: 3,
        }))
        .unwrap();
        assert_eq!(json["reaction_type"], "haha");
        assert_eq!(json["count"], 3);
    }
}
