//! User, post, group and friendship model -> entity mappers

use social_core::entities::{Friendship, Group, Post, User};
use social_core::value_objects::Snowflake;

use crate::models::{FriendshipModel, GroupModel, PostModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.user_id),
            user_name: model.user_name,
            name: model.name,
            bio: model.bio,
            num_followings: model.num_followings,
            num_followers: model.num_followers,
            created_at: model.created_at,
        }
    }
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: Snowflake::new(model.group_id),
            name: model.name,
            created_at: model.created_at,
        }
    }
}

impl From<FriendshipModel> for Friendship {
    fn from(model: FriendshipModel) -> Self {
        Friendship {
            id: Snowflake::new(model.friendship_id),
            user_id_1: Snowflake::new(model.user_id_1),
            user_id_2: Snowflake::new(model.user_id_2),
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_user_model_to_entity() {
        let user = User::from(UserModel {
            user_id: 3,
            user_name: "carol".to_string(),
            name: None,
            bio: Some("hi".to_string()),
            num_followings: 2,
            num_followers: 2,
            created_at: Utc::now(),
        });
        assert_eq!(user.id, Snowflake::new(3));
        assert_eq!(user.num_followers, 2);
        assert_eq!(user.bio.as_deref(), Some("hi"));
    }

    #[test]
    fn test_friendship_model_to_entity() {
        let friendship = Friendship::from(FriendshipModel {
            friendship_id: 9,
            user_id_1: 3,
            user_id_2: 5,
            created_at: Utc::now(),
        });
        assert_eq!(friendship.friend_of(Snowflake::new(3)), Some(Snowflake::new(5)));
    }
}
