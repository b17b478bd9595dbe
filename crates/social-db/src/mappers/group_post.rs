//! Group post model -> entity mapper

use social_core::entities::GroupPost;
use social_core::value_objects::Snowflake;

use crate::models::GroupPostModel;

impl From<GroupPostModel> for GroupPost {
    fn from(model: GroupPostModel) -> Self {
        GroupPost {
            id: Snowflake::new(model.group_post_id),
            group_id: Snowflake::new(model.group_id),
            post_id: Snowflake::new(model.post_id),
            shared_by: model.shared_by.map(Snowflake::new),
            created_at: model.created_at,
        }
    }
}
