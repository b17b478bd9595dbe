//! Reaction model -> entity mapper

use social_core::entities::{Reaction, ReactionCount, ReactionType};
use social_core::error::DomainError;
use social_core::value_objects::Snowflake;

use crate::models::{ReactionCountModel, ReactionModel};

// The CHECK constraint keeps unknown values out; one showing up anyway
// means the row is corrupt, not that the caller sent bad input.
fn parse_stored(raw: &str) -> Result<ReactionType, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::InternalError(format!("stored reaction type {raw:?} is invalid")))
}

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            id: Snowflake::new(model.reaction_id),
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            reaction_type: parse_stored(&model.reaction_type)?,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<ReactionCountModel> for ReactionCount {
    type Error = DomainError;

    fn try_from(model: ReactionCountModel) -> Result<Self, Self::Error> {
        Ok(ReactionCount {
            reaction_type: parse_stored(&model.reaction_type)?,
            count: model.count,
        })
    }
}
