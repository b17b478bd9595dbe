//! Model to entity mappers
//!
//! - `From<Model> for Entity` where every column maps losslessly
//! - `TryFrom<Model> for Entity` where a TEXT column holds a closed enumeration

mod friend_request;
mod group_post;
mod reaction;
mod user;
