//! Discussion forum posts and comments.
//!
//! Comments arrive already nested by the server: each carries its own
//! `replies` in the same shape, to any depth.

use schoolhub_core::serde::{null_as_default, opaque_string};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "opaque_string")]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub content: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by: Author,
    /// Parent comment id, empty for top-level comments.
    #[serde(default, deserialize_with = "opaque_string")]
    pub parent: String,
    /// Missing or `null` decodes as no replies.
    #[serde(default, deserialize_with = "null_as_default")]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub title: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by: Author,
    #[serde(default, deserialize_with = "opaque_string")]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, max = 2000, message = "Comment must be between 1 and 2000 characters"))]
    pub content: String,
    /// Set when replying to another comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, max = 2000, message = "Comment must be between 1 and 2000 characters"))]
    pub content: String,
}
