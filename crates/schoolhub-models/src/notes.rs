//! Subject notes shared by teachers.

use schoolhub_core::serde::opaque_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub title: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub content: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub subject: String,
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateNoteDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    pub content: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
}
