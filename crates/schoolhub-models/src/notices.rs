//! Notices published to the school.

use chrono::{DateTime, Utc};
use schoolhub_core::serde::opaque_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub title: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub content: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub sender: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateNoticeDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}
