//! Homework assignments.

use chrono::NaiveDate;
use schoolhub_core::serde::opaque_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default, deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub title: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default, deserialize_with = "opaque_string")]
    pub subject: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub class_name: String,
    #[serde(default)]
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateAssignmentDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: String,
    pub due_date: NaiveDate,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Class is required"))]
    pub class_name: String,
}
