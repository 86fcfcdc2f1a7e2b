//! Quizzes.
//!
//! Scoring is the backend's job; the client tracks answers locally during an
//! attempt and submits the count of correct answers it observed.

use schoolhub_core::serde::{null_as_default, opaque_string};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub title: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub subject: String,
    /// Time allowed for an attempt, in seconds.
    #[serde(default)]
    pub duration_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    /// Index into `options`; absent when the backend withholds answers.
    #[serde(default)]
    pub correct_option: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitScoreDto {
    pub quiz: String,
    pub score: u32,
    pub total: u32,
    /// Whether the attempt ended because the countdown ran out.
    pub timed_out: bool,
}
