//! Syllabus topics.
//!
//! The backend sometimes omits `subtopics` or sends `null`; both decode as an
//! empty list.

use schoolhub_core::serde::{null_as_default, opaque_string};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    #[serde(default, deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default, deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtopics: Vec<Subtopic>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllabus {
    #[serde(default, deserialize_with = "opaque_string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<Topic>,
}
