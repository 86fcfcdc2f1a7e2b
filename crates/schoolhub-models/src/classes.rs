//! Classes and subjects.

use schoolhub_core::serde::opaque_string;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub name: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub section: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub name: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub teacher: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_numeric_id() {
        let class: Class = serde_json::from_str(r#"{"id": 3, "name": "Class 3"}"#).unwrap();
        assert_eq!(class.id, "3");
        assert_eq!(class.section, "");
    }
}
