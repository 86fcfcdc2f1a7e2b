//! Authentication models.
//!
//! `POST /api/login/` takes a [`LoginRequest`] and answers with a
//! [`LoginPayload`]: both bearer tokens, the user's role, their profile and
//! the classes and subjects they can pick from.

use schoolhub_core::serde::{null_as_default, opaque_string, opaque_strings};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::role::Role;

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A class the acting user may select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRef {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub name: String,
}

/// The authenticated-user payload returned by the login endpoint.
///
/// Profile fields are opaque strings. Missing or `null` fields decode as
/// empty strings and missing collections as empty lists; nothing else is
/// validated on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub access: String,
    pub refresh: String,
    pub role: Role,
    #[serde(default, deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub username: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub email: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub address: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub date_of_joining: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<ClassRef>,
    #[serde(default, deserialize_with = "opaque_strings")]
    pub subjects: Vec<String>,
}

impl LoginPayload {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
