//! Claim set of the backend's access and refresh tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Claims the client reads from a bearer token.
///
/// Only `exp` is required. The backend also embeds the token type, a unique
/// token id and the user id, which are useful in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
    /// Issued-at timestamp (Unix seconds)
    #[serde(default)]
    pub iat: Option<i64>,
    /// `access` or `refresh`
    #[serde(default)]
    pub token_type: Option<String>,
    /// Unique token identifier
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserIdClaim>,
}

impl TokenClaims {
    pub fn is_access(&self) -> bool {
        self.token_type.as_deref().is_none_or(|t| t == "access")
    }
}

/// The backend sends `user_id` as either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserIdClaim {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserIdClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserIdClaim::Number(n) => write!(f, "{}", n),
            UserIdClaim::Text(s) => write!(f, "{}", s),
        }
    }
}
