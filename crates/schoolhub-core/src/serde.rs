//! Lenient deserializers for backend payloads.
//!
//! The backend is loose about types: ids arrive as numbers or strings, optional
//! profile fields arrive as `null`, and nested collections are sometimes absent.
//! These helpers normalise all of that at the decoding boundary so the rest of
//! the client never sees a missing collection.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes any scalar into its string form. `null` becomes an empty string.
pub fn opaque_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {}",
            other
        ))),
    }
}

/// Like [`opaque_string`] but for sequences of scalars.
pub fn opaque_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    value
        .unwrap_or_default()
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Object(map) => map
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| serde::de::Error::custom("object entry without a name")),
            other => Err(serde::de::Error::custom(format!(
                "expected a scalar, found {}",
                other
            ))),
        })
        .collect()
}

/// Treats an explicit `null` like a missing field. Pair with
/// `#[serde(default)]` so absent fields decode too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt: Option<T> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
