//! Formatting of form validation failures.
//!
//! Forms are validated with `validator` before anything is sent. The shell
//! shows one line per failing field, so messages are grouped by field name.

use std::collections::BTreeMap;

use validator::ValidationErrors;

/// Joins every field message into a single toast-friendly line.
pub fn format_errors(errors: &ValidationErrors) -> String {
    field_messages(errors)
        .into_iter()
        .flat_map(|(_, messages)| messages)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Messages per field, sorted by field name for stable output.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
