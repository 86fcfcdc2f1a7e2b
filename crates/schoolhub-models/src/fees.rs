//! Fee categories.
//!
//! Amounts travel as decimal strings or numbers; they are kept in minor units
//! (cents) on the client so totals do not drift.

use schoolhub_core::serde::opaque_string;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeCategory {
    #[serde(default, deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub name: String,
    /// Amount in minor units.
    #[serde(deserialize_with = "amount_in_cents")]
    pub amount: i64,
    #[serde(default, deserialize_with = "opaque_string")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateFeeCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    /// Amount in minor units.
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
    pub description: String,
}

/// Parses `"1500.50"`, `1500.5` or `1500` into cents.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || frac.len() > 2 || !all_digits(whole) || !all_digits(frac) {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    let frac: i64 = if frac.is_empty() {
        0
    } else {
        format!("{:0<2}", frac).parse().ok()?
    };
    let cents = whole.checked_mul(100)?.checked_add(frac)?;
    Some(if negative { -cents } else { cents })
}

fn amount_in_cents<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = opaque_string(deserializer)?;
    parse_amount(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", raw)))
}

/// Renders minor units as `1,234.50`.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}.{:02}", sign, grouped, cents % 100)
}
