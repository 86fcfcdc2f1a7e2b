//! Reading bearer tokens on the client.
//!
//! The signature cannot be checked without the backend's secret, so decoding
//! here only parses the payload. The backend remains the authority: a token
//! that looks fine locally can still be rejected with a 401.

use std::collections::HashSet;

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode};
use schoolhub_core::AppError;
use tracing::debug;

use crate::claims::TokenClaims;

/// Seconds of clock skew tolerated before a token counts as expired.
pub const EXPIRY_LEEWAY_SECS: i64 = 30;

/// Parses the claims of a JWT without verifying its signature.
///
/// # Errors
///
/// Returns a decode error when the token is not a JWT or its payload lacks
/// an `exp` claim.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AppError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::decode(anyhow!("Unreadable token: {}", e)))
}

/// Returns true when `token` is a JWT whose `exp` lies before `now`
/// (Unix seconds, with [`EXPIRY_LEEWAY_SECS`] of tolerance).
///
/// Opaque tokens are never expired locally.
pub fn is_expired(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp + EXPIRY_LEEWAY_SECS < now,
        Err(_) => {
            debug!("Token is not a readable JWT, treating as opaque");
            false
        }
    }
}

/// Seconds until the token expires, `None` for opaque tokens.
pub fn expires_in(token: &str, now: i64) -> Option<i64> {
    decode_claims(token).ok().map(|claims| claims.exp - now)
}

/// Fails with a session-expired error when the token is known to be expired.
pub fn check_not_expired(token: &str) -> Result<(), AppError> {
    if is_expired(token, Utc::now().timestamp()) {
        return Err(AppError::session_expired(anyhow!(
            "Session expired. Please log in again."
        )));
    }
    Ok(())
}
