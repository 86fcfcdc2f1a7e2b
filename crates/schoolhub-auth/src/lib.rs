//! # Schoolhub Auth
//!
//! Client-side handling of the bearer tokens issued by the backend at login.
//!
//! - [`claims`]: The claim set carried by access and refresh tokens
//! - [`jwt`]: Reading claims without the signing key and detecting expiry
//!
//! The client never holds the signing secret, so it cannot verify tokens. It
//! only reads the `exp` claim so an obviously expired session is sent back to
//! the login screen without a round trip. Tokens that are not JWTs are treated
//! as opaque and are never considered expired locally.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_auth::{check_not_expired, is_expired};
//!
//! if is_expired(&access, chrono::Utc::now().timestamp()) {
//!     // force re-login
//! }
//! check_not_expired(&access)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::TokenClaims;
pub use jwt::{check_not_expired, decode_claims, expires_in, is_expired};
