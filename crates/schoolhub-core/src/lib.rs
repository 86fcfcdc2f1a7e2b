//! # Schoolhub Core
//!
//! Core types and utilities shared by every schoolhub crate:
//!
//! - [`errors`]: The client-side [`AppError`] and its [`ErrorKind`] taxonomy
//! - [`serde`]: Lenient deserializers for the backend's loosely-typed payloads
//! - [`validation`]: Turning `validator` errors into user-facing messages
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::{AppError, ErrorKind};
//!
//! let err = AppError::unauthenticated();
//! assert_eq!(err.kind, ErrorKind::Unauthenticated);
//! println!("{}", err.message());
//! ```

pub mod errors;
pub mod serde;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, NOT_AUTHENTICATED_MESSAGE};
pub use validation::{field_messages, format_errors};
