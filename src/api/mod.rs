//! Backend access.
//!
//! All network traffic goes through [`ApiClient`]. Authenticated calls take
//! the access token explicitly; a missing token fails with
//! [`NOT_AUTHENTICATED_MESSAGE`](schoolhub_core::NOT_AUTHENTICATED_MESSAGE)
//! before anything is sent.

pub mod client;

pub use client::{ApiClient, LOGIN_PATH, server_message};
