//! Client-side error type.
//!
//! Every failure the client can surface to the user is an [`AppError`]. The
//! [`ErrorKind`] decides how the shell reacts: session errors send the user
//! back to the login screen, everything else becomes a toast.

use std::fmt;

use anyhow::{Error, anyhow};
use reqwest::StatusCode;
use validator::ValidationErrors;

use crate::validation::format_errors;

/// Message reported when a request is attempted without an access token.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "User is not authenticated. Please log in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No access token is available; no request was sent.
    Unauthenticated,
    /// The server answered 401 or the token is past its expiry.
    SessionExpired,
    /// The login endpoint rejected the username or password.
    InvalidCredentials,
    /// The current role may not perform the action or open the screen.
    Forbidden,
    /// A form failed client-side validation; no request was sent.
    Validation,
    /// The screen needs a selected class or subject first.
    SelectionRequired,
    /// A mutation of the same screen is still in flight.
    Busy,
    NotFound,
    /// Any other non-success HTTP status.
    Server,
    /// Connection, TLS or timeout failure.
    Transport,
    /// The response body did not have the expected shape.
    Decode,
    /// Reading or writing persisted client state failed.
    Storage,
    Config,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: Option<StatusCode>,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status: None,
            error: err.into(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn unauthenticated() -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow!(NOT_AUTHENTICATED_MESSAGE))
    }

    pub fn session_expired<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::SessionExpired, err).with_status(StatusCode::UNAUTHORIZED)
    }

    /// A 401 from the login endpoint keeps its message but not its session
    /// meaning: there is no session to expire yet.
    pub fn invalid_credentials(err: AppError) -> Self {
        match err.kind {
            ErrorKind::SessionExpired => Self {
                kind: ErrorKind::InvalidCredentials,
                ..err
            },
            _ => err,
        }
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow!(message))
    }

    pub fn selection_required(message: String) -> Self {
        Self::new(ErrorKind::SelectionRequired, anyhow!(message))
    }

    pub fn busy() -> Self {
        Self::new(
            ErrorKind::Busy,
            anyhow!("A submission is already in progress"),
        )
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err).with_status(StatusCode::NOT_FOUND)
    }

    /// Maps a non-success response to the matching kind. 401 always means the
    /// session is gone, whatever the body says.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let kind = match status {
            StatusCode::UNAUTHORIZED => ErrorKind::SessionExpired,
            StatusCode::FORBIDDEN => ErrorKind::Forbidden,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            _ => ErrorKind::Server,
        };
        Self::new(kind, anyhow!(message)).with_status(status)
    }

    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Transport, err)
    }

    pub fn decode<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Decode, err)
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Storage, err)
    }

    pub fn config<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Config, err)
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::new(ErrorKind::Validation, anyhow!(format_errors(errors)))
    }

    pub fn is_session_expired(&self) -> bool {
        self.kind == ErrorKind::SessionExpired
    }

    /// Returns true for failures that should end the session and send the
    /// user back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::SessionExpired | ErrorKind::Unauthenticated
        )
    }

    /// Human-readable text for toasts and the fetch hook's `error` field.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.error, status.as_u16()),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AppError::decode(err);
        }
        match err.status() {
            Some(status) => AppError::from_status(status, err.to_string()),
            None => AppError::transport(err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::decode(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::storage(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(&errors)
    }
}
