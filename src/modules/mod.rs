//! Feature screens.
//!
//! Each feature follows the same layout:
//!
//! - `service.rs`: stateless calls to the backend for one resource
//! - `screen.rs`: the screen state, composing [`AppState`], a
//!   [`UseFetch`](crate::fetch::UseFetch) for the list and a
//!   [`Mutation`](crate::mutation::Mutation) for changes
//!
//! Screens check access when they open: the role must be allowed on the
//! route, and screens scoped to a class or subject refuse to open until one
//! is selected.

pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod fees;
pub mod forum;
pub mod leave;
pub mod notes;
pub mod notices;
pub mod quiz;
pub mod syllabus;

use schoolhub_core::AppError;
use schoolhub_models::Role;

use crate::navigation::{Route, can_access};
use crate::state::AppState;

/// Role of the logged-in user, if they may open `route`.
pub(crate) fn require_role(app: &AppState, route: Route) -> Result<Role, AppError> {
    let role = app.store.role().ok_or_else(AppError::unauthenticated)?;
    if !can_access(role, route) {
        return Err(AppError::forbidden(format!(
            "Access denied. {} is not available to the {} role",
            route, role
        )));
    }
    Ok(role)
}

/// The selected value, or a prompt to select one.
pub(crate) fn require_selection(value: &str, what: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::selection_required(format!(
            "Please select a {} first",
            what
        )));
    }
    Ok(value.to_string())
}
