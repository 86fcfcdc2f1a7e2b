use schoolhub_core::AppError;
use schoolhub_models::Role;
use tracing::debug;

use super::routes::{Route, can_access};

/// Stack navigator. The bottom of the stack is never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Login)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes `route` when `role` may open it and returns the screen now on
    /// top. Without a role every destination except `Login` resets the stack
    /// to `Login`.
    pub fn navigate(&mut self, role: Option<Role>, route: Route) -> Result<Route, AppError> {
        let Some(role) = role else {
            if route != Route::Login {
                debug!(to = ?route, "Not logged in, redirecting to login");
            }
            self.reset_to(Route::Login);
            return Ok(Route::Login);
        };

        if !can_access(role, route) {
            return Err(AppError::forbidden(format!(
                "Access denied. {} is not available to the {} role",
                route, role
            )));
        }

        if self.current() != route {
            self.stack.push(route);
        }
        debug!(to = ?route, depth = self.stack.len(), "Navigated");
        Ok(route)
    }

    /// Pops the top screen. Returns `None` when already at the root.
    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        Some(self.current())
    }

    pub fn reset_to(&mut self, route: Route) {
        self.stack.clear();
        self.stack.push(route);
    }
}
