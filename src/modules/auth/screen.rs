use schoolhub_core::AppError;
use schoolhub_models::LoginRequest;
use tracing::info;

use super::service::AuthService;
use crate::mutation::Mutation;
use crate::navigation::{Route, dashboard_for};
use crate::state::AppState;

pub struct LoginScreen {
    app: AppState,
    mutation: Mutation,
}

impl LoginScreen {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            mutation: Mutation::new(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    /// Logs in, stores the session and redirects to the role's dashboard.
    pub async fn submit(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Route, AppError> {
        let request = LoginRequest {
            username: username.into().trim().to_string(),
            password: password.into(),
        };

        let payload = self
            .mutation
            .submit(
                &self.app,
                &request,
                "Logged in successfully",
                AuthService::login(&self.app.client, &request),
            )
            .await?;

        let role = payload.role;
        self.app.store.set_login_details(payload)?;

        let route = dashboard_for(role);
        info!(role = %role, route = ?route, "Logged in");
        self.app.events.redirect(route);
        Ok(route)
    }
}

/// Ends the session locally and returns to the login screen.
pub fn logout(app: &AppState) -> Result<(), AppError> {
    app.store.logout_user()?;
    app.events.redirect(Route::Login);
    app.events.toast_success("Logged out");
    info!("Logged out");
    Ok(())
}
