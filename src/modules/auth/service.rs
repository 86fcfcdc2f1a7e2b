use schoolhub_core::AppError;
use schoolhub_models::{LoginPayload, LoginRequest};
use tracing::instrument;

use crate::api::ApiClient;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(client, request))]
    pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginPayload, AppError> {
        client.login(request).await
    }
}
