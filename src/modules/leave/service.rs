use schoolhub_core::AppError;
use schoolhub_models::{CreateLeaveDto, LeaveApplication, ReviewLeaveDto};
use tracing::instrument;

use crate::api::ApiClient;

pub struct LeaveService;

impl LeaveService {
    pub const PATH: &'static str = "/api/leave-applications/";

    pub fn item_path(id: &str) -> String {
        format!("{}{}/", Self::PATH, id)
    }

    #[instrument(skip(client, token, dto))]
    pub async fn apply(
        client: &ApiClient,
        token: Option<&str>,
        dto: &CreateLeaveDto,
    ) -> Result<LeaveApplication, AppError> {
        let value = client.post(Self::PATH, token, dto).await?;
        Ok(serde_json::from_value(value)?)
    }

    #[instrument(skip(client, token))]
    pub async fn review(
        client: &ApiClient,
        token: Option<&str>,
        id: &str,
        dto: &ReviewLeaveDto,
    ) -> Result<(), AppError> {
        client.patch(&Self::item_path(id), token, dto).await?;
        Ok(())
    }
}
