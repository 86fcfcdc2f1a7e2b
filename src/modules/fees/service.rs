use schoolhub_core::AppError;
use schoolhub_models::{CreateFeeCategoryDto, FeeCategory};
use tracing::instrument;

use crate::api::ApiClient;

pub struct FeeService;

impl FeeService {
    pub const PATH: &'static str = "/api/fee-categories/";

    #[instrument(skip(client, token))]
    pub async fn create(
        client: &ApiClient,
        token: Option<&str>,
        dto: &CreateFeeCategoryDto,
    ) -> Result<FeeCategory, AppError> {
        let value = client.post(Self::PATH, token, dto).await?;
        Ok(serde_json::from_value(value)?)
    }
}
