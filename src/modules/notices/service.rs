use schoolhub_core::AppError;
use schoolhub_models::{CreateNoticeDto, Notice};
use tracing::instrument;

use crate::api::ApiClient;

pub struct NoticeService;

impl NoticeService {
    pub const PATH: &'static str = "/api/messages/";

    #[instrument(skip(client, token))]
    pub async fn send(
        client: &ApiClient,
        token: Option<&str>,
        dto: &CreateNoticeDto,
    ) -> Result<Notice, AppError> {
        let value = client.post(Self::PATH, token, dto).await?;
        Ok(serde_json::from_value(value)?)
    }
}
