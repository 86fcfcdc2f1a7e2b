use schoolhub_core::AppError;
use schoolhub_models::{CreateNoteDto, Note};
use tracing::instrument;

use crate::api::ApiClient;

pub struct NoteService;

impl NoteService {
    pub const PATH: &'static str = "/api/notes/";

    pub fn subject_path(subject: &str) -> String {
        format!("{}?subject={}", Self::PATH, subject)
    }

    #[instrument(skip(client, token))]
    pub async fn create(
        client: &ApiClient,
        token: Option<&str>,
        dto: &CreateNoteDto,
    ) -> Result<Note, AppError> {
        let value = client.post(Self::PATH, token, dto).await?;
        Ok(serde_json::from_value(value)?)
    }
}
