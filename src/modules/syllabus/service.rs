use schoolhub_core::AppError;
use serde_json::json;
use tracing::instrument;

use crate::api::ApiClient;

pub struct SyllabusService;

impl SyllabusService {
    pub fn syllabus_path(class_id: &str, subject: &str) -> String {
        format!("/api/syllabus/class/{}/subject/{}/", class_id, subject)
    }

    pub fn complete_path(topic_id: &str) -> String {
        format!("/api/syllabus/topics/{}/complete/", topic_id)
    }

    #[instrument(skip(client, token))]
    pub async fn mark_complete(
        client: &ApiClient,
        token: Option<&str>,
        topic_id: &str,
        completed: bool,
    ) -> Result<(), AppError> {
        client
            .post(&Self::complete_path(topic_id), token, &json!({ "completed": completed }))
            .await?;
        Ok(())
    }
}
