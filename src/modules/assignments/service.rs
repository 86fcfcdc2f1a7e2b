use schoolhub_core::AppError;
use schoolhub_models::{Assignment, CreateAssignmentDto};
use tracing::instrument;

use crate::api::ApiClient;

pub struct AssignmentService;

impl AssignmentService {
    pub const TEACHER_PATH: &'static str = "/api/teacher/assignments/";

    pub fn student_path(subject: &str) -> String {
        format!("/api/student/assignments/subject/{}/", subject)
    }

    pub fn teacher_item_path(id: &str) -> String {
        format!("{}{}/", Self::TEACHER_PATH, id)
    }

    #[instrument(skip(client, token))]
    pub async fn create(
        client: &ApiClient,
        token: Option<&str>,
        dto: &CreateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let value = client.post(Self::TEACHER_PATH, token, dto).await?;
        Ok(serde_json::from_value(value)?)
    }

    #[instrument(skip(client, token))]
    pub async fn delete(client: &ApiClient, token: Option<&str>, id: &str) -> Result<(), AppError> {
        client.delete(&Self::teacher_item_path(id), token).await?;
        Ok(())
    }
}
