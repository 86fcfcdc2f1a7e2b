use schoolhub_core::AppError;
use schoolhub_models::Subject;
use tracing::instrument;

use crate::api::ApiClient;

pub struct ClassService;

impl ClassService {
    pub const LIST_PATH: &'static str = "/api/classes/";

    pub fn subjects_path(class_id: &str) -> String {
        format!("/api/classes/{}/subjects/", class_id)
    }

    #[instrument(skip(client, token))]
    pub async fn subjects(
        client: &ApiClient,
        token: Option<&str>,
        class_id: &str,
    ) -> Result<Vec<Subject>, AppError> {
        client.get(&Self::subjects_path(class_id), token).await
    }
}
