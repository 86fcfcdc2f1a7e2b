use schoolhub_core::AppError;
use schoolhub_models::{Question, SubmitScoreDto};
use tracing::instrument;

use crate::api::ApiClient;

pub struct QuizService;

impl QuizService {
    pub const QUIZZES_PATH: &'static str = "/api/quizzes";
    pub const SCORES_PATH: &'static str = "/api/scores/";

    pub fn questions_path(quiz_id: &str) -> String {
        format!("/api/questions/by-quiz/{}", quiz_id)
    }

    #[instrument(skip(client, token))]
    pub async fn questions(
        client: &ApiClient,
        token: Option<&str>,
        quiz_id: &str,
    ) -> Result<Vec<Question>, AppError> {
        client.get(&Self::questions_path(quiz_id), token).await
    }

    #[instrument(skip(client, token))]
    pub async fn submit_score(
        client: &ApiClient,
        token: Option<&str>,
        dto: &SubmitScoreDto,
    ) -> Result<(), AppError> {
        client.post(Self::SCORES_PATH, token, dto).await?;
        Ok(())
    }
}
