use schoolhub_core::AppError;
use schoolhub_models::Quiz;
use tracing::info;

use super::attempt::QuizAttempt;
use super::service::QuizService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::require_role;
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

/// Quiz picker and submission. Rendered standalone, without the sidebar.
pub struct QuizScreen {
    app: AppState,
    quizzes: UseFetch<Vec<Quiz>>,
    mutation: Mutation,
}

impl QuizScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        require_role(&app, Route::Quiz)?;
        let quizzes = app.fetch(QuizService::QUIZZES_PATH);
        Ok(Self {
            app,
            quizzes,
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.quizzes.mount()
    }

    pub fn state(&self) -> FetchState<Vec<Quiz>> {
        self.quizzes.state()
    }

    pub async fn start(&self, quiz: Quiz) -> Result<QuizAttempt, AppError> {
        let token = self.app.token();
        let questions = QuizService::questions(&self.app.client, token.as_deref(), &quiz.id)
            .await
            .inspect_err(|e| self.app.report(e))?;
        info!(quiz = %quiz.id, questions = questions.len(), "Quiz started");
        Ok(QuizAttempt::new(quiz, questions))
    }

    pub async fn submit(&self, attempt: &QuizAttempt, timed_out: bool) -> Result<u32, AppError> {
        let dto = attempt.to_submission(timed_out);
        let token = self.app.token();
        self.mutation
            .run(
                &self.app,
                &format!("Score submitted: {}/{}", dto.score, dto.total),
                QuizService::submit_score(&self.app.client, token.as_deref(), &dto),
            )
            .await?;
        Ok(dto.score)
    }
}
