//! In-progress quiz state and its countdown.

use std::time::Duration;

use anyhow::anyhow;
use schoolhub_core::{AppError, ErrorKind};
use schoolhub_models::{Question, Quiz, SubmitScoreDto};
use tokio::time::{Instant, sleep_until};

/// Answers given so far. Scoring is local; the server only receives the
/// final count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
    answers: Vec<Option<usize>>,
}

impl QuizAttempt {
    pub fn new(quiz: Quiz, questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            quiz,
            questions,
            answers,
        }
    }

    pub fn answer(&mut self, question: usize, option: usize) -> Result<(), AppError> {
        let options = self
            .questions
            .get(question)
            .map(|q| q.options.len())
            .ok_or_else(|| AppError::not_found(anyhow!("No question {}", question + 1)))?;
        if option >= options {
            return Err(AppError::new(
                ErrorKind::Validation,
                anyhow!("Question {} has no option {}", question + 1, option + 1),
            ));
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    /// Records the answer only if the countdown has not run out. Returns
    /// whether it was kept.
    pub fn answer_in_time(
        &mut self,
        timer: &QuizTimer,
        question: usize,
        option: usize,
    ) -> Result<bool, AppError> {
        if timer.is_expired() {
            return Ok(false);
        }
        self.answer(question, option)?;
        Ok(true)
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Correct answers. Questions without a known correct option never score.
    pub fn score(&self) -> u32 {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| {
                question.correct_option.is_some() && question.correct_option == **answer
            })
            .count() as u32
    }

    pub fn to_submission(&self, timed_out: bool) -> SubmitScoreDto {
        SubmitScoreDto {
            quiz: self.quiz.id.clone(),
            score: self.score(),
            total: self.questions.len() as u32,
            timed_out,
        }
    }
}

/// Countdown for a timed quiz. A zero duration means untimed.
#[derive(Debug, Clone, Copy)]
pub struct QuizTimer {
    deadline: Option<Instant>,
}

impl QuizTimer {
    pub fn start(duration: Duration) -> Self {
        Self {
            deadline: (!duration.is_zero()).then(|| Instant::now() + duration),
        }
    }

    pub fn for_quiz(quiz: &Quiz) -> Self {
        Self::start(Duration::from_secs(quiz.duration_secs))
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// Resolves when time is up. Never resolves for an untimed quiz.
    pub async fn expired(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt() -> QuizAttempt {
        let questions = serde_json::from_value(serde_json::json!([
            {"id": 1, "text": "2 + 2", "options": ["3", "4"], "correct_option": 1},
            {"id": 2, "text": "Capital of France", "options": ["Paris", "Rome"], "correct_option": 0},
            {"id": 3, "text": "Opinion", "options": ["Yes", "No"]}
        ]))
        .unwrap();
        QuizAttempt::new(
            Quiz {
                id: "q1".into(),
                title: "Warmup".into(),
                subject: "Math".into(),
                duration_secs: 0,
            },
            questions,
        )
    }

    #[test]
    fn test_score_counts_correct_answers() {
        let mut attempt = attempt();
        attempt.answer(0, 1).unwrap();
        attempt.answer(1, 1).unwrap();
        attempt.answer(2, 0).unwrap();
        assert_eq!(attempt.answered(), 3);
        assert_eq!(attempt.score(), 1);

        let dto = attempt.to_submission(false);
        assert_eq!(dto.quiz, "q1");
        assert_eq!((dto.score, dto.total, dto.timed_out), (1, 3, false));
    }

    #[test]
    fn test_answer_out_of_range() {
        let mut attempt = attempt();
        assert_eq!(attempt.answer(0, 5).unwrap_err().kind, ErrorKind::Validation);
        assert_eq!(attempt.answer(9, 0).unwrap_err().kind, ErrorKind::NotFound);
        assert_eq!(attempt.answered(), 0);
    }

    #[tokio::test]
    async fn test_timer_expires() {
        let timer = QuizTimer::start(Duration::from_millis(20));
        assert!(!timer.is_expired());
        timer.expired().await;
        assert!(timer.is_expired());
        assert_eq!(timer.remaining(), Some(Duration::ZERO));
    }

    #[tokio::test]
    async fn test_late_answer_is_dropped() {
        let mut attempt = attempt();
        let timer = QuizTimer::start(Duration::from_millis(20));
        assert!(attempt.answer_in_time(&timer, 0, 1).unwrap());

        timer.expired().await;
        assert!(!attempt.answer_in_time(&timer, 1, 0).unwrap());
        assert_eq!(attempt.answers(), &[Some(1), None, None]);
        assert_eq!(attempt.score(), 1);
    }

    #[test]
    fn test_untimed_quiz() {
        let timer = QuizTimer::start(Duration::ZERO);
        assert_eq!(timer.remaining(), None);
        assert!(!timer.is_expired());
    }
}
