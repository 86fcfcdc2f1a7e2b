pub mod attempt;
pub mod screen;
pub mod service;

pub use attempt::{QuizAttempt, QuizTimer};
pub use screen::QuizScreen;
pub use service::QuizService;
