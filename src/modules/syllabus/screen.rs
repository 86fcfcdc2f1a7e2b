use schoolhub_core::AppError;
use schoolhub_models::{Role, Syllabus};

use super::service::SyllabusService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::{require_role, require_selection};
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyllabusProgress {
    pub completed: usize,
    pub total: usize,
}

impl SyllabusProgress {
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.completed * 100 / self.total) as u8
    }
}

/// Completion of a syllabus. A topic with subtopics counts each subtopic;
/// a topic without any counts as a single unit.
pub fn progress(syllabus: &Syllabus) -> SyllabusProgress {
    syllabus
        .topics
        .iter()
        .fold(SyllabusProgress::default(), |mut progress, topic| {
            if topic.subtopics.is_empty() {
                progress.total += 1;
                progress.completed += usize::from(topic.completed);
            } else {
                progress.total += topic.subtopics.len();
                progress.completed += topic.subtopics.iter().filter(|s| s.completed).count();
            }
            progress
        })
}

/// Syllabus of the selected class and subject.
pub struct SyllabusScreen {
    app: AppState,
    role: Role,
    syllabus: UseFetch<Syllabus>,
    mutation: Mutation,
}

impl SyllabusScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        let role = require_role(&app, Route::Syllabus)?;
        let session = app.store.snapshot();
        let class_id = require_selection(&session.selected_class_id, "class")?;
        let subject = require_selection(&session.selected_subject, "subject")?;
        let syllabus = app.fetch(SyllabusService::syllabus_path(&class_id, &subject));
        Ok(Self {
            app,
            role,
            syllabus,
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.syllabus.mount()
    }

    pub fn state(&self) -> FetchState<Syllabus> {
        self.syllabus.state()
    }

    pub fn progress(&self) -> SyllabusProgress {
        self.syllabus.with_state(|state| progress(&state.data))
    }

    pub async fn mark_complete(&self, topic_id: &str, completed: bool) -> Result<(), AppError> {
        if self.role != Role::Teacher {
            return Err(AppError::forbidden(
                "Only teachers can update the syllabus".to_string(),
            ));
        }
        let token = self.app.token();
        self.mutation
            .run(
                &self.app,
                "Syllabus updated",
                SyllabusService::mark_complete(&self.app.client, token.as_deref(), topic_id, completed),
            )
            .await?;
        self.syllabus.refetch().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts_subtopics_and_bare_topics() {
        let syllabus: Syllabus = serde_json::from_value(serde_json::json!({
            "class_name": "Class 1",
            "subject": "Math",
            "topics": [
                {"id": 1, "name": "Algebra", "completed": false, "subtopics": [
                    {"id": 10, "name": "Linear", "completed": true},
                    {"id": 11, "name": "Quadratic", "completed": false}
                ]},
                {"id": 2, "name": "Geometry", "completed": true, "subtopics": null},
                {"id": 3, "name": "Calculus", "completed": false}
            ]
        }))
        .unwrap();

        let progress = progress(&syllabus);
        assert_eq!(progress, SyllabusProgress { completed: 2, total: 4 });
        assert_eq!(progress.percentage(), 50);
    }

    #[test]
    fn test_empty_syllabus() {
        assert_eq!(progress(&Syllabus::default()).percentage(), 0);
    }
}
