use schoolhub_core::AppError;
use schoolhub_models::{CreateNoteDto, Note, Role};

use super::service::NoteService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::{require_role, require_selection};
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

/// Study notes of the selected subject. Teachers can add notes.
pub struct NotesScreen {
    app: AppState,
    role: Role,
    subject: String,
    notes: UseFetch<Vec<Note>>,
    mutation: Mutation,
}

impl NotesScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        let role = require_role(&app, Route::Notes)?;
        let subject = require_selection(&app.store.snapshot().selected_subject, "subject")?;
        let notes = app.fetch(NoteService::subject_path(&subject));
        Ok(Self {
            app,
            role,
            subject,
            notes,
            mutation: Mutation::new(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn load(&mut self) -> FetchCycle {
        self.notes.mount()
    }

    pub fn state(&self) -> FetchState<Vec<Note>> {
        self.notes.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    /// Adds a note to the selected subject.
    pub async fn create(&self, title: &str, content: &str) -> Result<Note, AppError> {
        if self.role != Role::Teacher {
            return Err(AppError::forbidden("Only teachers can add notes".to_string()));
        }
        let dto = CreateNoteDto {
            title: title.trim().to_string(),
            content: content.to_string(),
            subject: self.subject.clone(),
        };
        let token = self.app.token();
        let note = self
            .mutation
            .submit(
                &self.app,
                &dto,
                "Note added",
                NoteService::create(&self.app.client, token.as_deref(), &dto),
            )
            .await?;
        self.notes.refetch().await;
        Ok(note)
    }
}
