use chrono::NaiveDate;
use schoolhub_core::AppError;
use schoolhub_models::{Assignment, CreateAssignmentDto, Role};

use super::service::AssignmentService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::{require_role, require_selection};
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

/// Assignments split around a reference day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentBuckets {
    /// Due today or later.
    pub running: Vec<Assignment>,
    /// Due before today.
    pub previous: Vec<Assignment>,
}

/// Splits `items` into running (`due_date >= today`) and previous, keeping
/// the input order inside each bucket.
pub fn partition_by_due_date(items: &[Assignment], today: NaiveDate) -> AssignmentBuckets {
    let (running, previous) = items
        .iter()
        .cloned()
        .partition(|assignment| assignment.due_date >= today);
    AssignmentBuckets { running, previous }
}

/// Homework screen. Teachers see and manage their own assignments; students
/// see the assignments of the selected subject.
pub struct HomeworkScreen {
    app: AppState,
    role: Role,
    assignments: UseFetch<Vec<Assignment>>,
    mutation: Mutation,
}

impl HomeworkScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        let role = require_role(&app, Route::Homework)?;
        let path = match role {
            Role::Student => {
                let subject = require_selection(&app.store.snapshot().selected_subject, "subject")?;
                AssignmentService::student_path(&subject)
            }
            _ => AssignmentService::TEACHER_PATH.to_string(),
        };
        let assignments = app.fetch(path);
        Ok(Self {
            app,
            role,
            assignments,
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.assignments.mount()
    }

    pub fn state(&self) -> FetchState<Vec<Assignment>> {
        self.assignments.state()
    }

    pub fn buckets(&self, today: NaiveDate) -> AssignmentBuckets {
        self.assignments
            .with_state(|state| partition_by_due_date(&state.data, today))
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    pub async fn create(&self, dto: CreateAssignmentDto) -> Result<Assignment, AppError> {
        self.require_teacher()?;
        let token = self.app.token();
        let created = self
            .mutation
            .submit(
                &self.app,
                &dto,
                "Assignment created",
                AssignmentService::create(&self.app.client, token.as_deref(), &dto),
            )
            .await?;
        self.assignments.refetch().await;
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.require_teacher()?;
        let token = self.app.token();
        self.mutation
            .run(
                &self.app,
                "Assignment deleted",
                AssignmentService::delete(&self.app.client, token.as_deref(), id),
            )
            .await?;
        self.assignments.refetch().await;
        Ok(())
    }

    fn require_teacher(&self) -> Result<(), AppError> {
        if self.role != Role::Teacher {
            return Err(AppError::forbidden(
                "Only teachers can manage assignments".to_string(),
            ));
        }
        Ok(())
    }
}
