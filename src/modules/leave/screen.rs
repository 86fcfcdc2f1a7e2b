use anyhow::anyhow;
use schoolhub_core::{AppError, ErrorKind};
use schoolhub_models::{CreateLeaveDto, LeaveApplication, LeaveStatus, ReviewLeaveDto, Role};

use super::service::LeaveService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::require_role;
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveBuckets {
    pub pending: Vec<LeaveApplication>,
    pub approved: Vec<LeaveApplication>,
    pub rejected: Vec<LeaveApplication>,
}

pub fn bucket_by_status(applications: &[LeaveApplication]) -> LeaveBuckets {
    let mut buckets = LeaveBuckets::default();
    for application in applications {
        let bucket = match application.status {
            LeaveStatus::Pending => &mut buckets.pending,
            LeaveStatus::Approved => &mut buckets.approved,
            LeaveStatus::Rejected => &mut buckets.rejected,
        };
        bucket.push(application.clone());
    }
    buckets
}

/// Leave applications. Everyone can apply; principals review.
pub struct LeaveScreen {
    app: AppState,
    role: Role,
    applications: UseFetch<Vec<LeaveApplication>>,
    mutation: Mutation,
}

impl LeaveScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        let role = require_role(&app, Route::Leave)?;
        let applications = app.fetch(LeaveService::PATH);
        Ok(Self {
            app,
            role,
            applications,
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.applications.mount()
    }

    pub fn state(&self) -> FetchState<Vec<LeaveApplication>> {
        self.applications.state()
    }

    pub fn buckets(&self) -> LeaveBuckets {
        self.applications
            .with_state(|state| bucket_by_status(&state.data))
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    pub async fn apply(&self, dto: CreateLeaveDto) -> Result<LeaveApplication, AppError> {
        let token = self.app.token();
        let created = self
            .mutation
            .submit(
                &self.app,
                &dto,
                "Leave application submitted",
                LeaveService::apply(&self.app.client, token.as_deref(), &dto),
            )
            .await?;
        self.applications.refetch().await;
        Ok(created)
    }

    pub async fn review(&self, id: &str, status: LeaveStatus) -> Result<(), AppError> {
        if self.role != Role::Principal {
            return Err(AppError::forbidden(
                "Only principals can review leave applications".to_string(),
            ));
        }
        if status == LeaveStatus::Pending {
            return Err(AppError::new(
                ErrorKind::Validation,
                anyhow!("A review must approve or reject the application"),
            ));
        }
        let dto = ReviewLeaveDto { status };
        let token = self.app.token();
        let message = match status {
            LeaveStatus::Approved => "Leave approved",
            _ => "Leave rejected",
        };
        self.mutation
            .run(
                &self.app,
                message,
                LeaveService::review(&self.app.client, token.as_deref(), id, &dto),
            )
            .await?;
        self.applications.refetch().await;
        Ok(())
    }
}
