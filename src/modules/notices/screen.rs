use schoolhub_core::AppError;
use schoolhub_models::{CreateNoticeDto, Notice, Role};

use super::service::NoticeService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::require_role;
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

/// Notices sorted newest first. Equal timestamps keep their input order.
pub fn newest_first(notices: &[Notice]) -> Vec<Notice> {
    let mut sorted = notices.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

pub struct NoticesScreen {
    app: AppState,
    role: Role,
    notices: UseFetch<Vec<Notice>>,
    mutation: Mutation,
}

impl NoticesScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        let role = require_role(&app, Route::Notices)?;
        let notices = app.fetch(NoticeService::PATH);
        Ok(Self {
            app,
            role,
            notices,
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.notices.mount()
    }

    pub fn state(&self) -> FetchState<Vec<Notice>> {
        self.notices.state()
    }

    pub fn sorted(&self) -> Vec<Notice> {
        self.notices.with_state(|state| newest_first(&state.data))
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    pub async fn send(&self, dto: CreateNoticeDto) -> Result<Notice, AppError> {
        if !self.role.is_staff() {
            return Err(AppError::forbidden(
                "Only staff can send notices".to_string(),
            ));
        }
        let token = self.app.token();
        let notice = self
            .mutation
            .submit(
                &self.app,
                &dto,
                "Notice sent",
                NoticeService::send(&self.app.client, token.as_deref(), &dto),
            )
            .await?;
        self.notices.refetch().await;
        Ok(notice)
    }
}
