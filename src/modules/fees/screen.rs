use schoolhub_core::AppError;
use schoolhub_models::{CreateFeeCategoryDto, FeeCategory};

use super::service::FeeService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::require_role;
use crate::mutation::Mutation;
use crate::navigation::Route;
use crate::state::AppState;

/// Sum of all category amounts, in cents.
pub fn total_amount(categories: &[FeeCategory]) -> i64 {
    categories.iter().map(|category| category.amount).sum()
}

pub struct FeesScreen {
    app: AppState,
    categories: UseFetch<Vec<FeeCategory>>,
    mutation: Mutation,
}

impl FeesScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        require_role(&app, Route::Fees)?;
        let categories = app.fetch(FeeService::PATH);
        Ok(Self {
            app,
            categories,
            mutation: Mutation::new(),
        })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.categories.mount()
    }

    pub fn state(&self) -> FetchState<Vec<FeeCategory>> {
        self.categories.state()
    }

    pub fn total(&self) -> i64 {
        self.categories.with_state(|state| total_amount(&state.data))
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_in_flight()
    }

    pub async fn create(&self, dto: CreateFeeCategoryDto) -> Result<FeeCategory, AppError> {
        let token = self.app.token();
        let created = self
            .mutation
            .submit(
                &self.app,
                &dto,
                "Fee category created",
                FeeService::create(&self.app.client, token.as_deref(), &dto),
            )
            .await?;
        self.categories.refetch().await;
        Ok(created)
    }
}
