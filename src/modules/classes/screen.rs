use schoolhub_core::AppError;
use schoolhub_models::{Class, Subject};
use tracing::info;

use super::service::ClassService;
use crate::fetch::{FetchCycle, FetchState, UseFetch};
use crate::modules::{require_role, require_selection};
use crate::navigation::Route;
use crate::state::AppState;

/// Class list for teachers and principals. Picking a class makes it the
/// selected class for every class-scoped screen.
pub struct ClassesScreen {
    app: AppState,
    classes: UseFetch<Vec<Class>>,
}

impl ClassesScreen {
    pub fn open(app: AppState) -> Result<Self, AppError> {
        require_role(&app, Route::Classes)?;
        let classes = app.fetch(ClassService::LIST_PATH);
        Ok(Self { app, classes })
    }

    pub fn load(&mut self) -> FetchCycle {
        self.classes.mount()
    }

    pub fn state(&self) -> FetchState<Vec<Class>> {
        self.classes.state()
    }

    pub fn select(&self, class: &Class) -> Result<(), AppError> {
        self.app.store.set_selected_class(class.name.clone())?;
        self.app.store.set_selected_class_id(class.id.clone())?;
        info!(class = %class.name, "Class selected");
        Ok(())
    }

    /// Subjects taught in the selected class.
    pub async fn subjects(&self) -> Result<Vec<Subject>, AppError> {
        let session = self.app.store.snapshot();
        let class_id = require_selection(&session.selected_class_id, "class")?;
        ClassService::subjects(&self.app.client, session.access_token(), &class_id)
            .await
            .inspect_err(|e| self.app.report(e))
    }
}

pub fn find_class<'a>(classes: &'a [Class], name: &str) -> Option<&'a Class> {
    classes
        .iter()
        .find(|class| class.name.eq_ignore_ascii_case(name.trim()))
}
