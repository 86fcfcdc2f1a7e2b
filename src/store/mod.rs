//! Session state store.
//!
//! One [`SessionStore`] exists per process. It holds the tokens, role, profile
//! and selection context of the logged-in user and is the only state shared
//! between screens. Every change goes through [`SessionStore::dispatch`], which
//! runs the pure [`reduce`] function, publishes the result to subscribers and
//! persists it as a single JSON blob under [`STORAGE_KEY`].
//!
//! ```text
//! boot ──open()──▶ rehydrated state ──SetLoginDetails──▶ logged in
//!                                     ──SetSelected*────▶ selection changed
//!                                     ──LogoutUser──────▶ default state
//! ```

pub mod reducer;
pub mod state;
pub mod storage;

use std::fmt;
use std::sync::Arc;

use schoolhub_core::AppError;
use schoolhub_models::{LoginPayload, Role};
use tokio::sync::watch;
use tracing::{info, warn};

pub use reducer::reduce;
pub use state::{SessionAction, SessionState};
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Storage key of the persisted session blob.
pub const STORAGE_KEY: &str = "persist:session";

/// Handle to the process-wide session state. Clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<SessionState>>,
    storage: Arc<dyn Storage>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SessionStore")
            .field("is_logged_in", &state.is_logged_in)
            .field("role", &state.role)
            .field("username", &state.username)
            .finish()
    }
}

impl SessionStore {
    /// Rehydrates the session from `storage`.
    ///
    /// A blob that cannot be read or decoded, or that claims to be logged out
    /// while still carrying tokens, is discarded and the store starts at the
    /// default state.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let initial = rehydrate(storage.as_ref());
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: Arc::new(tx),
            storage,
        }
    }

    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStorage::new()))
    }

    /// Applies `action` and persists the new state.
    ///
    /// The in-memory state is updated even when persisting fails; the error
    /// only reports that the change will not survive a restart.
    pub fn dispatch(&self, action: SessionAction) -> Result<(), AppError> {
        let name = action.name();
        self.state
            .send_modify(|state| *state = reduce(state, action));
        info!(action = name, "Session updated");
        self.persist()
    }

    fn persist(&self) -> Result<(), AppError> {
        let blob = serde_json::to_string(&*self.state.borrow())?;
        self.storage.set_item(STORAGE_KEY, &blob).inspect_err(|e| {
            warn!(error = %e, "Failed to persist session");
        })
    }

    pub fn set_login_details(&self, payload: LoginPayload) -> Result<(), AppError> {
        self.dispatch(SessionAction::SetLoginDetails(payload))
    }

    pub fn logout_user(&self) -> Result<(), AppError> {
        self.dispatch(SessionAction::LogoutUser)
    }

    pub fn set_selected_class(&self, class_name: impl Into<String>) -> Result<(), AppError> {
        self.dispatch(SessionAction::SetSelectedClass {
            class_name: class_name.into(),
        })
    }

    pub fn set_selected_subject(&self, subject_id: impl Into<String>) -> Result<(), AppError> {
        self.dispatch(SessionAction::SetSelectedSubject {
            subject_id: subject_id.into(),
        })
    }

    pub fn set_selected_class_id(&self, class_id: impl Into<String>) -> Result<(), AppError> {
        self.dispatch(SessionAction::SetSelectedClassId {
            class_id: class_id.into(),
        })
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every dispatched change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.borrow().access_token().map(str::to_string)
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in
    }
}

fn rehydrate(storage: &dyn Storage) -> SessionState {
    let blob = match storage.get_item(STORAGE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return SessionState::default(),
        Err(e) => {
            warn!(error = %e, "Could not read persisted session, starting logged out");
            return SessionState::default();
        }
    };

    match serde_json::from_str::<SessionState>(&blob) {
        Ok(state) if state.is_consistent() => {
            info!(logged_in = state.is_logged_in, "Session rehydrated");
            state
        }
        Ok(_) => {
            warn!("Persisted session carries tokens while logged out, discarding");
            let _ = storage.remove_item(STORAGE_KEY);
            SessionState::default()
        }
        Err(e) => {
            warn!(error = %e, "Persisted session is unreadable, discarding");
            let _ = storage.remove_item(STORAGE_KEY);
            SessionState::default()
        }
    }
}
