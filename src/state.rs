use std::sync::Arc;

use schoolhub_config::ClientConfig;
use schoolhub_core::{AppError, ErrorKind};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::events::{EventSender, UiEvent, event_channel};
use crate::fetch::UseFetch;
use crate::navigation::Route;
use crate::store::{FileStorage, SessionStore, Storage};

/// Everything a screen needs: the HTTP client, the session store and the
/// UI event sender.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub store: SessionStore,
    pub events: EventSender,
}

/// Builds the application state with file-backed session persistence and
/// returns the receiving end of the UI event channel.
pub fn init_app_state(
    config: ClientConfig,
) -> Result<(AppState, mpsc::UnboundedReceiver<UiEvent>), AppError> {
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.storage.storage_file()));
    let (state, events) = AppState::with_storage(config, storage)?;
    info!(api = %state.client.base_url(), "Application state initialized");
    Ok((state, events))
}

impl AppState {
    pub fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<UiEvent>), AppError> {
        let client = ApiClient::new(&config.api)?;
        let store = SessionStore::open(storage);
        let (events, rx) = event_channel();
        Ok((
            Self {
                config,
                client,
                store,
                events,
            },
            rx,
        ))
    }

    pub fn token(&self) -> Option<String> {
        self.store.access_token()
    }

    /// A fetch hook for `url` bound to this state's client and store.
    pub fn fetch<T>(&self, url: impl Into<String>) -> UseFetch<T>
    where
        T: DeserializeOwned + Default + Send + Sync + 'static,
    {
        UseFetch::new(self.clone(), url)
    }

    /// Surfaces a failure to the user. Session failures log the user out and
    /// redirect to the login screen; everything else becomes an error toast.
    pub fn report(&self, err: &AppError) {
        match err.kind {
            ErrorKind::SessionExpired => {
                self.expire_session();
                self.events
                    .toast_error("Your session has expired. Please log in again.");
            }
            ErrorKind::Unauthenticated => {
                self.events.redirect(Route::Login);
                self.events.toast_error(err.message());
            }
            _ => self.events.toast_error(err.message()),
        }
    }

    /// Clears the session and sends the shell back to the login screen.
    pub fn expire_session(&self) {
        warn!("Session expired, logging out");
        if let Err(e) = self.store.logout_user() {
            warn!(error = %e, "Logout was not persisted");
        }
        self.events.redirect(Route::Login);
    }
}
