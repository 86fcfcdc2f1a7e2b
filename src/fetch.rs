//! Authenticated data loading for screens.
//!
//! A [`UseFetch`] owns the request state of one screen usage: the loaded
//! data, whether a request is in flight, and the last error. Every change is
//! published on a watch channel so the shell can redraw.
//!
//! Each load is a *cycle*. Beginning a cycle updates the state synchronously
//! (so `loading` is already true when the caller gets the [`FetchCycle`]
//! back) and returns a future that performs the request. Cycles carry a
//! generation number; a cycle that settles after a newer one began is
//! discarded, so the displayed data always belongs to the latest URL and
//! token.
//!
//! A cycle that settles with an expired session ends it the same way a
//! failed mutation does: the store is cleared and the shell is sent back to
//! the login screen.
//!
//! # Example
//!
//! ```ignore
//! let mut fetch = app.fetch::<Vec<Class>>("/api/classes/");
//! fetch.mount().await;
//! let state = fetch.state();
//! if let Some(error) = state.error { /* show it */ }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;
use schoolhub_core::{AppError, ErrorKind, NOT_AUTHENTICATED_MESSAGE};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::state::AppState;

/// Request state of one screen usage.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    /// The last failure was a 401; the shell should end the session.
    pub expired: bool,
}

impl<T: Default> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
            expired: false,
        }
    }
}

impl<T> FetchState<T> {
    /// The loaded data, or the last error rebuilt as an [`AppError`].
    pub fn into_result(self) -> Result<T, AppError> {
        match self.error {
            None => Ok(self.data),
            Some(message) if self.expired => Err(AppError::session_expired(anyhow!(message))),
            Some(message) if message == NOT_AUTHENTICATED_MESSAGE => {
                Err(AppError::unauthenticated())
            }
            Some(message) => Err(AppError::new(ErrorKind::Server, anyhow!(message))),
        }
    }
}

/// One begun fetch cycle. Already reflected in the state; awaiting it
/// performs the request and applies the result.
pub type FetchCycle = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub struct UseFetch<T> {
    app: AppState,
    url: String,
    token: Option<String>,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<FetchState<T>>>,
}

impl<T> UseFetch<T>
where
    T: DeserializeOwned + Default + Send + Sync + 'static,
{
    pub fn new(app: AppState, url: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(FetchState::default());
        Self {
            app,
            url: url.into(),
            token: None,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(tx),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Captures the current access token and begins the first cycle.
    pub fn mount(&mut self) -> FetchCycle {
        self.token = self.app.store.access_token();
        self.begin(self.token.clone())
    }

    /// Begins a cycle when the URL actually changed.
    pub fn set_url(&mut self, url: impl Into<String>) -> Option<FetchCycle> {
        let url = url.into();
        if url == self.url {
            return None;
        }
        self.url = url;
        Some(self.begin(self.token.clone()))
    }

    /// Begins a cycle when the store's access token differs from the one the
    /// last cycle used.
    pub fn sync_token(&mut self) -> Option<FetchCycle> {
        let token = self.app.store.access_token();
        if token == self.token {
            return None;
        }
        self.token = token;
        Some(self.begin(self.token.clone()))
    }

    /// Begins a cycle unconditionally with the store's current token.
    pub fn refetch(&self) -> FetchCycle {
        self.begin(self.app.store.access_token())
    }

    pub fn state(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.state.borrow().clone()
    }

    /// Runs `f` against the current state without cloning the data.
    pub fn with_state<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    fn begin(&self, token: Option<String>) -> FetchCycle {
        // The bump happens under the state lock so that a settling cycle
        // either sees the new generation or lands before the reset.
        let mut generation = 0;
        let has_token = token.is_some();
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.expired = false;
            if has_token {
                state.loading = true;
                state.error = None;
            } else {
                state.loading = false;
                state.error = Some(NOT_AUTHENTICATED_MESSAGE.to_string());
            }
        });

        let Some(token) = token else {
            debug!(url = %self.url, "No access token, fetch skipped");
            return Box::pin(std::future::ready(()));
        };

        let app = self.app.clone();
        let url = self.url.clone();
        let latest = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);

        Box::pin(async move {
            let result = app.client.get::<T>(&url, Some(&token)).await;

            let mut expired = None;
            state.send_if_modified(|state| {
                if latest.load(Ordering::SeqCst) != generation {
                    debug!(url = %url, generation, "Discarding stale response");
                    return false;
                }
                match result {
                    Ok(data) => state.data = data,
                    Err(e) => {
                        warn!(url = %url, error = %e, "Fetch failed");
                        state.expired = e.is_session_expired();
                        state.error = Some(e.message());
                        if state.expired {
                            expired = Some(e);
                        }
                    }
                }
                state.loading = false;
                true
            });

            // Reported after the state lock is released; the report touches
            // the session store.
            if let Some(e) = expired {
                app.report(&e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{UiEvent, drain};
    use crate::store::MemoryStorage;
    use schoolhub_config::{ApiConfig, ClientConfig};
    use tokio::sync::mpsc;

    fn offline_app() -> (AppState, mpsc::UnboundedReceiver<UiEvent>) {
        let mut config = ClientConfig::from_lookup(|_| None);
        config.api = ApiConfig::new("http://127.0.0.1:9");
        AppState::with_storage(config, Arc::new(MemoryStorage::new())).unwrap()
    }

    #[tokio::test]
    async fn test_mount_without_token_reports_not_authenticated() {
        let (app, mut rx) = offline_app();
        let mut fetch = UseFetch::<Vec<String>>::new(app, "/api/x/");
        let cycle = fetch.mount();

        let state = fetch.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(NOT_AUTHENTICATED_MESSAGE));
        assert!(state.data.is_empty());

        cycle.await;
        assert_eq!(fetch.state().error.as_deref(), Some(NOT_AUTHENTICATED_MESSAGE));
        assert_eq!(
            fetch.state().into_result().unwrap_err().kind,
            ErrorKind::Unauthenticated
        );
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_into_result_maps_expired() {
        let state = FetchState::<Vec<String>> {
            error: Some("Token expired".into()),
            expired: true,
            ..FetchState::default()
        };
        let err = state.into_result().unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(err.message(), "Token expired");
    }

    #[tokio::test]
    async fn test_set_url_same_value_is_noop() {
        let (app, _rx) = offline_app();
        let mut fetch = UseFetch::<Vec<String>>::new(app, "/api/x/");
        assert!(fetch.set_url("/api/x/").is_none());
        assert!(fetch.set_url("/api/y/").is_some());
        assert_eq!(fetch.url(), "/api/y/");
    }

    #[tokio::test]
    async fn test_sync_token_unchanged_is_noop() {
        let (app, _rx) = offline_app();
        let mut fetch = UseFetch::<Vec<String>>::new(app, "/api/x/");
        fetch.mount().await;
        assert!(fetch.sync_token().is_none());
    }
}
