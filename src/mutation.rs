//! Submit guard shared by every screen that changes server data.
//!
//! A [`Mutation`] validates the form before anything is sent, refuses to
//! start while a previous submission is still running, toasts the outcome
//! and routes failures through [`AppState::report`].

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use schoolhub_core::AppError;
use tracing::{debug, instrument};
use validator::Validate;

use crate::state::AppState;

#[derive(Debug, Default)]
pub struct Mutation {
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submission ends, including when the
/// future is dropped midway.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Mutation {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a submission is running; the submit control is disabled.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validates `form`, then runs `request`. A failed validation is
    /// reported and nothing is sent.
    pub async fn submit<F, Fut, R>(
        &self,
        app: &AppState,
        form: &F,
        success: &str,
        request: Fut,
    ) -> Result<R, AppError>
    where
        F: Validate,
        Fut: Future<Output = Result<R, AppError>>,
    {
        if let Err(errors) = form.validate() {
            let err = AppError::from(errors);
            app.report(&err);
            return Err(err);
        }
        self.run(app, success, request).await
    }

    /// Runs `request` unless another submission is in flight.
    #[instrument(skip(self, app, request))]
    pub async fn run<Fut, R>(&self, app: &AppState, success: &str, request: Fut) -> Result<R, AppError>
    where
        Fut: Future<Output = Result<R, AppError>>,
    {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Submission ignored, another one is in flight");
            return Err(AppError::busy());
        }
        let _guard = InFlight(&self.in_flight);

        match request.await {
            Ok(value) => {
                app.events.toast_success(success);
                Ok(value)
            }
            Err(err) => {
                app.report(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{UiEvent, drain};
    use crate::store::MemoryStorage;
    use schoolhub_config::ClientConfig;
    use schoolhub_core::ErrorKind;
    use schoolhub_models::LoginRequest;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn app() -> (AppState, tokio::sync::mpsc::UnboundedReceiver<UiEvent>) {
        AppState::with_storage(
            ClientConfig::from_lookup(|_| None),
            Arc::new(MemoryStorage::new()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_form_never_runs_request() {
        let (app, mut rx) = app();
        let calls = AtomicUsize::new(0);
        let form = LoginRequest {
            username: String::new(),
            password: String::new(),
        };

        let err = Mutation::new()
            .submit(&app, &form, "Saved", async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[tokio::test]
    async fn test_second_submit_is_busy() {
        let (app, _rx) = app();
        let mutation = Mutation::new();
        let (release, wait) = tokio::sync::oneshot::channel::<()>();

        let first = mutation.run(&app, "Saved", async {
            let _ = wait.await;
            Ok(1)
        });
        tokio::pin!(first);

        // Drive the first submission until it parks on the channel.
        assert!(
            tokio::time::timeout(std::time::Duration::from_millis(20), &mut first)
                .await
                .is_err()
        );
        assert!(mutation.is_in_flight());

        let err = mutation
            .run(&app, "Saved", async { Ok(2) })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Busy);

        release.send(()).unwrap();
        assert_eq!(first.await.unwrap(), 1);
        assert!(!mutation.is_in_flight());
    }
}
