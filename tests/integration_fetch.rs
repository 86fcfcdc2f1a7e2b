mod common;

use chrono::Utc;
use common::{app_for, login_payload, logged_in_app, spawn_backend};
use jsonwebtoken::{EncodingKey, Header, encode};
use schoolhub::events::{UiEvent, drain};
use schoolhub::navigation::Route;
use schoolhub_core::{ErrorKind, NOT_AUTHENTICATED_MESSAGE};
use schoolhub_models::{Assignment, Class, LoginPayload};
use serde_json::json;

#[tokio::test]
async fn test_fetch_without_token_sends_nothing() {
    let server = spawn_backend().await;
    let (app, _rx) = app_for(&server);

    let mut fetch = app.fetch::<Vec<Assignment>>("/api/teacher/assignments/");
    let cycle = fetch.mount();

    let state = fetch.state();
    assert!(state.data.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(NOT_AUTHENTICATED_MESSAGE));
    cycle.await;
    assert_eq!(server.recorded.total_hits(), 0);
}

#[tokio::test]
async fn test_fetch_loads_with_bearer_token() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "teacher");

    let mut fetch = app.fetch::<Vec<Class>>("/api/classes/");
    let cycle = fetch.mount();
    assert!(fetch.state().loading);
    cycle.await;

    let state = fetch.state();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.data.len(), 2);
    assert_eq!(state.data[0].id, "1");
    assert_eq!(
        server.recorded.last_auth().as_deref(),
        Some("Bearer valid-token")
    );
}

#[tokio::test]
async fn test_new_cycle_clears_previous_error_before_settling() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "teacher");

    let mut fetch = app.fetch::<Vec<String>>("/api/fail/");
    fetch.mount().await;
    assert_eq!(fetch.state().error.as_deref(), Some("Database unavailable"));

    let cycle = fetch.set_url("/api/fast/").unwrap();
    let pending = fetch.state();
    assert!(pending.loading);
    assert_eq!(pending.error, None);

    cycle.await;
    let state = fetch.state();
    assert!(!state.loading);
    assert_eq!(state.data, vec!["fast".to_string()]);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "teacher");

    let mut fetch = app.fetch::<Vec<String>>("/api/slow/300/");
    let slow = fetch.mount();
    let fast = fetch.set_url("/api/fast/").unwrap();

    let slow = tokio::spawn(slow);
    fast.await;
    slow.await.unwrap();

    let state = fetch.state();
    assert_eq!(state.data, vec!["fast".to_string()]);
    assert!(!state.loading);
    assert_eq!(server.recorded.hits("/api/slow/300/"), 1);
}

#[tokio::test]
async fn test_failure_keeps_previous_data() {
    let server = spawn_backend().await;
    let (app, _rx) = logged_in_app(&server, "teacher");

    let mut fetch = app.fetch::<Vec<String>>("/api/fast/");
    fetch.mount().await;
    fetch.set_url("/api/fail/").unwrap().await;

    let state = fetch.state();
    assert_eq!(state.data, vec!["fast".to_string()]);
    assert_eq!(state.error.as_deref(), Some("Database unavailable"));
    assert_eq!(
        fetch.state().into_result().unwrap_err().kind,
        ErrorKind::Server
    );
}

#[tokio::test]
async fn test_unauthorized_response_marks_expired() {
    let server = spawn_backend().await;
    let (app, mut rx) = logged_in_app(&server, "teacher");

    let mut fetch = app.fetch::<Vec<String>>("/api/expired/");
    fetch.mount().await;

    let state = fetch.state();
    assert!(state.expired);
    assert!(state.error.is_some());
    assert!(state.into_result().unwrap_err().is_session_expired());
    assert!(!app.store.snapshot().is_logged_in);
    assert!(drain(&mut rx).contains(&UiEvent::Redirect(Route::Login)));
}

#[tokio::test]
async fn test_locally_expired_token_is_not_sent() {
    let server = spawn_backend().await;
    let (app, _rx) = app_for(&server);

    let exp = Utc::now().timestamp() - 3_600;
    let token = encode(
        &Header::default(),
        &json!({"exp": exp, "token_type": "access", "user_id": 7}),
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap();
    let mut payload: LoginPayload = serde_json::from_value(login_payload("teacher")).unwrap();
    payload.access = token;
    app.store.set_login_details(payload).unwrap();

    let mut fetch = app.fetch::<Vec<String>>("/api/fast/");
    fetch.mount().await;

    assert!(fetch.state().expired);
    assert_eq!(server.recorded.total_hits(), 0);
}

#[tokio::test]
async fn test_token_change_triggers_cycle() {
    let server = spawn_backend().await;
    let (app, _rx) = app_for(&server);

    let mut fetch = app.fetch::<Vec<String>>("/api/fast/");
    fetch.mount().await;
    assert!(fetch.sync_token().is_none());

    let payload: LoginPayload = serde_json::from_value(login_payload("teacher")).unwrap();
    app.store.set_login_details(payload).unwrap();

    fetch.sync_token().unwrap().await;
    let state = fetch.state();
    assert_eq!(state.error, None);
    assert_eq!(state.data, vec!["fast".to_string()]);
    assert_eq!(server.recorded.hits("/api/fast/"), 1);
}
