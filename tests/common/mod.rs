//! In-process fake backend for the integration suites.
//!
//! Serves the endpoints the screens call, records every request and accepts
//! exactly one bearer token: [`VALID_TOKEN`].

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use schoolhub::events::UiEvent;
use schoolhub::state::AppState;
use schoolhub::store::MemoryStorage;
use schoolhub_config::{ApiConfig, ClientConfig};
use schoolhub_models::LoginPayload;
use serde_json::{Value, json};
use tokio::sync::mpsc;

pub const VALID_TOKEN: &str = "valid-token";
pub const USERNAME: &str = "jdoe";
pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct Recorded {
    hits: Mutex<HashMap<String, usize>>,
    bodies: Mutex<Vec<(String, Value)>>,
    last_auth: Mutex<Option<String>>,
}

impl Recorded {
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn last_auth(&self) -> Option<String> {
        self.last_auth.lock().unwrap().clone()
    }

    fn push_body(&self, path: &str, body: Value) {
        self.bodies.lock().unwrap().push((path.to_string(), body));
    }
}

#[derive(Clone)]
struct Backend {
    recorded: Arc<Recorded>,
    assignments: Arc<Mutex<Vec<Value>>>,
}

pub struct TestServer {
    pub url: String,
    pub recorded: Arc<Recorded>,
}

async fn record(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    {
        let mut hits = backend.recorded.hits.lock().unwrap();
        *hits.entry(path).or_default() += 1;
    }
    *backend.recorded.last_auth.lock().unwrap() = auth;
    next.run(req).await
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", VALID_TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Given token not valid for any token type"})),
        )
            .into_response()),
    }
}

pub fn login_payload(role: &str) -> Value {
    json!({
        "access": VALID_TOKEN,
        "refresh": "refresh-token",
        "role": role,
        "id": 7,
        "username": USERNAME,
        "first_name": "John",
        "last_name": "Doe",
        "email": "jdoe@school.test",
        "phone": null,
        "classes": [{"id": "1", "name": "Class 1"}, {"id": 2, "name": "Class 2"}],
        "subjects": ["Math", {"name": "Science"}]
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response();
    }
    let role = match username {
        "pat" => "principal",
        "sam" => "student",
        "ann" => "accountant",
        _ => "teacher",
    };
    Json(login_payload(role)).into_response()
}

async fn list_assignments(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(Value::Array(backend.assignments.lock().unwrap().clone())).into_response()
}

async fn create_assignment(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    backend
        .recorded
        .push_body("/api/teacher/assignments/", body.clone());
    let mut assignments = backend.assignments.lock().unwrap();
    let mut created = body;
    created["id"] = json!(assignments.len() + 1);
    assignments.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn delete_assignment(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let mut assignments = backend.assignments.lock().unwrap();
    let before = assignments.len();
    assignments.retain(|a| a["id"].to_string() != id);
    if assignments.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn student_assignments(headers: HeaderMap, Path(subject): Path<String>) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!([
        {"id": 1, "title": format!("{} worksheet", subject), "due_date": "2099-01-01", "subject": subject},
        {"id": 2, "title": "Old worksheet", "due_date": "2000-01-01", "subject": subject}
    ]))
    .into_response()
}

async fn classes(headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!([
        {"id": 1, "name": "Class 1", "section": "A"},
        {"id": 2, "name": "Class 2", "section": "B"}
    ]))
    .into_response()
}

async fn slow(headers: HeaderMap, Path(ms): Path<u64>) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!([format!("slow-{}", ms)])).into_response()
}

async fn fast(headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!(["fast"])).into_response()
}

async fn failing() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Database unavailable"})),
    )
        .into_response()
}

async fn always_unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Token is expired"})),
    )
        .into_response()
}

pub fn thread_comments() -> Value {
    json!([
        {
            "id": 1,
            "content": "First!",
            "created_at": "2024-05-10T10:00:00Z",
            "created_by": {"username": USERNAME},
            "replies": [
                {
                    "id": 2,
                    "content": "Welcome",
                    "created_at": "2024-05-10T10:05:00Z",
                    "created_by": {"username": "amy"},
                    "replies": [
                        {"id": 4, "content": "Thanks", "created_at": "2024-05-10T10:07:00Z",
                         "created_by": {"username": USERNAME}, "replies": null}
                    ]
                }
            ]
        },
        {
            "id": 3,
            "content": "Question about homework",
            "created_at": "2024-05-10T11:00:00Z",
            "created_by": {"username": "amy"}
        }
    ])
}

async fn comments(headers: HeaderMap, Path(_post): Path<String>) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(thread_comments()).into_response()
}

async fn add_comment(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(post): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let path = format!("/api/forum/posts/{}/comments/", post);
    backend.recorded.push_body(&path, body);
    (StatusCode::CREATED, Json(json!({"id": 99}))).into_response()
}

async fn review_leave(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let path = format!("/api/leave-applications/{}/", id);
    backend.recorded.push_body(&path, body);
    Json(json!({"message": "updated"})).into_response()
}

async fn leave_applications(headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!([
        {"id": 1, "applicant": "jdoe", "reason": "Conference", "start_date": "2024-04-01", "end_date": "2024-04-03", "status": "pending"},
        {"id": 2, "applicant": "amy", "reason": "Sick", "start_date": "2024-03-01", "end_date": "2024-03-01", "status": "approved"}
    ]))
    .into_response()
}

async fn fee_categories(headers: HeaderMap) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    Json(json!([
        {"id": 1, "name": "Tuition", "amount": "1200.50"},
        {"id": 2, "name": "Library", "amount": 75}
    ]))
    .into_response()
}

/// Starts the fake backend on an ephemeral port.
pub async fn spawn_backend() -> TestServer {
    let backend = Backend {
        recorded: Arc::new(Recorded::default()),
        assignments: Arc::new(Mutex::new(vec![
            json!({"id": 1, "title": "Fractions", "due_date": "2099-01-01", "subject": "Math", "class_name": "Class 1"}),
            json!({"id": 2, "title": "Decimals", "due_date": "2000-01-01", "subject": "Math", "class_name": "Class 1"}),
        ])),
    };

    let app = Router::new()
        .route("/api/login/", post(login))
        .route(
            "/api/teacher/assignments/",
            get(list_assignments).post(create_assignment),
        )
        .route(
            "/api/teacher/assignments/{id}/",
            axum::routing::delete(delete_assignment),
        )
        .route(
            "/api/student/assignments/subject/{subject}/",
            get(student_assignments),
        )
        .route("/api/classes/", get(classes))
        .route("/api/slow/{ms}/", get(slow))
        .route("/api/fast/", get(fast))
        .route("/api/fail/", get(failing))
        .route("/api/expired/", get(always_unauthorized).post(always_unauthorized))
        .route(
            "/api/forum/posts/{id}/comments/",
            get(comments).post(add_comment),
        )
        .route("/api/leave-applications/", get(leave_applications))
        .route("/api/leave-applications/{id}/", patch(review_leave))
        .route("/api/fee-categories/", get(fee_categories))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        url: format!("http://{}", addr),
        recorded: backend.recorded,
    }
}

pub fn config_for(server: &TestServer) -> ClientConfig {
    let mut config = ClientConfig::from_lookup(|_| None);
    config.api = ApiConfig::new(server.url.clone());
    config
}

pub fn app_for(server: &TestServer) -> (AppState, mpsc::UnboundedReceiver<UiEvent>) {
    AppState::with_storage(config_for(server), Arc::new(MemoryStorage::new())).unwrap()
}

/// App state already logged in with `role`.
pub fn logged_in_app(
    server: &TestServer,
    role: &str,
) -> (AppState, mpsc::UnboundedReceiver<UiEvent>) {
    let (app, rx) = app_for(server);
    let payload: LoginPayload = serde_json::from_value(login_payload(role)).unwrap();
    app.store.set_login_details(payload).unwrap();
    (app, rx)
}
