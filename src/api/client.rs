use std::time::Instant;

use anyhow::anyhow;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use schoolhub_auth::check_not_expired;
use schoolhub_config::ApiConfig;
use schoolhub_core::AppError;
use schoolhub_models::{LoginPayload, LoginRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/login/";

/// HTTP client for the school backend. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::config(anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path. Absolute inputs pass through unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Exchanges credentials for the authenticated-user payload.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginPayload, AppError> {
        request.validate()?;
        let builder = self.http.post(self.url(LOGIN_PATH)).json(request);
        let response = self
            .execute(Method::POST, LOGIN_PATH, builder)
            .await
            .map_err(AppError::invalid_credentials)?;
        let payload: LoginPayload = decode(response).await?;
        info!(role = %payload.role, "Login succeeded");
        Ok(payload)
    }

    /// Authenticated GET decoding the body as `T`.
    pub async fn get<T>(&self, path: &str, token: Option<&str>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let token = bearer(token)?;
        let builder = self.http.get(self.url(path)).bearer_auth(token);
        let response = self.execute(Method::GET, path, builder).await?;
        decode(response).await
    }

    /// Authenticated request with an optional JSON body. Empty response
    /// bodies (204, or 200 with no content) come back as `Value::Null`.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<Value, AppError>
    where
        B: Serialize + ?Sized,
    {
        let token = bearer(token)?;
        let mut builder = self
            .http
            .request(method.clone(), self.url(path))
            .bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.execute(method, path, builder).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn post<B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<Value, AppError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn patch<B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<Value, AppError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Value, AppError> {
        self.send::<Value>(Method::DELETE, path, token, None).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Response, AppError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let start = Instant::now();

        debug!(request_id = %request_id, method = %method, path = %path, "Sending request");

        let response = builder
            .header("X-Request-Id", &request_id)
            .send()
            .await
            .inspect_err(|e| {
                error!(request_id = %request_id, method = %method, path = %path, error = %e, "Transport error");
            })?;

        let status = response.status();
        let latency = start.elapsed();

        match status.as_u16() {
            200..=299 => {
                debug!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Request completed"
                );
                Ok(response)
            }
            400..=499 => {
                warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Client error"
                );
                Err(error_from_response(status, response).await)
            }
            _ => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Server error"
                );
                Err(error_from_response(status, response).await)
            }
        }
    }
}

/// Resolves the bearer token, refusing before any network activity when it
/// is missing or already expired.
fn bearer(token: Option<&str>) -> Result<&str, AppError> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(AppError::unauthenticated)?;
    check_not_expired(token)?;
    Ok(token)
}

async fn decode<T>(response: Response) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::decode(anyhow!("Unexpected response shape: {}", e)))
}

async fn error_from_response(status: StatusCode, response: Response) -> AppError {
    let body = response.text().await.unwrap_or_default();
    AppError::from_status(status, server_message(status, &body))
}

/// Picks the most useful message from an error body: `detail`, then
/// `message`, then `error`, then the first field error, then the status text.
pub fn server_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
    };

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let text = body.trim();
        return if text.is_empty() || text.starts_with('<') {
            fallback()
        } else {
            text.to_string()
        };
    };

    for key in ["detail", "message", "error"] {
        if let Some(message) = value.get(key).and_then(Value::as_str) {
            return message.to_string();
        }
    }

    // Field errors: {"title": ["This field is required."]}
    if let Some(object) = value.as_object() {
        for (field, messages) in object {
            let first = messages
                .as_array()
                .and_then(|list| list.first())
                .and_then(Value::as_str)
                .or_else(|| messages.as_str());
            if let Some(first) = first {
                return format!("{}: {}", field, first);
            }
        }
    }

    fallback()
}
