//! Shared HTTP client
//!
//! One client per process. It knows the backend base URL and reads the
//! bearer token from the [`SessionContext`] at send time, so a login or
//! logout takes effect on the very next request.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::error::{ClientError, ClientResult};
use super::request::{ApiRequest, ApiResponse};
use crate::config::ApiConfig;
use crate::session::SessionContext;

/// HTTP client wrapper for the finance backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl HttpClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig, session: SessionContext) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Session this client authenticates with
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and return the settled response
    ///
    /// 2xx responses come back as `Ok`; anything else is an error. Failures
    /// are returned untouched: no retry.
    pub async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), self.url(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(request = %request, "Sending request");

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                body: parse_body(&text),
            })
        } else {
            Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&text, status.canonical_reason()),
            })
        }
    }

    /// Send a request and decode the response body
    pub async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> ClientResult<T> {
        self.send(request).await?.json()
    }

    /// Send a request whose response body is not needed
    pub async fn execute(&self, request: &ApiRequest) -> ClientResult<()> {
        self.send(request).await.map(|_| ())
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Pull a human-readable message out of an error body
fn error_message(text: &str, reason: Option<&str>) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        for key in ["error", "message"] {
            match map.get(key) {
                Some(Value::String(s)) => return s.clone(),
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(s)) = inner.get("message") {
                        return s.clone();
                    }
                }
                _ => {}
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("Unknown error").to_string()
    } else {
        trimmed.to_string()
    }
}
