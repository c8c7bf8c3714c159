//! In-process fake backend for tests
//!
//! An axum router bound to an ephemeral loopback port. Every request is
//! recorded; responses are stubbed per `(method, path)`.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method as HttpMethod, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::client::HttpClient;
use crate::config::ApiConfig;
use crate::session::SessionContext;

const API_PREFIX: &str = "/api";

/// A request as the backend saw it, with the `/api` prefix stripped
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Stub {
    queued: VecDeque<(u16, Value)>,
    fallback: Option<(u16, Value)>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct BackendState {
    stubs: HashMap<(String, String), Stub>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn client(&self, session: SessionContext) -> HttpClient {
        HttpClient::new(&ApiConfig::with_base_url(self.base_url()), session).unwrap()
    }

    /// Answer every matching request with this status and body
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.with_stub(method, path, |stub| stub.fallback = Some((status, body)));
    }

    /// Answer the next matching request with this, then fall back
    pub fn respond_once(&self, method: &str, path: &str, status: u16, body: Value) {
        self.with_stub(method, path, |stub| stub.queued.push_back((status, body)));
    }

    /// Hold matching requests for a while before answering
    pub fn delay(&self, method: &str, path: &str, delay: Duration) {
        self.with_stub(method, path, |stub| stub.delay = Some(delay));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Recorded requests for one `(method, path)`
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn with_stub(&self, method: &str, path: &str, f: impl FnOnce(&mut Stub)) {
        let mut state = self.state.lock().unwrap();
        let stub = state
            .stubs
            .entry((method.to_string(), path.to_string()))
            .or_default();
        f(stub);
    }
}

async fn handle(
    State(state): State<Shared>,
    method: HttpMethod,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();

    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let key = (method.as_str().to_string(), path.clone());
    let (delay, reply) = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: key.0.clone(),
            path,
            query,
            bearer,
            body,
        });

        match state.stubs.get_mut(&key) {
            Some(stub) => (stub.delay, stub.queued.pop_front().or_else(|| stub.fallback.clone())),
            None => (None, None),
        }
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = reply.unwrap_or((404, json!({"error": "Not found"})));
    let status = StatusCode::from_u16(status).unwrap();
    (status, Json(body)).into_response()
}
