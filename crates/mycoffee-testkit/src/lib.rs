//! # Mock HAL Backend
//!
//! An axum server bound to an ephemeral local port. Tests script responses
//! per method and path, then inspect what the client actually sent.
//!
//! ```text
//! ┌──────────────┐   HTTP    ┌─────────────────────────────────────────┐
//! │  HalClient   │──────────►│  MockBackend (fallback handler)         │
//! │  under test  │◄──────────│   1. record method, uri, headers, body  │
//! └──────────────┘           │   2. find latest matching route         │
//!                            │   3. reply scripted status + body       │
//!                            │      (404 "no route" when none match)   │
//!                            └─────────────────────────────────────────┘
//! ```
//!
//! ## Matching
//! A route whose path contains `?` must match path and query exactly. Any
//! other route matches on the path alone. Routes added later win, so a test
//! can replace a response halfway through.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::debug;

/// A request as the backend received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, e.g. `/records/search/findByOwnedBy?user=...`.
    pub uri: String,
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
    /// Parsed JSON body, `None` when the body was empty.
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or(&self.uri)
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: String,
    path: String,
    status: u16,
    body: Option<String>,
}

impl Route {
    fn matches(&self, method: &str, uri: &str) -> bool {
        if self.method != method {
            return false;
        }
        if self.path.contains('?') {
            self.path == uri
        } else {
            self.path == uri.split('?').next().unwrap_or(uri)
        }
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Running mock backend. Shuts down when dropped.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Binds `127.0.0.1:0` and starts serving in the background.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        debug!(%addr, "Mock backend started");
        Ok(MockBackend {
            addr,
            state,
            shutdown: Some(shutdown_tx),
        })
    }

    /// Base URL, e.g. `http://127.0.0.1:53011`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for a path on this backend.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.url(), path)
    }

    /// Scripts a JSON response.
    pub fn route(&self, method: &str, path: &str, status: u16, body: Value) {
        self.push(method, path, status, Some(body.to_string()));
    }

    /// Scripts a response with a raw text body.
    pub fn route_text(&self, method: &str, path: &str, status: u16, body: &str) {
        self.push(method, path, status, Some(body.to_string()));
    }

    /// Scripts a response with no body at all.
    pub fn route_empty(&self, method: &str, path: &str, status: u16) {
        self.push(method, path, status, None);
    }

    fn push(&self, method: &str, path: &str, status: u16, body: Option<String>) {
        lock(&self.state.routes).push(Route {
            method: method.to_uppercase(),
            path: path.to_string(),
            status,
            body,
        });
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Requests with the given method whose path (query ignored) is `path`.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method.to_uppercase() && r.path() == path)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state.requests).len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let uri = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        uri: uri.clone(),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect(),
        body: serde_json::from_slice(&body).ok(),
    };
    lock(&state.requests).push(recorded);

    let route = lock(&state.routes)
        .iter()
        .rev()
        .find(|r| r.matches(method.as_str(), &uri))
        .cloned();

    match route {
        Some(route) => {
            let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            match route.body {
                Some(body) => (
                    status,
                    [(header::CONTENT_TYPE, "application/hal+json")],
                    body,
                )
                    .into_response(),
                None => status.into_response(),
            }
        }
        None => (StatusCode::NOT_FOUND, "no route").into_response(),
    }
}
