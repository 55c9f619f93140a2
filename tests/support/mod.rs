use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::Method;
use axum::http::Uri;
use axum::response::Json;
use serde_json::Value;
use serde_json::json;
use tokio::sync::Mutex;

/// In-process stand-in for the meal battle API. Answers every endpoint with
/// its success marker unless an override says otherwise, and records each
/// call it serves so tests can assert exact sequences.
pub struct MockApi {
    base_url: String,
    calls: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<(String, String)>>>,
}

#[derive(Default)]
pub struct MockBehavior {
    overrides: Vec<(String, Value)>,
}

impl MockBehavior {
    /// Replace the canned success body for one path.
    pub fn respond_with(mut self, path: &str, body: Value) -> Self {
        self.overrides.push((path.to_string(), body));
        self
    }
}

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<(String, String)>>>,
    overrides: Arc<Vec<(String, Value)>>,
}

impl MockApi {
    pub async fn start() -> Self {
        Self::start_with(MockBehavior::default()).await
    }

    pub async fn start_with(behavior: MockBehavior) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            calls: calls.clone(),
            bodies: bodies.clone(),
            overrides: Arc::new(behavior.overrides),
        };

        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock api");
        let addr: SocketAddr = listener.local_addr().expect("mock api addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock api");
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
            bodies,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every call served so far, as "METHOD /path" in arrival order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Non-empty request bodies, as (path, raw body) in arrival order.
    pub async fn bodies(&self) -> Vec<(String, String)> {
        self.bodies.lock().await.clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    body: String,
) -> Json<Value> {
    let path = uri.path().to_string();
    state.calls.lock().await.push(format!("{method} {path}"));
    if !body.is_empty() {
        state.bodies.lock().await.push((path.clone(), body));
    }

    if let Some((_, canned)) = state.overrides.iter().find(|(p, _)| *p == path) {
        return Json(canned.clone());
    }

    let body = match path.as_str() {
        "/health" => json!({ "status": "healthy" }),
        "/db-check" => json!({ "database_status": "healthy" }),
        _ => json!({ "status": "success" }),
    };
    Json(body)
}
