#![allow(dead_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use notesmaker_smoke::config::HarnessConfig;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An axum router served on an ephemeral localhost port until dropped
pub struct FakeService {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl FakeService {
    pub async fn spawn(router: Router) -> Result<Self> {
        // Bound before the task starts, so early connections queue instead of failing
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind fake service")?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("fake service error: {}", e);
            }
        });

        Ok(Self { base_url, handle })
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A localhost URL nothing is listening on
pub fn offline_url() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(format!("http://127.0.0.1:{}", port))
}

pub const LONG_SUMMARY_REPEAT: usize = 20;

pub fn ai_router() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({ "status": "healthy", "models_loaded": true })) }),
        )
        .route("/analyze", post(analyze))
}

async fn analyze(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let result = match body["action"].as_str().unwrap_or_default() {
        "summarize" => "AI is transforming how we work and live. ".repeat(LONG_SUMMARY_REPEAT),
        "rewrite" => "The cat sat on the mat, enjoying a lovely day.".to_string(),
        "explain" => "Qubits can hold a superposition of states at once. ".repeat(LONG_SUMMARY_REPEAT),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": "unknown action" })),
            )
        }
    };
    (StatusCode::OK, Json(json!({ "success": true, "result": result })))
}

pub fn backend_router(tasks: Value) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({ "status": "ok", "message": "Notes Maker API is running" })) }),
        )
        .route(
            "/api/tasks",
            get(move || {
                let tasks = tasks.clone();
                async move { Json(tasks) }
            }),
        )
        .route(
            "/api/notes",
            get(|| async { Json(json!({ "success": true, "data": [{ "id": 1, "title": "Groceries" }] })) }),
        )
        .route(
            "/api/folders",
            get(|| async {
                Json(json!({ "success": true, "data": [{ "folder": "General", "count": 1 }, { "folder": "Work", "count": 0 }] }))
            }),
        )
        .route(
            "/api/ai/health",
            get(|| async { Json(json!({ "status": "offline", "models_loaded": false, "placeholder": true })) }),
        )
}

pub fn frontend_router(status: StatusCode) -> Router {
    Router::new().route(
        "/",
        get(move || async move { (status, Html("<!doctype html><div id=\"root\"></div>")) }),
    )
}

/// Config pointing at the given base URLs, with timeouts short enough for tests
pub fn config_for(backend: &str, ai: &str, frontend: &str) -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.services.backend_base_url = backend.to_string();
    config.services.ai_base_url = ai.to_string();
    config.services.frontend_base_url = frontend.to_string();
    config.timeouts.health_secs = 2;
    config.timeouts.analyze_secs = 2;
    config
}

/// All three services up, backend holding `tasks`, frontend answering `frontend_status`
pub struct Stack {
    pub backend: FakeService,
    pub ai: FakeService,
    pub frontend: FakeService,
}

impl Stack {
    pub async fn start(tasks: Value, frontend_status: StatusCode) -> Result<Self> {
        Ok(Self {
            backend: FakeService::spawn(backend_router(tasks)).await?,
            ai: FakeService::spawn(ai_router()).await?,
            frontend: FakeService::spawn(frontend_router(frontend_status)).await?,
        })
    }

    pub fn config(&self) -> HarnessConfig {
        config_for(&self.backend.base_url, &self.ai.base_url, &self.frontend.base_url)
    }
}

pub fn slow_router(delay: Duration) -> Router {
    Router::new().route(
        "/slow",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({ "status": "late" }))
        }),
    )
}
