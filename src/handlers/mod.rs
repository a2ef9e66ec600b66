pub mod application;

use axum::Json;
use serde_json::{json, Value};

/// GET / - service banner (public)
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Job Tracker API" }))
}

/// GET /health - liveness probe (public)
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// GET /version - static version string (requires API key)
pub async fn version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}
