use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

/// Any route or method other than `POST /api/submit`.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
