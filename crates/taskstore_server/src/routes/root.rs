//! Service banner route.

use axum::Json;
use serde_json::{json, Value};

/// `GET /` — service name and a pointer to the API prefix.
pub async fn banner() -> Json<Value> {
    Json(json!({
        "message": "taskstore API",
        "docs": "/api/v1",
    }))
}
