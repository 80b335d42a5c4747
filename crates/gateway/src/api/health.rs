use axum::response::Json;
use serde_json::{json, Value};

/// GET /: liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Interview Practice Partner API is running",
    }))
}
