use axum::Json;
use serde_json::{json, Value};

use crate::prompts;

/// Reading-level picker data: code, Lexile target, age and grade bands.
pub async fn list_levels() -> Json<Value> {
    Json(json!({ "levels": prompts::LEVELS }))
}
