use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::RelayError;

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            RelayError::Decode(_) => StatusCode::BAD_REQUEST,
            RelayError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
