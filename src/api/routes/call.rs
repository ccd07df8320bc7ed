use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    Json,
};
use tracing::info;

use crate::api::models::GenerateRequest;
use crate::api::AppState;
use crate::errors::RelayError;
use crate::relay;

/// Relay one generation to the provider named in the path, streaming its
/// chunks straight through to the client.
pub async fn call_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, RelayError> {
    // Decode failures are rejected before any provider work starts.
    let Json(request) = payload.map_err(|e| RelayError::Decode(e.body_text()))?;

    let adapter = state.providers.get(&provider_id).ok_or_else(|| {
        RelayError::UnknownProvider(format!(
            "{} (known: {})",
            provider_id,
            state.providers.ids().join(", ")
        ))
    })?;

    let instruction = state.catalog.system_prompt(&request.setting);
    info!(
        provider = adapter.name(),
        setting = %request.setting,
        input_len = request.input.len(),
        "Relaying generation request"
    );

    let stream = adapter.stream_generate(&instruction, &request.input).await?;
    relay::streaming_response(stream).await
}
