use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use serde_json::{json, Value};
use tracing::debug;

use super::provider::ProviderAdapter;
use super::sse;
use crate::config;
use crate::errors::RelayError;
use crate::relay::ChunkStream;

/// Generative-content backend, streaming via `streamGenerateContent` with
/// `alt=sse`.
pub struct GeminiProvider {
    model: String,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
        }
    }

    /// Point the adapter at a different generative-language endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a fixed API key instead of the call-time environment lookup.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn resolve_api_key(&self) -> Result<String, RelayError> {
        self.api_key
            .clone()
            .or_else(config::gemini_api_key)
            .ok_or_else(|| RelayError::ProviderInit("GEMINI_API_KEY is not set".into()))
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn stream_generate(
        &self,
        instruction: &str,
        input: &str,
    ) -> Result<ChunkStream, RelayError> {
        let api_key = self.resolve_api_key()?;
        // One session per call; dropping the stream tears the connection down.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RelayError::ProviderInit(format!("Gemini client setup failed: {}", e)))?;

        // The API has no system role; instruction and input travel as two
        // parts of a single user turn.
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": instruction},
                    {"text": input},
                ],
            }],
        });

        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        );

        let resp = client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::ProviderInit(format!("Gemini request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => RelayError::ProviderInit(format!("Invalid Gemini API key: {}", detail)),
                _ => RelayError::ProviderInit(format!("Gemini returned {}: {}", status, detail)),
            });
        }
        debug!(model = %self.model, "Gemini stream opened");

        let chunks = sse::data_events(resp.bytes_stream()).flat_map(|event| {
            let items: Vec<Result<Bytes, RelayError>> = match event {
                Ok(payload) => match stream_event_error(&payload) {
                    Some(message) => vec![Err(RelayError::Stream(message))],
                    None => candidate_texts(&payload)
                        .into_iter()
                        .map(|text| Ok(Bytes::from(text)))
                        .collect(),
                },
                Err(e) => vec![Err(e)],
            };
            futures::stream::iter(items)
        });
        Ok(Box::pin(chunks))
    }
}

/// Every text part across the event's candidates, in arrival order.
fn candidate_texts(payload: &str) -> Vec<String> {
    let data: Value = match serde_json::from_str(payload) {
        Ok(data) => data,
        Err(_) => return Vec::new(),
    };

    let mut texts = Vec::new();
    if let Some(candidates) = data["candidates"].as_array() {
        for candidate in candidates {
            if let Some(parts) = candidate["content"]["parts"].as_array() {
                for part in parts {
                    if let Some(text) = part["text"].as_str() {
                        if !text.is_empty() {
                            texts.push(text.to_string());
                        }
                    }
                }
            }
        }
    }
    texts
}

/// Error payload embedded mid-stream, if any.
fn stream_event_error(payload: &str) -> Option<String> {
    let data: Value = serde_json::from_str(payload).ok()?;
    let error = data.get("error")?;
    Some(error["message"].as_str().unwrap_or("Unknown").to_string())
}
