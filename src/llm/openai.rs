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

/// Chat-completions backend, streaming via SSE.
pub struct OpenAIProvider {
    model: String,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAIProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
        }
    }

    /// Point the adapter at a different chat-completions endpoint.
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
            .or_else(config::openai_api_key)
            .ok_or_else(|| RelayError::ProviderInit("OPENAI_API_KEY is not set".into()))
    }
}

#[async_trait]
impl ProviderAdapter for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
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
            .map_err(|e| RelayError::ProviderInit(format!("OpenAI client setup failed: {}", e)))?;

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": instruction},
                {"role": "user", "content": input},
            ],
            "stream": true,
        });

        let resp = client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::ProviderInit(format!("OpenAI request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => RelayError::ProviderInit(format!("Invalid OpenAI API key: {}", detail)),
                _ => RelayError::ProviderInit(format!("OpenAI returned {}: {}", status, detail)),
            });
        }
        debug!(model = %self.model, "OpenAI stream opened");

        let chunks = sse::data_events(resp.bytes_stream()).filter_map(|event| async move {
            match event {
                Ok(payload) => delta_text(&payload).map(|text| Ok(Bytes::from(text))),
                Err(e) => Some(Err(e)),
            }
        });
        Ok(Box::pin(chunks))
    }
}

/// Incremental text carried by one stream event, if any. Role-only deltas,
/// empty deltas, and unparsable payloads all yield nothing.
fn delta_text(payload: &str) -> Option<String> {
    let data: Value = serde_json::from_str(payload).ok()?;
    let text = data["choices"][0]["delta"]["content"].as_str()?;
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
