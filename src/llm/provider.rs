use async_trait::async_trait;

use crate::errors::RelayError;
use crate::relay::ChunkStream;

/// A backing LLM service that can stream one generation.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Open a provider session and return the chunk sequence for one
    /// generation of `input` under the system `instruction`.
    ///
    /// Everything that can fail before the first chunk — missing
    /// credentials, connection setup, a rejected request — fails here, so
    /// the caller can still send a clean error status. Failures after that
    /// surface as error items inside the stream.
    async fn stream_generate(&self, instruction: &str, input: &str)
        -> Result<ChunkStream, RelayError>;
}
