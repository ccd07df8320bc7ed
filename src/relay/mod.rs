//! Chunk relay between a provider stream and an HTTP response body.
//!
//! The pump pulls from the provider only as fast as the client accepts
//! chunks; when the client goes away the pump stops and the provider stream
//! is dropped, cancelling the upstream call.

use std::pin::Pin;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use crate::errors::RelayError;

/// Ordered, finite, non-restartable sequence of generation chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, RelayError>> + Send + 'static>>;

/// Content type committed before the first chunk is written.
pub const STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// Bounded handoff between the pump and the response body. When the client
/// stops reading, the channel fills and the pump stops pulling upstream.
const CHUNK_CHANNEL_CAPACITY: usize = 16;

/// Destination for relayed chunks.
#[async_trait]
pub trait ChunkSink: Send {
    /// Deliver one chunk. An error means the sink can accept no more data,
    /// typically because the client disconnected.
    async fn write_chunk(&mut self, chunk: Bytes) -> Result<(), RelayError>;

    /// Push any buffered data out to the consumer.
    async fn flush(&mut self) -> Result<(), RelayError>;

    /// Note a mid-stream failure. Chunks already written cannot be unsent;
    /// the default does nothing.
    async fn abort(&mut self, _error: &RelayError) {}
}

/// Sink backed by the response-body channel. Each sent item becomes one
/// body frame, and hyper writes frames to the socket as they arrive, so
/// `flush` has nothing left to do here.
pub struct BodySink {
    tx: mpsc::Sender<Result<Bytes, RelayError>>,
}

impl BodySink {
    pub fn new(tx: mpsc::Sender<Result<Bytes, RelayError>>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ChunkSink for BodySink {
    async fn write_chunk(&mut self, chunk: Bytes) -> Result<(), RelayError> {
        self.tx
            .send(Ok(chunk))
            .await
            .map_err(|_| RelayError::ClientDisconnected)
    }

    async fn flush(&mut self) -> Result<(), RelayError> {
        Ok(())
    }

    async fn abort(&mut self, error: &RelayError) {
        // Terminates the body mid-transfer, which the client observes as a
        // truncated response rather than a silent clean close.
        let message = match error {
            RelayError::Stream(message) => message.clone(),
            other => other.to_string(),
        };
        let _ = self.tx.send(Err(RelayError::Stream(message))).await;
    }
}

/// Pump every chunk from `stream` into `sink`, in order, flushing after
/// each write. Returns the number of chunks delivered.
///
/// An error item from the stream aborts the sink and surfaces as `Err`; a
/// sink write failure means the client is gone and ends the pump early.
pub async fn forward<S: ChunkSink>(mut stream: ChunkStream, sink: &mut S) -> Result<u64, RelayError> {
    let mut delivered: u64 = 0;
    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => {
                sink.write_chunk(chunk).await?;
                sink.flush().await?;
                delivered += 1;
            }
            Err(e) => {
                warn!(chunks = delivered, error = %e, "Provider stream failed mid-relay");
                sink.abort(&e).await;
                return Err(e);
            }
        }
    }
    Ok(delivered)
}

/// Build the streaming response for one generation: pull the first chunk,
/// commit the headers, then relay the rest from a background pump into the
/// body.
///
/// The first pull happens before any headers are committed, so a session
/// that fails without producing a chunk still gets a clean error status
/// instead of a truncated 200. Dropping the response body closes the
/// channel, which stops the pump and drops the provider stream with it.
pub async fn streaming_response(mut stream: ChunkStream) -> Result<Response, RelayError> {
    let first = match stream.next().await {
        Some(Ok(chunk)) => Some(chunk),
        Some(Err(e)) => return Err(e),
        None => None,
    };

    let (tx, rx) = mpsc::channel(CHUNK_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut sink = BodySink::new(tx);
        let stream: ChunkStream = match first {
            Some(chunk) => Box::pin(stream::once(async move { Ok(chunk) }).chain(stream)),
            None => stream,
        };
        match forward(stream, &mut sink).await {
            Ok(chunks) => debug!(chunks, "Stream completed"),
            Err(RelayError::ClientDisconnected) => debug!("Client disconnected mid-stream"),
            // Upstream failures are logged inside forward.
            Err(_) => {}
        }
    });

    Ok((
        [(header::CONTENT_TYPE, STREAM_CONTENT_TYPE)],
        Body::from_stream(ReceiverStream::new(rx)),
    )
        .into_response())
}
