//! Minimal server-sent-events decoding for provider byte streams.
//!
//! Both backends emit `data:` lines separated by blank lines. Only the data
//! payloads matter here; comment lines and other fields are skipped.

use bytes::Bytes;
use futures::{stream, Stream, StreamExt};

use crate::errors::RelayError;

const DONE_SIGNAL: &str = "[DONE]";

enum SseLine {
    Data(String),
    Done,
}

/// Decode an SSE byte stream into its `data:` payload strings.
///
/// Payloads are yielded in arrival order. The stream ends at the `[DONE]`
/// sentinel or at EOF, whichever comes first; transport errors surface as
/// `RelayError::Stream` items.
pub fn data_events<S, E>(source: S) -> impl Stream<Item = Result<String, RelayError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let source = source.fuse().boxed();
    stream::unfold((source, Vec::<u8>::new()), |(mut source, mut buf)| async move {
        loop {
            // Split on complete lines so multi-byte characters are never
            // decoded across a chunk boundary.
            if let Some(idx) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=idx).collect();
                let line = String::from_utf8_lossy(&line);
                match parse_line(line.trim_end_matches('\n')) {
                    Some(SseLine::Data(payload)) => return Some((Ok(payload), (source, buf))),
                    Some(SseLine::Done) => return None,
                    None => continue,
                }
            }

            match source.next().await {
                Some(Ok(bytes)) => buf.extend_from_slice(&bytes),
                Some(Err(e)) => {
                    let err = RelayError::Stream(format!("Provider stream read failed: {}", e));
                    return Some((Err(err), (source, buf)));
                }
                None => {
                    if buf.is_empty() {
                        return None;
                    }
                    // EOF without a trailing newline still flushes the last line.
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    buf.clear();
                    match parse_line(&line) {
                        Some(SseLine::Data(payload)) => return Some((Ok(payload), (source, buf))),
                        _ => return None,
                    }
                }
            }
        }
    })
}

fn parse_line(line: &str) -> Option<SseLine> {
    let line = line.trim_end_matches('\r');
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let payload = line.strip_prefix("data:")?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);
    if payload.trim() == DONE_SIGNAL {
        return Some(SseLine::Done);
    }
    Some(SseLine::Data(payload.to_string()))
}
