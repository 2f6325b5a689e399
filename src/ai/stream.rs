//! Streaming chat client.
//!
//! One `send` call performs one request/streaming-response exchange with
//! the solving-assistant endpoint and reports everything through a
//! caller-supplied handler: zero or more content deltas followed by
//! exactly one terminal callback. The stream is newline-framed; each
//! frame is a `data: ` line carrying either the `[DONE]` sentinel or a
//! JSON payload. Two clocks bound the exchange: an absolute deadline for
//! the whole request and a rolling idle deadline that re-arms on every
//! received byte chunk. Cancellation is cooperative and is a clean stop,
//! not an error: the partial text is delivered through `on_complete`.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Sleep;
use tokio_util::sync::CancellationToken;

use crate::api::client::TokenStore;

pub const DEFAULT_MODEL: &str = "glm-4.5-flash";
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: i64 = 4096;

const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_secs(300);
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Per-exchange generation parameters; unset fields fall back to the
/// backend defaults above.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatStreamOptions {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatStreamError {
    /// The server refused the request with a non-success status.
    #[error("{0}")]
    RequestRejected(String),

    /// The connection or stream broke for a reason other than
    /// cancellation.
    #[error("Connection error: {0}")]
    Transport(String),

    /// The server reported an error inside the stream.
    #[error("{0}")]
    Server(String),

    #[error("Request timed out before the response completed")]
    OverallTimeout,

    #[error("Response stalled: no data received")]
    IdleTimeout,
}

/// Callback contract for one streaming exchange. Exactly one of
/// `on_complete` / `on_error` is invoked per `send`, after zero or more
/// `on_chunk` calls, and nothing fires after that.
pub trait ChatStreamHandler: Send {
    fn on_chunk(&mut self, delta: &str);
    fn on_complete(&mut self, full_content: String);
    fn on_error(&mut self, error: ChatStreamError);
}

/// One `data:` frame's JSON payload.
#[derive(Debug, Deserialize)]
struct StreamFrame {
    error: Option<String>,
    content: Option<String>,
    #[serde(default)]
    done: bool,
    full_content: Option<String>,
}

/// Terminal state of a session. Cancellation and transport end without a
/// sentinel both settle as `Complete`.
enum Settled {
    Complete(String),
    Error(ChatStreamError),
}

#[derive(Clone)]
pub struct StreamingChatClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    overall_timeout: Duration,
    idle_timeout: Duration,
}

impl StreamingChatClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            overall_timeout: DEFAULT_OVERALL_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Override both clocks. The defaults suit production; tests shrink
    /// them to keep timeout paths fast.
    pub fn with_timeouts(mut self, overall: Duration, idle: Duration) -> Self {
        self.overall_timeout = overall;
        self.idle_timeout = idle;
        self
    }

    /// Run one streaming exchange to settlement. The session's reader
    /// and both timers are owned by this call and released together on
    /// every exit path.
    pub async fn send<H: ChatStreamHandler>(
        &self,
        message: &str,
        handler: &mut H,
        options: &ChatStreamOptions,
        cancel: &CancellationToken,
    ) {
        match self.run(message, handler, options, cancel).await {
            Settled::Complete(full_content) => handler.on_complete(full_content),
            Settled::Error(error) => handler.on_error(error),
        }
    }

    async fn run<H: ChatStreamHandler>(
        &self,
        message: &str,
        handler: &mut H,
        options: &ChatStreamOptions,
        cancel: &CancellationToken,
    ) -> Settled {
        if cancel.is_cancelled() {
            return Settled::Complete(String::new());
        }

        // The absolute deadline covers connect and streaming alike.
        let overall = tokio::time::sleep(self.overall_timeout);
        tokio::pin!(overall);

        let token = self.tokens.token().unwrap_or_default();
        let body = self.request_body(message, options);
        let request = self
            .http
            .post(format!("{}/ai/chat", self.base_url))
            .header("Authorization", format!("Bearer {token}"))
            .json(&body)
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Settled::Complete(String::new()),
            _ = overall.as_mut() => return Settled::Error(ChatStreamError::OverallTimeout),
            result = request => match result {
                Ok(response) => response,
                Err(e) => return Settled::Error(ChatStreamError::Transport(e.to_string())),
            },
        };

        if !response.status().is_success() {
            return Settled::Error(ChatStreamError::RequestRejected(
                rejection_message(response).await,
            ));
        }

        let session = StreamSession {
            stream: Box::pin(response.bytes_stream()),
            line_buf: String::new(),
            accumulated: String::new(),
            idle_timeout: self.idle_timeout,
            cancel: cancel.clone(),
        };
        session.run(handler, overall).await
    }

    fn request_body(&self, message: &str, options: &ChatStreamOptions) -> serde_json::Value {
        serde_json::json!({
            "message": message,
            "model": options.model.as_deref().unwrap_or(DEFAULT_MODEL),
            "temperature": options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "max_tokens": options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }
}

/// Pull the server's message out of an error body, falling back to a
/// generic description of the status.
async fn rejection_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed ({status})"))
}

/// What one awaited read produced.
enum ReadStep {
    Cancelled,
    OverallElapsed,
    IdleElapsed,
    Chunk(Bytes),
    TransportEnd,
    TransportError(String),
}

/// Mutable state of one in-flight exchange. Owned by a single `run`
/// invocation; dropping it releases the reader (aborting the transport)
/// and both timer futures in one place, whatever the exit path.
struct StreamSession {
    stream: BoxStream<'static, reqwest::Result<Bytes>>,
    line_buf: String,
    accumulated: String,
    idle_timeout: Duration,
    cancel: CancellationToken,
}

impl StreamSession {
    async fn run<H: ChatStreamHandler>(
        mut self,
        handler: &mut H,
        mut overall: Pin<&mut Sleep>,
    ) -> Settled {
        loop {
            // The idle clock re-arms on every received byte chunk, not
            // only on parsed content frames.
            let step = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => ReadStep::Cancelled,
                _ = overall.as_mut() => ReadStep::OverallElapsed,
                read = tokio::time::timeout(self.idle_timeout, self.stream.next()) => match read {
                    Err(_) => ReadStep::IdleElapsed,
                    Ok(None) => ReadStep::TransportEnd,
                    Ok(Some(Err(e))) => ReadStep::TransportError(e.to_string()),
                    Ok(Some(Ok(chunk))) => ReadStep::Chunk(chunk),
                },
            };

            match step {
                ReadStep::Cancelled => {
                    return Settled::Complete(self.accumulated);
                }
                ReadStep::OverallElapsed => {
                    return Settled::Error(ChatStreamError::OverallTimeout);
                }
                ReadStep::IdleElapsed => {
                    return Settled::Error(ChatStreamError::IdleTimeout);
                }
                // A stream that ends without ever sending the sentinel
                // or a done flag settles as a normal completion.
                ReadStep::TransportEnd => {
                    return Settled::Complete(self.accumulated);
                }
                ReadStep::TransportError(detail) => {
                    if self.cancel.is_cancelled() {
                        return Settled::Complete(self.accumulated);
                    }
                    return Settled::Error(ChatStreamError::Transport(detail));
                }
                ReadStep::Chunk(chunk) => {
                    if let Some(settled) = self.feed(&chunk, handler) {
                        return settled;
                    }
                }
            }
        }
    }

    /// Split buffered bytes into complete lines and process each frame.
    /// A trailing partial line stays in the buffer until a later read
    /// completes it. Returns the settlement if a terminal frame was seen.
    fn feed<H: ChatStreamHandler>(&mut self, chunk: &[u8], handler: &mut H) -> Option<Settled> {
        self.line_buf.push_str(&String::from_utf8_lossy(chunk));

        while let Some(pos) = self.line_buf.find('\n') {
            let raw: String = self.line_buf.drain(..=pos).collect();
            let line = raw.trim_end();
            if line.is_empty() {
                continue;
            }
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };

            if payload.trim() == DONE_SENTINEL {
                return Some(Settled::Complete(std::mem::take(&mut self.accumulated)));
            }

            let frame: StreamFrame = match serde_json::from_str(payload) {
                Ok(frame) => frame,
                Err(e) => {
                    // Malformed frames are non-fatal; skip and keep reading.
                    log::warn!("Skipping malformed stream frame: {e} (payload: {payload})");
                    continue;
                }
            };

            if let Some(message) = frame.error {
                return Some(Settled::Error(ChatStreamError::Server(message)));
            }

            if let Some(content) = frame.content {
                if !content.is_empty() {
                    self.accumulated.push_str(&content);
                    handler.on_chunk(&content);
                }
            }

            if frame.done {
                let full_content = frame
                    .full_content
                    .unwrap_or_else(|| std::mem::take(&mut self.accumulated));
                return Some(Settled::Complete(full_content));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::StaticTokenStore;

    #[test]
    fn test_frame_with_content() {
        let frame: StreamFrame = serde_json::from_str(r#"{"content":"Hel","done":false}"#).unwrap();
        assert_eq!(frame.content.as_deref(), Some("Hel"));
        assert!(!frame.done);
        assert!(frame.error.is_none());
    }

    #[test]
    fn test_frame_with_done_and_full_content() {
        let frame: StreamFrame =
            serde_json::from_str(r#"{"content":"","done":true,"full_content":"Hello"}"#).unwrap();
        assert!(frame.done);
        assert_eq!(frame.full_content.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_frame_with_error() {
        let frame: StreamFrame = serde_json::from_str(r#"{"error":"model overloaded"}"#).unwrap();
        assert_eq!(frame.error.as_deref(), Some("model overloaded"));
    }

    #[test]
    fn test_connected_status_frame_is_inert() {
        // The server opens the stream with {"status":"connected"}; none
        // of the recognized fields are present.
        let frame: StreamFrame = serde_json::from_str(r#"{"status":"connected"}"#).unwrap();
        assert!(frame.error.is_none());
        assert!(frame.content.is_none());
        assert!(!frame.done);
    }

    #[test]
    fn test_request_body_defaults() {
        let client = StreamingChatClient::new(
            "http://localhost/api",
            Arc::new(StaticTokenStore::new(None)),
        );
        let body = client.request_body("hi", &ChatStreamOptions::default());
        assert_eq!(body["message"], "hi");
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn test_request_body_overrides() {
        let client = StreamingChatClient::new(
            "http://localhost/api",
            Arc::new(StaticTokenStore::new(None)),
        );
        let options = ChatStreamOptions {
            model: Some("glm-4-plus".into()),
            temperature: Some(0.2),
            max_tokens: Some(1024),
        };
        let body = client.request_body("hi", &options);
        assert_eq!(body["model"], "glm-4-plus");
        assert_eq!(body["temperature"], 0.2);
        assert_eq!(body["max_tokens"], 1024);
    }
}
