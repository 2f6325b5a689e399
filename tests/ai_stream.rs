//! Streaming chat client contract tests.
//!
//! Fixed frame sequences are served through wiremock; the timing-
//! sensitive paths (stalls, drip feeds, mid-stream disconnects, split
//! reads) use a raw TCP server speaking chunked HTTP, since a canned
//! mock cannot pause between bytes.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use app_lib::ai::stream::{
    ChatStreamError, ChatStreamHandler, ChatStreamOptions, StreamingChatClient,
};
use app_lib::api::client::StaticTokenStore;

#[derive(Default)]
struct RecordingHandler {
    chunks: Vec<String>,
    completed: Vec<String>,
    errors: Vec<ChatStreamError>,
}

impl ChatStreamHandler for RecordingHandler {
    fn on_chunk(&mut self, delta: &str) {
        self.chunks.push(delta.to_string());
    }

    fn on_complete(&mut self, full_content: String) {
        self.completed.push(full_content);
    }

    fn on_error(&mut self, error: ChatStreamError) {
        self.errors.push(error);
    }
}

/// Handler that signals the shared token once enough deltas arrived.
struct CancellingHandler {
    inner: RecordingHandler,
    cancel: CancellationToken,
    cancel_after: usize,
}

impl ChatStreamHandler for CancellingHandler {
    fn on_chunk(&mut self, delta: &str) {
        self.inner.on_chunk(delta);
        if self.inner.chunks.len() >= self.cancel_after {
            self.cancel.cancel();
        }
    }

    fn on_complete(&mut self, full_content: String) {
        self.inner.on_complete(full_content);
    }

    fn on_error(&mut self, error: ChatStreamError) {
        self.inner.on_error(error);
    }
}

fn client_for(base_url: &str) -> StreamingChatClient {
    StreamingChatClient::new(
        base_url,
        Arc::new(StaticTokenStore::new(Some("test-token".into()))),
    )
}

async fn mock_stream_body(server: &MockServer, body: &str) {
    Mock::given(method("POST"))
        .and(path("/ai/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.as_bytes().to_vec(), "text/event-stream"),
        )
        .mount(server)
        .await;
}

async fn run_exchange(server: &MockServer, body: &str) -> RecordingHandler {
    mock_stream_body(server, body).await;
    let client = client_for(&server.uri());
    let mut handler = RecordingHandler::default();
    let cancel = CancellationToken::new();
    client
        .send("hello", &mut handler, &ChatStreamOptions::default(), &cancel)
        .await;
    handler
}

#[tokio::test]
async fn test_done_sentinel_delivers_ordered_deltas() {
    let server = MockServer::start().await;
    let handler = run_exchange(
        &server,
        concat!(
            "data: {\"status\": \"connected\"}\n\n",
            "data: {\"content\": \"Hel\", \"done\": false}\n\n",
            "data: {\"content\": \"lo\", \"done\": false}\n\n",
            "data: [DONE]\n\n",
        ),
    )
    .await;

    assert_eq!(handler.chunks, vec!["Hel", "lo"]);
    assert_eq!(handler.completed, vec!["Hello"]);
    assert!(handler.errors.is_empty());
}

#[tokio::test]
async fn test_done_flag_prefers_server_full_content() {
    let server = MockServer::start().await;
    let handler = run_exchange(
        &server,
        concat!(
            "data: {\"content\": \"Hel\", \"done\": false}\n\n",
            "data: {\"content\": \"lo\", \"done\": false}\n\n",
            "data: {\"content\": \"\", \"done\": true, \"full_content\": \"Hello there\"}\n\n",
            "data: [DONE]\n\n",
        ),
    )
    .await;

    assert_eq!(handler.chunks, vec!["Hel", "lo"]);
    assert_eq!(handler.completed, vec!["Hello there"]);
    assert!(handler.errors.is_empty());
}

#[tokio::test]
async fn test_transport_end_without_sentinel_completes() {
    let server = MockServer::start().await;
    let handler = run_exchange(&server, "data: {\"content\": \"ok\", \"done\": false}\n\n").await;

    assert_eq!(handler.chunks, vec!["ok"]);
    assert_eq!(handler.completed, vec!["ok"]);
    assert!(handler.errors.is_empty());
}

#[tokio::test]
async fn test_error_frame_stops_processing() {
    let server = MockServer::start().await;
    let handler = run_exchange(
        &server,
        concat!(
            "data: {\"error\": \"model overloaded\"}\n\n",
            "data: {\"content\": \"late\", \"done\": false}\n\n",
        ),
    )
    .await;

    assert!(handler.chunks.is_empty());
    assert!(handler.completed.is_empty());
    assert_eq!(
        handler.errors,
        vec![ChatStreamError::Server("model overloaded".into())]
    );
}

#[tokio::test]
async fn test_malformed_frame_is_skipped() {
    let server = MockServer::start().await;
    let handler = run_exchange(
        &server,
        concat!(
            "data: {not-json\n",
            "data: {\"content\": \"ok\", \"done\": false}\n",
        ),
    )
    .await;

    assert_eq!(handler.chunks, vec!["ok"]);
    assert_eq!(handler.completed, vec!["ok"]);
    assert!(handler.errors.is_empty());
}

#[tokio::test]
async fn test_non_success_status_reports_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "code": 500,
            "message": "AI backend is not configured",
            "data": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let mut handler = RecordingHandler::default();
    client
        .send(
            "hello",
            &mut handler,
            &ChatStreamOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    assert!(handler.chunks.is_empty());
    assert!(handler.completed.is_empty());
    assert_eq!(
        handler.errors,
        vec![ChatStreamError::RequestRejected(
            "AI backend is not configured".into()
        )]
    );
}

#[tokio::test]
async fn test_non_success_status_falls_back_to_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/chat"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": "overloaded" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let mut handler = RecordingHandler::default();
    client
        .send(
            "hello",
            &mut handler,
            &ChatStreamOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(
        handler.errors,
        vec![ChatStreamError::RequestRejected("overloaded".into())]
    );
}

#[tokio::test]
async fn test_request_carries_bearer_token_and_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/chat"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "message": "hello",
            "model": "glm-4-plus",
            "max_tokens": 1024
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"data: [DONE]\n".to_vec(), "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let mut handler = RecordingHandler::default();
    let options = ChatStreamOptions {
        model: Some("glm-4-plus".into()),
        temperature: Some(0.3),
        max_tokens: Some(1024),
    };
    client
        .send("hello", &mut handler, &options, &CancellationToken::new())
        .await;

    assert_eq!(handler.completed, vec![""]);
}

#[tokio::test]
async fn test_cancellation_before_send_skips_request() {
    let server = MockServer::start().await;
    let client = client_for(&server.uri());
    let mut handler = RecordingHandler::default();

    let cancel = CancellationToken::new();
    cancel.cancel();
    client
        .send("hello", &mut handler, &ChatStreamOptions::default(), &cancel)
        .await;

    assert_eq!(handler.completed, vec![""]);
    assert!(handler.errors.is_empty());
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn test_replayed_sequence_is_deterministic() {
    let body = concat!(
        "data: {\"content\": \"a\", \"done\": false}\n\n",
        "data: {\"content\": \"b\", \"done\": false}\n\n",
        "data: [DONE]\n\n",
    );

    let server_one = MockServer::start().await;
    let first = run_exchange(&server_one, body).await;
    let server_two = MockServer::start().await;
    let second = run_exchange(&server_two, body).await;

    assert_eq!(first.chunks, second.chunks);
    assert_eq!(first.completed, second.completed);
    assert_eq!(first.errors, second.errors);
}

// ---- Raw chunked-HTTP server for timing-sensitive paths ----

enum ServerStep {
    /// Write one chunked-encoding chunk containing the given text.
    Send(&'static str),
    /// Pause between writes.
    Wait(Duration),
    /// Terminate the body cleanly (zero-length chunk).
    Finish,
    /// Drop the connection without terminating the chunked body.
    Abort,
}

async fn spawn_raw_stream_server(steps: Vec<ServerStep>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let (mut socket, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(_) => return,
        };

        // Drain the request head; the tiny JSON body arrives with it.
        let mut buf = vec![0u8; 8192];
        let mut filled = 0usize;
        while filled < buf.len() {
            match socket.read(&mut buf[filled..]).await {
                Ok(0) => return,
                Ok(n) => {
                    filled += n;
                    if buf[..filled].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                Err(_) => return,
            }
        }

        let head = "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\n\r\n";
        if socket.write_all(head.as_bytes()).await.is_err() {
            return;
        }

        for step in steps {
            match step {
                ServerStep::Send(data) => {
                    let chunk = format!("{:x}\r\n{data}\r\n", data.len());
                    if socket.write_all(chunk.as_bytes()).await.is_err() {
                        return;
                    }
                    let _ = socket.flush().await;
                }
                ServerStep::Wait(duration) => tokio::time::sleep(duration).await,
                ServerStep::Finish => {
                    let _ = socket.write_all(b"0\r\n\r\n").await;
                    let _ = socket.flush().await;
                    return;
                }
                ServerStep::Abort => return,
            }
        }

        // Hold the connection open so further reads block.
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_idle_timeout_fires_when_stream_stalls() {
    let base_url = spawn_raw_stream_server(vec![ServerStep::Send(
        "data: {\"content\": \"x\", \"done\": false}\n",
    )])
    .await;

    let client =
        client_for(&base_url).with_timeouts(Duration::from_secs(5), Duration::from_millis(100));
    let mut handler = RecordingHandler::default();
    client
        .send(
            "hello",
            &mut handler,
            &ChatStreamOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(handler.chunks, vec!["x"]);
    assert!(handler.completed.is_empty());
    assert_eq!(handler.errors, vec![ChatStreamError::IdleTimeout]);
}

#[tokio::test]
async fn test_overall_timeout_fires_during_steady_drip() {
    // Chunks keep arriving inside the idle window, so only the absolute
    // deadline can end the exchange.
    let mut steps = Vec::new();
    for _ in 0..30 {
        steps.push(ServerStep::Send("data: {\"content\": \"x\", \"done\": false}\n"));
        steps.push(ServerStep::Wait(Duration::from_millis(25)));
    }
    let base_url = spawn_raw_stream_server(steps).await;

    let client = client_for(&base_url)
        .with_timeouts(Duration::from_millis(200), Duration::from_millis(150));
    let mut handler = RecordingHandler::default();
    client
        .send(
            "hello",
            &mut handler,
            &ChatStreamOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    assert!(!handler.chunks.is_empty());
    assert!(handler.completed.is_empty());
    assert_eq!(handler.errors, vec![ChatStreamError::OverallTimeout]);
}

#[tokio::test]
async fn test_cancellation_mid_stream_completes_with_partial_text() {
    let base_url = spawn_raw_stream_server(vec![
        ServerStep::Send("data: {\"content\": \"A\", \"done\": false}\n"),
        ServerStep::Wait(Duration::from_millis(20)),
        ServerStep::Send("data: {\"content\": \"B\", \"done\": false}\n"),
        // then stall; cancellation must interrupt the pending read
    ])
    .await;

    let cancel = CancellationToken::new();
    let client = client_for(&base_url);
    let mut handler = CancellingHandler {
        inner: RecordingHandler::default(),
        cancel: cancel.clone(),
        cancel_after: 2,
    };
    client
        .send("hello", &mut handler, &ChatStreamOptions::default(), &cancel)
        .await;

    assert_eq!(handler.inner.chunks, vec!["A", "B"]);
    assert_eq!(handler.inner.completed, vec!["AB"]);
    assert!(handler.inner.errors.is_empty());
}

#[tokio::test]
async fn test_partial_line_is_buffered_across_reads() {
    let base_url = spawn_raw_stream_server(vec![
        ServerStep::Send("data: {\"cont"),
        ServerStep::Wait(Duration::from_millis(20)),
        ServerStep::Send("ent\": \"Hel\", \"done\": false}\ndata: {\"content\": \"lo\", \"done\": false}\n"),
        ServerStep::Send("data: [DONE]\n"),
        ServerStep::Finish,
    ])
    .await;

    let client = client_for(&base_url);
    let mut handler = RecordingHandler::default();
    client
        .send(
            "hello",
            &mut handler,
            &ChatStreamOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(handler.chunks, vec!["Hel", "lo"]);
    assert_eq!(handler.completed, vec!["Hello"]);
    assert!(handler.errors.is_empty());
}

#[tokio::test]
async fn test_mid_stream_disconnect_is_a_transport_error() {
    let base_url = spawn_raw_stream_server(vec![
        ServerStep::Send("data: {\"content\": \"x\", \"done\": false}\n"),
        ServerStep::Wait(Duration::from_millis(20)),
        ServerStep::Abort,
    ])
    .await;

    let client = client_for(&base_url);
    let mut handler = RecordingHandler::default();
    client
        .send(
            "hello",
            &mut handler,
            &ChatStreamOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(handler.chunks, vec!["x"]);
    assert!(handler.completed.is_empty());
    assert_eq!(handler.errors.len(), 1);
    assert!(matches!(handler.errors[0], ChatStreamError::Transport(_)));
}
