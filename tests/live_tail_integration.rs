//! Integration tests for live tailing over a real socket.
//!
//! These tests start the full router on an ephemeral port and drive it
//! with a WebSocket client:
//! 1. Registered files stream appended lines in order
//! 2. Unregistered files are refused before the upgrade
//! 3. Stdin mode binds any request to standard input

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::{AsyncWriteExt, DuplexStream};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use webtail::adapters::source::{EndOfStream, LocalSourceOpener, StreamSourceReader};
use webtail::config::AppConfig;
use webtail::domain::source::{SourceId, SourceRegistry};
use webtail::ports::{SourceError, SourceOpener, SourceReader};
use webtail::server::{build_app, serve};

type Client = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Stands in for standard input: each session gets the next queued pipe.
struct PipeOpener {
    pipes: Mutex<Vec<DuplexStream>>,
    opened: Mutex<Vec<SourceId>>,
}

impl PipeOpener {
    fn new(pipes: Vec<DuplexStream>) -> Self {
        Self {
            pipes: Mutex::new(pipes),
            opened: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SourceOpener for PipeOpener {
    async fn open(&self, source_id: &SourceId) -> Result<Box<dyn SourceReader>, SourceError> {
        self.opened.lock().unwrap().push(source_id.clone());
        let pipe = self
            .pipes
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| SourceError::NotFound(source_id.clone()))?;
        Ok(Box::new(
            StreamSourceReader::new(source_id.clone(), pipe, 4096)
                .with_end_of_stream(EndOfStream::Final),
        ))
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.tail.poll_interval_ms = 5;
    config.tail.ping_interval_secs = 1;
    config.tail.read_timeout_secs = 5;
    config
}

async fn start(
    config: AppConfig,
    registry: SourceRegistry,
    opener: Arc<dyn SourceOpener>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_app(&config, registry, opener);
    tokio::spawn(serve(listener, app));
    addr
}

fn ws_url(addr: SocketAddr, file: Option<&str>) -> String {
    match file {
        Some(file) => format!("ws://{}/ws?file={}", addr, file),
        None => format!("ws://{}/ws", addr),
    }
}

/// Next text frame, skipping pings; fails after five seconds.
async fn next_text(client: &mut Client) -> String {
    let deadline = Duration::from_secs(5);
    loop {
        let frame = tokio::time::timeout(deadline, client.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("connection ended")
            .expect("websocket error");
        match frame {
            Message::Text(text) => return text,
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn appended_lines_arrive_in_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let config = test_config();
    let opener = Arc::new(LocalSourceOpener::from_config(&config.tail));
    let addr = start(config, SourceRegistry::new([path.clone()]), opener).await;

    let (mut client, _) = connect_async(ws_url(addr, Some(&path))).await.unwrap();

    for line in ["a\n", "b\n", "c\n"] {
        file.write_all(line.as_bytes()).unwrap();
        file.flush().unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    assert_eq!(next_text(&mut client).await, "a\n");
    assert_eq!(next_text(&mut client).await, "b\n");
    assert_eq!(next_text(&mut client).await, "c\n");
}

#[tokio::test]
async fn line_split_across_polls_arrives_whole() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let config = test_config();
    let opener = Arc::new(LocalSourceOpener::from_config(&config.tail));
    let addr = start(config, SourceRegistry::new([path.clone()]), opener).await;

    let (mut client, _) = connect_async(ws_url(addr, Some(&path))).await.unwrap();

    file.write_all(b"par").unwrap();
    file.flush().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    file.write_all(b"tial\nnext\n").unwrap();
    file.flush().unwrap();

    assert_eq!(next_text(&mut client).await, "partial\n");
    assert_eq!(next_text(&mut client).await, "next\n");
}

#[tokio::test]
async fn idle_session_receives_pings() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let config = test_config();
    let opener = Arc::new(LocalSourceOpener::from_config(&config.tail));
    let addr = start(config, SourceRegistry::new([path.clone()]), opener).await;

    let (mut client, _) = connect_async(ws_url(addr, Some(&path))).await.unwrap();

    let frame = tokio::time::timeout(Duration::from_secs(3), client.next())
        .await
        .expect("no ping within three seconds")
        .unwrap()
        .unwrap();
    assert_eq!(frame, Message::Ping(Vec::new()));
}

#[tokio::test]
async fn unregistered_source_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let registered = dir.path().join("x.log");
    std::fs::write(&registered, "").unwrap();
    let other = dir.path().join("y.log");
    std::fs::write(&other, "secret\n").unwrap();

    let config = test_config();
    let opener = Arc::new(LocalSourceOpener::from_config(&config.tail));
    let addr = start(config, SourceRegistry::new([registered]), opener).await;

    let result = connect_async(ws_url(addr, other.to_str())).await;

    match result {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status(), 404),
        other => panic!("expected HTTP 404, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn stdin_mode_accepts_any_file_parameter() {
    let (mut first_tx, first_rx) = tokio::io::duplex(1024);
    let (mut second_tx, second_rx) = tokio::io::duplex(1024);
    // Sessions pop from the back.
    let opener = Arc::new(PipeOpener::new(vec![second_rx, first_rx]));
    let addr = start(test_config(), SourceRegistry::stdin_only(), opener.clone()).await;

    let (mut first, _) = connect_async(ws_url(addr, Some("/etc/hostname"))).await.unwrap();
    first_tx.write_all(b"one\n").await.unwrap();
    assert_eq!(next_text(&mut first).await, "one\n");

    let (mut second, _) = connect_async(ws_url(addr, None)).await.unwrap();
    second_tx.write_all(b"two\nend").await.unwrap();
    drop(second_tx);
    assert_eq!(next_text(&mut second).await, "two\n");
    assert_eq!(next_text(&mut second).await, "end");

    assert_eq!(
        *opener.opened.lock().unwrap(),
        vec![SourceId::Stdin, SourceId::Stdin]
    );
}

#[tokio::test]
async fn sources_endpoint_lists_registry() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let config = test_config();
    let opener = Arc::new(LocalSourceOpener::from_config(&config.tail));
    let addr = start(config, SourceRegistry::new([path.clone()]), opener).await;

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /api/sources HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    tokio::io::AsyncReadExt::read_to_string(&mut stream, &mut response)
        .await
        .unwrap();

    assert!(response.starts_with("HTTP/1.1 200"));
    let expected = serde_json::json!({ "mode": "files", "sources": [path] }).to_string();
    assert!(response.ends_with(&expected), "unexpected body: {}", response);
}
