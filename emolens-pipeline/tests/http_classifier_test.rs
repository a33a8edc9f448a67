//! Tests for the HTTP emotion client against a local stub service

use async_trait::async_trait;
use bytes::Bytes;
use emolens_core::{
    BoundingBox, Emotion, FacePayload, Frame, PayloadFormat, PipelineConfig, PixelFormat,
};
use emolens_pipeline::{
    Coordinator, Detection, EmotionClassifier, FaceDetector, FrameOutcome, HttpEmotionClient,
    PipelineError,
};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Spawn a loopback HTTP server that answers every request with the given
/// status line and body
async fn spawn_stub_service(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                if read_request(&mut socket).await.is_err() {
                    return;
                }
                let response = format!(
                    "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Drain one HTTP request: headers, then content-length bytes of body
async fn read_request(socket: &mut tokio::net::TcpStream) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]);
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let mut body_read = buf.len() - header_end;
    while body_read < content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body_read += n;
    }
    Ok(())
}

fn tiny_payload() -> FacePayload {
    FacePayload {
        bytes: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9]),
        width: 1,
        height: 1,
        format: PayloadFormat::Jpeg,
    }
}

fn client_for(addr: SocketAddr) -> HttpEmotionClient {
    HttpEmotionClient::new(
        format!("http://{}/classify", addr),
        &PipelineConfig::default(),
    )
}

#[tokio::test]
async fn test_success_response_parsed() {
    let addr = spawn_stub_service(
        "HTTP/1.1 200 OK",
        r#"{"status":"success","result":{"emotion":"happy","logits":[1.5,0.2]}}"#,
    )
    .await;

    let reading = client_for(addr).classify(tiny_payload()).await;
    assert_eq!(reading.emotion, Emotion::Happy);
    assert_eq!(reading.logits, Some(vec![1.5, 0.2]));
}

#[tokio::test]
async fn test_http_500_yields_unknown() {
    let addr = spawn_stub_service("HTTP/1.1 500 Internal Server Error", "").await;
    let reading = client_for(addr).classify(tiny_payload()).await;
    assert!(reading.is_unknown());
}

#[tokio::test]
async fn test_malformed_body_yields_unknown() {
    let addr = spawn_stub_service("HTTP/1.1 200 OK", "surprise, not json").await;
    let reading = client_for(addr).classify(tiny_payload()).await;
    assert!(reading.is_unknown());
}

#[tokio::test]
async fn test_connection_refused_yields_unknown() {
    // Bind and immediately drop to get a port nothing is listening on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let reading = client_for(addr).classify(tiny_payload()).await;
    assert!(reading.is_unknown());
}

struct OneFaceDetector;

#[async_trait]
impl FaceDetector for OneFaceDetector {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, PipelineError> {
        Ok(vec![Detection::new(
            BoundingBox::new(8.0, 8.0, 32.0, 32.0),
            0.95,
        )])
    }
}

#[tokio::test]
async fn test_failing_transport_resets_coordinator_to_unknown() {
    let addr = spawn_stub_service("HTTP/1.1 500 Internal Server Error", "").await;

    let mut config = PipelineConfig::default();
    config.frame_interval_ms = 1;
    config.emotion_interval_ms = 1;
    let client = HttpEmotionClient::new(format!("http://{}/classify", addr), &config);

    let coordinator = Coordinator::new(config, OneFaceDetector, client).unwrap();
    let frame = Frame::new(
        Bytes::from(vec![128u8; 64 * 64 * 4]),
        64,
        64,
        64 * 4,
        PixelFormat::Rgba8,
    )
    .unwrap();

    let outcome = coordinator.process_frame(frame).await.unwrap();
    assert_eq!(outcome, FrameOutcome::Requested);

    // The failed request degrades to the sentinel and releases the slot.
    assert!(coordinator.overlay().emotion.is_unknown());
    assert!(!coordinator.request_in_flight());
}
