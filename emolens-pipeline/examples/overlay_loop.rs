//! Runs the coordinator against synthetic frames and stub collaborators
//!
//! Useful for eyeballing gate behavior and overlay output without a camera
//! or a classification service:
//!
//! ```sh
//! cargo run --example overlay_loop
//! ```

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use emolens_core::{
    BoundingBox, EmotionReading, FacePayload, Frame, PipelineConfig, PixelFormat,
};
use emolens_pipeline::{Coordinator, Detection, EmotionClassifier, FaceDetector, PipelineError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

/// Reports one face that drifts slowly across the frame
struct DriftingDetector {
    calls: AtomicUsize,
}

#[async_trait]
impl FaceDetector for DriftingDetector {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, PipelineError> {
        let step = self.calls.fetch_add(1, Ordering::Relaxed) as f32;
        let bbox = BoundingBox::new(40.0 + step * 2.0, 60.0, 96.0, 96.0);
        Ok(vec![Detection::new(bbox, 0.92)])
    }
}

/// Cycles through a few labels instead of calling a real service
struct CyclingClassifier {
    calls: AtomicUsize,
}

#[async_trait]
impl EmotionClassifier for CyclingClassifier {
    async fn classify(&self, payload: FacePayload) -> EmotionReading {
        let labels = ["happy", "neutral", "surprised"];
        let idx = self.calls.fetch_add(1, Ordering::Relaxed) % labels.len();
        info!(
            "Classifying {}x{} payload ({} bytes) -> {}",
            payload.width,
            payload.height,
            payload.bytes.len(),
            labels[idx]
        );
        EmotionReading::new(labels[idx], None)
    }
}

fn synthetic_frame(tick: u32) -> Result<Frame> {
    let mut data = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        let x = (i as u32 % WIDTH) as u8;
        px.copy_from_slice(&[x.wrapping_add(tick as u8), 128, 64, 255]);
    }
    Ok(Frame::new(
        Bytes::from(data),
        WIDTH,
        HEIGHT,
        (WIDTH * 4) as usize,
        PixelFormat::Rgba8,
    )?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut config = PipelineConfig::default();
    config.frame_interval_ms = 40;
    config.emotion_interval_ms = 400;

    let coordinator = Coordinator::new(
        config,
        DriftingDetector {
            calls: AtomicUsize::new(0),
        },
        CyclingClassifier {
            calls: AtomicUsize::new(0),
        },
    )?;

    // Frames arrive faster than the frame gate allows, so some are dropped.
    for tick in 0..60 {
        let frame = synthetic_frame(tick)?;
        let outcome = coordinator.process_frame(frame).await?;
        info!("Frame {}: {:?}", tick, outcome);

        let snapshot = coordinator.overlay();
        for rect in snapshot.display_rects((1280.0, 720.0), true) {
            info!(
                "  overlay [{}] at ({:.0}, {:.0})-({:.0}, {:.0})",
                snapshot.label(),
                rect.left,
                rect.top,
                rect.right,
                rect.bottom
            );
        }

        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    let stats = coordinator.stats();
    info!(
        "Session: {} seen, {} processed, {} requests, {} detection failures",
        stats.frames_seen, stats.frames_processed, stats.requests_issued,
        stats.detection_failures
    );

    Ok(())
}
