//! Pipeline coordinator: the only component with mutable session state

use crate::classify::EmotionClassifier;
use crate::detector::FaceDetector;
use crate::error::PipelineError;
use crate::overlay::OverlaySnapshot;
use emolens_core::{gate, Frame, PipelineConfig, RegionExtractor};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// What a single frame callback ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Dropped by the frame gate
    Throttled,
    /// Processed, no faces found
    NoFaces,
    /// Faces published to the overlay, no classification request issued
    DetectedOnly,
    /// Faces published and a classification request completed
    Requested,
}

/// Diagnostic counters, monotonically increasing over the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames_seen: u64,
    pub frames_processed: u64,
    pub requests_issued: u64,
    pub detection_failures: u64,
}

#[derive(Default)]
struct Timing {
    last_processed: Option<Instant>,
    last_requested: Option<Instant>,
}

struct SessionState {
    timing: Mutex<Timing>,
    overlay: RwLock<OverlaySnapshot>,
    in_flight: AtomicBool,
    frames_seen: AtomicU64,
    frames_processed: AtomicU64,
    requests_issued: AtomicU64,
    detection_failures: AtomicU64,
}

/// Drives frames through detection, extraction, and classification
///
/// Frame callbacks may run concurrently; only the classification request is
/// serialized, through the in-flight flag. All session state lives behind
/// this struct, so clones share one session.
pub struct Coordinator<D, C> {
    config: Arc<PipelineConfig>,
    detector: Arc<D>,
    classifier: Arc<C>,
    extractor: Arc<RegionExtractor>,
    state: Arc<SessionState>,
}

impl<D, C> Clone for Coordinator<D, C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            detector: self.detector.clone(),
            classifier: self.classifier.clone(),
            extractor: self.extractor.clone(),
            state: self.state.clone(),
        }
    }
}

impl<D, C> Coordinator<D, C>
where
    D: FaceDetector + 'static,
    C: EmotionClassifier + 'static,
{
    pub fn new(
        config: PipelineConfig,
        detector: D,
        classifier: C,
    ) -> Result<Self, PipelineError> {
        config
            .validate()
            .map_err(emolens_core::Error::Config)?;

        let extractor = RegionExtractor::from_config(&config);
        info!(
            "Coordinator started: frame gate {}ms, emotion gate {}ms",
            config.frame_interval_ms, config.emotion_interval_ms
        );

        Ok(Self {
            config: Arc::new(config),
            detector: Arc::new(detector),
            classifier: Arc::new(classifier),
            extractor: Arc::new(extractor),
            state: Arc::new(SessionState {
                timing: Mutex::new(Timing::default()),
                overlay: RwLock::new(OverlaySnapshot::empty()),
                in_flight: AtomicBool::new(false),
                frames_seen: AtomicU64::new(0),
                frames_processed: AtomicU64::new(0),
                requests_issued: AtomicU64::new(0),
                detection_failures: AtomicU64::new(0),
            }),
        })
    }

    /// Handle one camera frame callback
    ///
    /// Detection failures return an error after dropping the frame; every
    /// other failure path degrades to "no update this cycle" and reports
    /// what happened through the outcome.
    pub async fn process_frame(&self, frame: Frame) -> Result<FrameOutcome, PipelineError> {
        self.state.frames_seen.fetch_add(1, Ordering::Relaxed);

        {
            let mut timing = self.state.timing.lock();
            let now = Instant::now();
            if !gate::should_process_frame(now, timing.last_processed, self.config.frame_interval())
            {
                return Ok(FrameOutcome::Throttled);
            }
            timing.last_processed = Some(now);
        }
        self.state.frames_processed.fetch_add(1, Ordering::Relaxed);

        let detections = match self.detector.detect(&frame).await {
            Ok(detections) => detections,
            Err(e) => {
                self.state.detection_failures.fetch_add(1, Ordering::Relaxed);
                warn!("Detection failed, dropping frame: {}", e);
                return Err(e);
            }
        };

        // The face list is published even when empty so stale boxes never
        // linger on screen.
        {
            let mut overlay = self.state.overlay.write();
            overlay.faces = detections.iter().map(|d| d.bbox).collect();
            overlay.frame_size = (frame.width(), frame.height());
        }

        let Some(primary) = detections.first().copied() else {
            return Ok(FrameOutcome::NoFaces);
        };
        debug!(
            "Primary face at ({:.0}, {:.0}) {}x{}, confidence {:.2}",
            primary.bbox.left, primary.bbox.top, primary.bbox.width, primary.bbox.height,
            primary.confidence
        );

        // Crop and encode on a blocking worker so the frame-delivery path
        // is never starved by pixel work.
        let extractor = self.extractor.clone();
        let payload = {
            let frame = frame.clone();
            match tokio::task::spawn_blocking(move || extractor.extract(&frame, &primary.bbox))
                .await
            {
                Ok(Ok(payload)) => payload,
                Ok(Err(e)) => {
                    debug!("Skipping emotion request: {}", e);
                    return Ok(FrameOutcome::DetectedOnly);
                }
                Err(e) => {
                    error!("Extraction worker failed: {}", e);
                    return Err(PipelineError::Worker(e.to_string()));
                }
            }
        };

        {
            let mut timing = self.state.timing.lock();
            let now = Instant::now();
            if !gate::should_request_emotion(
                now,
                timing.last_requested,
                self.config.emotion_interval(),
            ) {
                return Ok(FrameOutcome::DetectedOnly);
            }

            // Single serialization point: one request in flight at a time.
            if self
                .state
                .in_flight
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                debug!("Emotion request already in flight, skipping");
                return Ok(FrameOutcome::DetectedOnly);
            }
            timing.last_requested = Some(now);
        }

        self.state.requests_issued.fetch_add(1, Ordering::Relaxed);
        let reading = self.classifier.classify(payload).await;
        if reading.is_unknown() {
            warn!("Classification yielded no usable label");
        } else {
            debug!("Classified emotion: {}", reading.label);
        }

        self.state.overlay.write().emotion = reading;
        self.state.in_flight.store(false, Ordering::Release);

        Ok(FrameOutcome::Requested)
    }

    /// Current overlay state for the rendering layer
    pub fn overlay(&self) -> OverlaySnapshot {
        self.state.overlay.read().clone()
    }

    /// Whether a classification request is outstanding
    pub fn request_in_flight(&self) -> bool {
        self.state.in_flight.load(Ordering::Acquire)
    }

    /// Diagnostic counters for this session
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            frames_seen: self.state.frames_seen.load(Ordering::Relaxed),
            frames_processed: self.state.frames_processed.load(Ordering::Relaxed),
            requests_issued: self.state.requests_issued.load(Ordering::Relaxed),
            detection_failures: self.state.detection_failures.load(Ordering::Relaxed),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
