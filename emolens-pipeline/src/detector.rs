//! Face detector seam

use crate::error::PipelineError;
use async_trait::async_trait;
use emolens_core::{BoundingBox, Frame};

/// One detected face in frame-pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub confidence: f32,
}

impl Detection {
    pub fn new(bbox: BoundingBox, confidence: f32) -> Self {
        Self { bbox, confidence }
    }
}

/// External face detection capability, consumed as a black box
///
/// Implementations return zero or more boxes per frame; detector errors
/// drop that frame only and never stop the pipeline. The coordinator uses
/// the first returned detection as the primary face, so implementations
/// must order their results deterministically for identical input.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    async fn detect(&self, frame: &Frame) -> Result<Vec<Detection>, PipelineError>;
}
