//! Configuration for the emotion overlay pipeline

use crate::extract::PayloadFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline configuration
///
/// Intervals are stored in milliseconds so the struct round-trips cleanly
/// through serde; use the accessor methods to obtain `Duration` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum interval between processed frames (milliseconds)
    pub frame_interval_ms: u64,
    /// Minimum interval between emotion classification requests (milliseconds)
    pub emotion_interval_ms: u64,
    /// Downscale factor applied to the cropped face before encoding
    /// (1.0 disables downscaling)
    pub downscale_factor: f32,
    /// JPEG encoding quality (1-100), ignored for PNG payloads
    pub jpeg_quality: u8,
    /// Encoding used for the upload payload
    pub payload_format: PayloadFormat,
    /// Base name (without extension) of the multipart file field
    pub upload_file_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 50,
            emotion_interval_ms: 2500,
            downscale_factor: 0.5,
            jpeg_quality: 80,
            payload_format: PayloadFormat::Jpeg,
            upload_file_name: "face".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Minimum interval between processed frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Minimum interval between emotion requests
    pub fn emotion_interval(&self) -> Duration {
        Duration::from_millis(self.emotion_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.frame_interval_ms == 0 {
            return Err("Frame interval must be non-zero".to_string());
        }

        if self.emotion_interval_ms < self.frame_interval_ms {
            return Err("Emotion interval must not be shorter than frame interval".to_string());
        }

        if !self.downscale_factor.is_finite()
            || self.downscale_factor <= 0.0
            || self.downscale_factor > 1.0
        {
            return Err("Downscale factor must be in (0, 1]".to_string());
        }

        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err("JPEG quality must be between 1 and 100".to_string());
        }

        if self.upload_file_name.is_empty() {
            return Err("Upload file name must not be empty".to_string());
        }

        Ok(())
    }
}
