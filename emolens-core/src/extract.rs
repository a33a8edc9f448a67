//! Face-region extraction: crop, downscale, and encode

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::frame::{Frame, PixelFormat, BYTES_PER_PIXEL};
use crate::geometry::{BoundingBox, ClampedRegion};
use bytes::Bytes;
use image::{imageops, DynamicImage, ImageOutputFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::debug;

/// Encoding used for upload payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadFormat {
    Jpeg,
    Png,
}

impl PayloadFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            PayloadFormat::Jpeg => "image/jpeg",
            PayloadFormat::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            PayloadFormat::Jpeg => "jpg",
            PayloadFormat::Png => "png",
        }
    }
}

/// Encoded face crop ready for upload
///
/// Created fresh per classification attempt; ownership ends once the bytes
/// are handed to the transport.
#[derive(Debug, Clone)]
pub struct FacePayload {
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
    pub format: PayloadFormat,
}

/// Crops a face region out of a raw frame and re-encodes it
///
/// CPU-bound; the coordinator runs this on a blocking worker so frame
/// delivery is never starved by encoding.
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    downscale_factor: f32,
    jpeg_quality: u8,
    format: PayloadFormat,
}

impl RegionExtractor {
    pub fn new(downscale_factor: f32, jpeg_quality: u8, format: PayloadFormat) -> Self {
        Self {
            downscale_factor,
            jpeg_quality,
            format,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.downscale_factor,
            config.jpeg_quality,
            config.payload_format,
        )
    }

    /// Extract the clamped sub-rectangle of `frame` under `bbox` and encode it
    ///
    /// Returns `Error::InvalidRegion` for degenerate boxes; the caller skips
    /// the classification request for that frame.
    pub fn extract(&self, frame: &Frame, bbox: &BoundingBox) -> Result<FacePayload> {
        let region = ClampedRegion::clamp(bbox, frame.width(), frame.height())?;
        let cropped = crop_to_rgb(frame, &region);
        let raster = self.downscale(cropped);
        let (width, height) = raster.dimensions();

        let mut buf = Cursor::new(Vec::new());
        let dynamic = DynamicImage::ImageRgb8(raster);
        match self.format {
            PayloadFormat::Jpeg => {
                dynamic.write_to(&mut buf, ImageOutputFormat::Jpeg(self.jpeg_quality))?
            }
            PayloadFormat::Png => dynamic.write_to(&mut buf, ImageOutputFormat::Png)?,
        }

        let bytes = Bytes::from(buf.into_inner());
        debug!(
            "Extracted {}x{} region at ({}, {}) into {} {} bytes",
            region.width,
            region.height,
            region.left,
            region.top,
            bytes.len(),
            self.format.content_type()
        );

        Ok(FacePayload {
            bytes,
            width,
            height,
            format: self.format,
        })
    }

    fn downscale(&self, raster: RgbImage) -> RgbImage {
        if self.downscale_factor >= 1.0 {
            return raster;
        }
        let (w, h) = raster.dimensions();
        let target_w = ((w as f32 * self.downscale_factor).round() as u32).max(1);
        let target_h = ((h as f32 * self.downscale_factor).round() as u32).max(1);
        imageops::resize(&raster, target_w, target_h, imageops::FilterType::Triangle)
    }
}

/// Copy the region out of the packed plane, row by row through the declared
/// stride, dropping alpha and normalizing channel order to RGB
fn crop_to_rgb(frame: &Frame, region: &ClampedRegion) -> RgbImage {
    let mut out = Vec::with_capacity(region.width as usize * region.height as usize * 3);
    let left = region.left as usize * BYTES_PER_PIXEL;

    for y in region.top..region.top + region.height {
        let row = &frame.row(y)[left..left + region.width as usize * BYTES_PER_PIXEL];
        for px in row.chunks_exact(BYTES_PER_PIXEL) {
            match frame.format() {
                PixelFormat::Rgba8 => out.extend_from_slice(&px[..3]),
                PixelFormat::Bgra8 => out.extend_from_slice(&[px[2], px[1], px[0]]),
            }
        }
    }

    // Length matches width * height * 3 by construction.
    RgbImage::from_raw(region.width, region.height, out)
        .expect("cropped buffer matches region dimensions")
}
