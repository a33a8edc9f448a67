//! Raw camera frame snapshots

use crate::error::{Error, Result};
use bytes::Bytes;
use std::time::Instant;

/// Bytes per pixel in the packed interleaved formats the pipeline accepts
pub const BYTES_PER_PIXEL: usize = 4;

/// Byte order of the packed 4-byte pixel plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Red, green, blue, alpha
    Rgba8,
    /// Blue, green, red, alpha
    Bgra8,
}

/// One captured image sample from the camera stream
///
/// The buffer is a single packed interleaved plane. The row stride may
/// exceed `width * 4` (hardware alignment padding), so rows must be
/// addressed through [`Frame::row`] rather than as one contiguous block.
/// Cloning is cheap: the pixel data is shared via `Bytes`.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Bytes,
    width: u32,
    height: u32,
    bytes_per_row: usize,
    format: PixelFormat,
    captured_at: Instant,
}

impl Frame {
    /// Create a frame, validating the buffer against the declared geometry
    pub fn new(
        data: Bytes,
        width: u32,
        height: u32,
        bytes_per_row: usize,
        format: PixelFormat,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Frame("Frame dimensions must be non-zero".to_string()));
        }

        let min_row = width as usize * BYTES_PER_PIXEL;
        if bytes_per_row < min_row {
            return Err(Error::Frame(format!(
                "Row stride {} shorter than {} bytes required for width {}",
                bytes_per_row, min_row, width
            )));
        }

        // The final row only needs width * 4 bytes, not the full stride.
        let required = bytes_per_row * (height as usize - 1) + min_row;
        if data.len() < required {
            return Err(Error::Frame(format!(
                "Buffer too small: {} bytes, need at least {}",
                data.len(),
                required
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            bytes_per_row,
            format,
            captured_at: Instant::now(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    /// Pixel data for row `y`, exactly `width * 4` bytes
    ///
    /// Panics if `y >= height`; callers index only through clamped regions.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {} out of bounds", y);
        let start = y as usize * self.bytes_per_row;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(len: usize) -> Bytes {
        Bytes::from(vec![0u8; len])
    }

    #[test]
    fn test_frame_new_packed() {
        let frame = Frame::new(buffer(8 * 4 * 4), 8, 4, 32, PixelFormat::Rgba8).unwrap();
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.bytes_per_row(), 32);
    }

    #[test]
    fn test_frame_new_padded_stride() {
        // 8 px wide rows padded out to 40 bytes; last row needs only 32.
        let frame = Frame::new(buffer(40 * 3 + 32), 8, 4, 40, PixelFormat::Rgba8).unwrap();
        assert_eq!(frame.bytes_per_row(), 40);
    }

    #[test]
    fn test_frame_new_zero_dimensions() {
        assert!(Frame::new(buffer(64), 0, 4, 32, PixelFormat::Rgba8).is_err());
        assert!(Frame::new(buffer(64), 8, 0, 32, PixelFormat::Rgba8).is_err());
    }

    #[test]
    fn test_frame_new_stride_too_small() {
        assert!(Frame::new(buffer(1024), 8, 4, 16, PixelFormat::Rgba8).is_err());
    }

    #[test]
    fn test_frame_new_buffer_too_small() {
        assert!(Frame::new(buffer(40 * 3 + 31), 8, 4, 40, PixelFormat::Rgba8).is_err());
    }

    #[test]
    fn test_frame_row_addressing() {
        let mut data = vec![0u8; 40 * 3 + 32];
        // Mark the first pixel of row 2 through the padded stride.
        data[2 * 40] = 0xAB;
        let frame = Frame::new(Bytes::from(data), 8, 4, 40, PixelFormat::Rgba8).unwrap();
        assert_eq!(frame.row(2)[0], 0xAB);
        assert_eq!(frame.row(2).len(), 32);
    }
}
