//! Bounding boxes, clamping, and display-space coordinate mapping

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle locating a detected face in frame-pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// A bounding box clamped to lie fully inside a frame
///
/// Guarantees: `left < frame_width`, `top < frame_height`, `width >= 1`,
/// `height >= 1`, `left + width <= frame_width`, `top + height <= frame_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl ClampedRegion {
    /// Clamp `bbox` to the bounds of a `frame_width` x `frame_height` frame
    ///
    /// A box with non-positive width or height is degenerate and rejected;
    /// everything else is forced inside the frame with at least one pixel
    /// of extent on each axis.
    pub fn clamp(bbox: &BoundingBox, frame_width: u32, frame_height: u32) -> Result<Self> {
        if frame_width == 0 || frame_height == 0 {
            return Err(Error::InvalidRegion("Frame has zero extent".to_string()));
        }

        if !(bbox.width > 0.0) || !(bbox.height > 0.0) {
            return Err(Error::InvalidRegion(format!(
                "Degenerate box {}x{}",
                bbox.width, bbox.height
            )));
        }

        let left = (bbox.left.max(0.0) as u32).min(frame_width - 1);
        let top = (bbox.top.max(0.0) as u32).min(frame_height - 1);
        let width = (bbox.width as u32).clamp(1, frame_width - left);
        let height = (bbox.height as u32).clamp(1, frame_height - top);

        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }
}

/// Rectangle in display coordinates, ready for overlay drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DisplayRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Map a frame-space box onto a display surface
///
/// The frame is fitted into the display with a uniform scale and centered
/// letterboxing on the non-matching axis. Frame dimensions are expected to
/// be pre-swapped for sensor rotation, so both sizes are compared through
/// their height/width aspect ratios. If `mirrored` (front-facing camera)
/// the result is reflected horizontally.
///
/// Pure function; display size can change between renders, so callers
/// recompute this every frame.
pub fn map_to_display(
    bbox: &BoundingBox,
    frame_size: (f32, f32),
    display_size: (f32, f32),
    mirrored: bool,
) -> DisplayRect {
    let (frame_w, frame_h) = frame_size;
    let (display_w, display_h) = display_size;

    let image_aspect = frame_h / frame_w;
    let display_aspect = display_h / display_w;

    let (scale, dx, dy) = if display_aspect > image_aspect {
        // Display is taller: fill the width, letterbox vertically.
        let scale = display_w / frame_w;
        (scale, 0.0, (display_h - frame_h * scale) / 2.0)
    } else {
        // Image is taller: fill the height, letterbox horizontally.
        let scale = display_h / frame_h;
        (scale, (display_w - frame_w * scale) / 2.0, 0.0)
    };

    let rect = DisplayRect {
        left: bbox.left * scale + dx,
        top: bbox.top * scale + dy,
        right: bbox.right() * scale + dx,
        bottom: bbox.bottom() * scale + dy,
    };

    if mirrored {
        mirror_horizontal(&rect, display_w)
    } else {
        rect
    }
}

/// Reflect a display rectangle across the vertical center line
///
/// Involution: applying this twice with the same display width returns the
/// original rectangle.
pub fn mirror_horizontal(rect: &DisplayRect, display_width: f32) -> DisplayRect {
    DisplayRect {
        left: display_width - rect.right,
        top: rect.top,
        right: display_width - rect.left,
        bottom: rect.bottom,
    }
}
