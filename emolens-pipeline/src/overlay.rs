//! Observable overlay state for a rendering layer

use emolens_core::{geometry, BoundingBox, DisplayRect, EmotionReading};

/// Point-in-time copy of what the rendering layer should draw
///
/// The coordinator publishes one of these after every processed frame; a
/// renderer polls it and maps the face boxes into its own coordinate space
/// at draw time, since the display size can change between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySnapshot {
    /// Detected faces in frame-pixel coordinates
    pub faces: Vec<BoundingBox>,
    /// Dimensions of the frame the faces were detected in
    pub frame_size: (u32, u32),
    /// Most recently completed classification
    pub emotion: EmotionReading,
}

impl OverlaySnapshot {
    pub fn empty() -> Self {
        Self {
            faces: Vec::new(),
            frame_size: (0, 0),
            emotion: EmotionReading::unknown(),
        }
    }

    /// Label to draw next to the primary face
    pub fn label(&self) -> &str {
        &self.emotion.label
    }

    /// Map the face boxes onto a display surface
    ///
    /// Returns an empty list until a frame has been processed, since the
    /// mapping needs a valid frame size.
    pub fn display_rects(&self, display_size: (f32, f32), mirrored: bool) -> Vec<DisplayRect> {
        let (frame_w, frame_h) = self.frame_size;
        if frame_w == 0 || frame_h == 0 {
            return Vec::new();
        }
        let frame_size = (frame_w as f32, frame_h as f32);
        self.faces
            .iter()
            .map(|bbox| geometry::map_to_display(bbox, frame_size, display_size, mirrored))
            .collect()
    }
}

impl Default for OverlaySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_maps_to_nothing() {
        let snapshot = OverlaySnapshot::empty();
        assert!(snapshot.display_rects((1920.0, 1080.0), false).is_empty());
        assert_eq!(snapshot.label(), "unknown");
    }

    #[test]
    fn test_display_rects_map_each_face() {
        let snapshot = OverlaySnapshot {
            faces: vec![
                BoundingBox::new(0.0, 0.0, 320.0, 240.0),
                BoundingBox::new(320.0, 240.0, 320.0, 240.0),
            ],
            frame_size: (640, 480),
            emotion: EmotionReading::new("happy", None),
        };
        let rects = snapshot.display_rects((1280.0, 960.0), false);
        assert_eq!(rects.len(), 2);
        assert!((rects[0].right - 640.0).abs() < f32::EPSILON);
        assert!((rects[1].left - 640.0).abs() < f32::EPSILON);
    }
}
