//! emolens-pipeline: async orchestration for the emotion overlay pipeline
//!
//! Drives camera frames through the detection, extraction, and
//! classification stages defined in emolens-core. The coordinator owns all
//! mutable session state and exposes an observable overlay snapshot for a
//! rendering layer to consume; face detection and emotion classification
//! are external collaborators reached through the [`FaceDetector`] and
//! [`EmotionClassifier`] traits.

pub mod classify;
pub mod coordinator;
pub mod detector;
pub mod error;
pub mod overlay;

pub use classify::{EmotionClassifier, HttpEmotionClient};
pub use coordinator::{Coordinator, FrameOutcome, PipelineStats};
pub use detector::{Detection, FaceDetector};
pub use error::PipelineError;
pub use overlay::OverlaySnapshot;
