//! emolens-core: frame processing primitives for the emotion overlay pipeline
//!
//! Pure, synchronous building blocks: frame snapshots, bounding-box
//! clamping, display-space coordinate mapping, rate-limit gates, and the
//! face-region extractor that turns a raw pixel buffer into an encoded
//! upload payload. No network or async code lives here; orchestration is
//! provided by emolens-pipeline.

pub mod config;
pub mod emotion;
pub mod error;
pub mod extract;
pub mod frame;
pub mod gate;
pub mod geometry;

pub use config::PipelineConfig;
pub use emotion::{Emotion, EmotionReading};
pub use error::Error;
pub use extract::{FacePayload, PayloadFormat, RegionExtractor};
pub use frame::{Frame, PixelFormat};
pub use geometry::{BoundingBox, ClampedRegion, DisplayRect};
