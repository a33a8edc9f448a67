//! Error types for emolens-pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Detection error: {0}")]
    Detection(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("Core error: {0}")]
    Core(#[from] emolens_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::Detection("cascade failed".to_string());
        assert!(err.to_string().contains("Detection error"));
        assert!(err.to_string().contains("cascade failed"));
    }

    #[test]
    fn test_error_from_core() {
        let core_err = emolens_core::Error::InvalidRegion("empty".to_string());
        let err: PipelineError = core_err.into();
        match err {
            PipelineError::Core(_) => {}
            _ => panic!("Expected Core error"),
        }
    }
}
