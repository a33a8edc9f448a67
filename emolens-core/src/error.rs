//! Error types for emolens-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Frame error: {0}")]
    Frame(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
