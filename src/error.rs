use thiserror::Error;

use crate::types::MaskShape;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mask shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: MaskShape,
        actual: MaskShape,
    },

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Landmark {landmark} at index {index} is outside the mask (limit {limit})")]
    OutOfBounds {
        landmark: &'static str,
        index: usize,
        limit: usize,
    },

    #[error("No foreground pixel in the {section} section of the mask")]
    EmptySection { section: &'static str },

    #[error("Division by zero: {name} must be finite and non-zero")]
    ZeroDivisor { name: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
