//! Extraction error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// The image could not be opened or decoded.
    ///
    /// Carries the decoder's message as a string so the error stays
    /// cheaply cloneable across the channel from the decode thread.
    #[error("failed to load image: {0}")]
    ImageLoadFailed(String),

    /// The clustering backend returned nothing usable.
    #[error("color extraction failed: {0}")]
    ExtractionFailed(String),

    /// A caller-supplied parameter fell outside its documented range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

impl From<image::ImageError> for ExtractError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoadFailed(err.to_string())
    }
}
