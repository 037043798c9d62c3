//! Color model error type.

use thiserror::Error;

/// Errors from parsing color strings.
///
/// Out-of-range *numeric* inputs never produce an error — channel values
/// are clamped on the way in. Only structurally malformed strings fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not a six-hexit `#RRGGBB` triplet
    /// (leading `#` optional, case-insensitive).
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_offender() {
        let err = ColorError::InvalidColorFormat("not-a-color".into());
        assert_eq!(err.to_string(), "invalid color format: \"not-a-color\"");
    }
}
