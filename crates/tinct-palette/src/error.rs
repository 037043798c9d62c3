//! Palette error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// A caller-supplied parameter fell outside its documented range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_actionable() {
        let err = PaletteError::InvalidParameter {
            name: "count",
            value: 11,
            min: 3,
            max: 10,
        };
        assert_eq!(err.to_string(), "count must be between 3 and 10, got 11");
    }
}
