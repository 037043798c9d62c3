//! # tinct-color — exact color model conversions
//!
//! The canonical color of the whole system is an 8-bit-per-channel RGB
//! value ([`Rgb`]), displayed as an uppercase `#RRGGBB` hex string.
//! [`Hsl`] is the derived representation used for harmonious palette
//! generation and display.
//!
//! # Conversion contract
//!
//! ```text
//! hex ←→ Rgb          exact both ways (case-normalized)
//! Hsl  → Rgb → hex    bit-for-bit at integer degree/percent granularity
//! Rgb  → Hsl          computed in floating point, rounded only for display
//! ```
//!
//! RGB↔hex round trips are lossless. HSL round trips may lose at most one
//! RGB unit per channel: an `Hsl` rounded to integers quantizes harder than
//! the 8-bit channels it came from. That is an accepted, documented boundary
//! — callers that need exactness keep the `Rgb`.
//!
//! Numeric channel inputs are clamped, never rejected; only structurally
//! malformed hex strings fail ([`ColorError::InvalidColorFormat`]).

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Channel math truncations are guarded by explicit clamps.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod error;
pub mod hsl;
pub mod rgb;

pub use error::ColorError;
pub use hsl::Hsl;
pub use rgb::Rgb;
