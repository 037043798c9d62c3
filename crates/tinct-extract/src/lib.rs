//! # tinct-extract — images in, colors out
//!
//! Two capabilities, both built on [`Surface`] (a decoded RGB pixel
//! buffer):
//!
//! - **Sampling**: read the exact color at a pixel, for the eyedropper.
//! - **Quantization**: reduce the whole surface to its dominant colors,
//!   through the [`Quantizer`] trait. The stock implementation runs
//!   k-means in Lab space and returns centroids most-populous-first.
//!
//! Decoding can take a moment for large files, so [`Loading`] runs it on
//! a background thread and hands the result back through a one-shot
//! channel the caller polls from its event loop.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod error;
pub mod quantize;
pub mod surface;

pub use error::ExtractError;
pub use quantize::{KmeansQuantizer, MAX_COUNT, MAX_QUALITY, MIN_COUNT, MIN_QUALITY, Quantizer};
pub use surface::{Loading, Surface};
