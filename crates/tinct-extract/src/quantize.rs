//! Dominant color extraction.
//!
//! The [`Quantizer`] trait is the seam between the session layer and the
//! clustering machinery. The stock [`KmeansQuantizer`] converts sampled
//! pixels to Lab, runs k-means with a fixed seed, and returns cluster
//! centroids ordered most-populous-first, so index 0 is always the
//! image's dominant color.

use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, Srgb};
use tracing::debug;

use tinct_color::Rgb;

use crate::error::ExtractError;
use crate::surface::Surface;

/// Fewest colors an extraction may request.
pub const MIN_COUNT: usize = 3;

/// Most colors an extraction may request.
pub const MAX_COUNT: usize = 10;

/// Finest sampling stride: every pixel is considered.
pub const MIN_QUALITY: usize = 1;

/// Coarsest sampling stride: every 20th pixel is considered.
pub const MAX_QUALITY: usize = 20;

/// Reduces a surface to its dominant colors.
pub trait Quantizer {
    /// Extract up to `count` dominant colors, most dominant first.
    ///
    /// `quality` is the sampling stride: 1 examines every pixel, 20 every
    /// twentieth. Coarser is faster and usually indistinguishable.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidParameter`] when `count` is outside
    /// [`MIN_COUNT`]..=[`MAX_COUNT`] or `quality` outside
    /// [`MIN_QUALITY`]..=[`MAX_QUALITY`].
    fn quantize(
        &self,
        surface: &Surface,
        count: usize,
        quality: usize,
    ) -> Result<Vec<Rgb>, ExtractError>;
}

/// K-means clustering in Lab space.
///
/// The seed is fixed, so extraction is deterministic: the same image and
/// parameters always yield the same palette.
#[derive(Debug, Clone)]
pub struct KmeansQuantizer {
    max_iter: usize,
    converge: f32,
    seed: u64,
}

impl Default for KmeansQuantizer {
    fn default() -> Self {
        Self { max_iter: 20, converge: 1e-4, seed: 0 }
    }
}

impl KmeansQuantizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Quantizer for KmeansQuantizer {
    fn quantize(
        &self,
        surface: &Surface,
        count: usize,
        quality: usize,
    ) -> Result<Vec<Rgb>, ExtractError> {
        validate("count", count, MIN_COUNT, MAX_COUNT)?;
        validate("quality", quality, MIN_QUALITY, MAX_QUALITY)?;

        let samples: Vec<Lab> = surface
            .pixels()
            .iter()
            .step_by(quality)
            .map(|px| Srgb::<u8>::new(px.r, px.g, px.b).into_linear().into_color())
            .collect();

        if samples.is_empty() {
            return Ok(vec![]);
        }

        // A near-uniform image can have fewer samples than requested
        // clusters; k-means needs k <= n.
        let k = count.min(samples.len());
        let kmeans = get_kmeans(k, self.max_iter, self.converge, false, &samples, self.seed);
        if kmeans.centroids.is_empty() {
            return Err(ExtractError::ExtractionFailed(
                "clustering produced no centroids".to_string(),
            ));
        }

        // Order clusters by population so index 0 is the dominant color.
        let mut populations = vec![0usize; kmeans.centroids.len()];
        for &idx in &kmeans.indices {
            populations[idx as usize] += 1;
        }
        let mut order: Vec<usize> = (0..kmeans.centroids.len()).collect();
        order.sort_by(|&a, &b| populations[b].cmp(&populations[a]));

        let colors: Vec<Rgb> = order
            .into_iter()
            .map(|i| {
                let rgb_f32: Srgb<f32> = Srgb::from_linear(kmeans.centroids[i].into_color());
                let c = rgb_f32.into_format::<u8>();
                Rgb::new(c.red, c.green, c.blue)
            })
            .collect();

        debug!(
            samples = samples.len(),
            clusters = colors.len(),
            "extracted dominant colors"
        );
        Ok(colors)
    }
}

fn validate(
    name: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), ExtractError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ExtractError::InvalidParameter { name, value, min, max })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
