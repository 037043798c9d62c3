//! Decoded images as flat RGB pixel buffers.
//!
//! A [`Surface`] drops alpha and format details at the door: every decoded
//! image becomes width × height [`Rgb`] pixels in row-major order. That is
//! all the eyedropper and the quantizer ever need.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use tracing::debug;

use tinct_color::Rgb;

use crate::error::ExtractError;

// ─── Surface ─────────────────────────────────────────────────────────────────

/// A decoded image: RGB pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Surface {
    /// Decode an image file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ImageLoadFailed`] when the file cannot be
    /// opened or its format cannot be decoded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let img = image::open(path)?;
        debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded image");
        Ok(Self::from_image(&img))
    }

    /// Build a surface from an already-decoded image, flattening to RGB.
    #[must_use]
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
            .collect();
        Self { width, height, pixels }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// The color at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// A downscaled copy fitting inside `max_w` × `max_h`, aspect ratio
    /// preserved. Returns a clone when the surface already fits.
    #[must_use]
    pub fn thumbnail(&self, max_w: u32, max_h: u32) -> Self {
        if self.width <= max_w && self.height <= max_h {
            return self.clone();
        }

        let scale = (f64::from(max_w) / f64::from(self.width))
            .min(f64::from(max_h) / f64::from(self.height));
        let w = ((f64::from(self.width) * scale).round() as u32).max(1);
        let h = ((f64::from(self.height) * scale).round() as u32).max(1);

        let mut img = RgbImage::new(self.width, self.height);
        for (i, px) in self.pixels.iter().enumerate() {
            let x = i as u32 % self.width;
            let y = i as u32 / self.width;
            img.put_pixel(x, y, image::Rgb([px.r, px.g, px.b]));
        }
        let resized = image::imageops::resize(&img, w, h, FilterType::Triangle);
        Self::from_image(&DynamicImage::ImageRgb8(resized))
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// A decode in flight on a background thread.
///
/// Spawn with [`Loading::start`], then poll [`try_finish`](Self::try_finish)
/// from the event loop. The result arrives exactly once; after that the
/// handle is spent and polls return `None`.
#[derive(Debug)]
pub struct Loading {
    path: PathBuf,
    rx: mpsc::Receiver<Result<Surface, ExtractError>>,
    done: bool,
}

impl Loading {
    /// Begin decoding `path` on a background thread.
    #[must_use]
    pub fn start(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::channel();

        let worker_path = path.clone();
        thread::spawn(move || {
            // Receiver may be gone if the user moved on; nothing to do then.
            let _ = tx.send(Surface::open(&worker_path));
        });

        Self { path, rx, done: false }
    }

    /// The path being decoded.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Poll for the decode result without blocking.
    ///
    /// Returns `Some` exactly once when the decode completes (or the
    /// decode thread dies), `None` while still in flight or after the
    /// result has been taken.
    pub fn try_finish(&mut self) -> Option<Result<Surface, ExtractError>> {
        if self.done {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.done = true;
                Some(result)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.done = true;
                Some(Err(ExtractError::ImageLoadFailed(
                    "decode thread exited before producing a result".to_string(),
                )))
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
