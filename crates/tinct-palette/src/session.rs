//! The mode state machine.
//!
//! A session is always in exactly one [`Mode`]. Each mode has its own way
//! of filling the palette, and switching modes discards the previous
//! mode's colors — palettes never leak across modes.

use rand::Rng;

use tinct_color::Rgb;

use crate::error::PaletteError;
use crate::generate;
use crate::palette::Palette;

/// How the palette gets its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Generated analogous harmonies.
    #[default]
    Random,

    /// Dominant colors extracted from an image.
    Image,

    /// Individual pixels sampled from an image.
    Eyedropper,
}

impl Mode {
    /// Display label for the mode tab.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Image => "Image",
            Self::Eyedropper => "Eyedropper",
        }
    }

    /// The next mode in tab order, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Random => Self::Image,
            Self::Image => Self::Eyedropper,
            Self::Eyedropper => Self::Random,
        }
    }
}

/// A palette session: current mode plus the palette it is building.
#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: Mode,
    palette: Palette,
}

impl Session {
    /// A fresh session in [`Mode::Random`] with an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Switch to `mode`, clearing the palette.
    ///
    /// Switching to the mode already active is a no-op — the palette
    /// survives.
    pub fn switch(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.palette.clear();
        }
    }

    /// Replace the palette with `count` freshly generated analogous colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] when `count` is outside
    /// the generator's range; the existing palette is untouched on error.
    pub fn generate(&mut self, rng: &mut impl Rng, count: usize) -> Result<(), PaletteError> {
        let colors = generate::analogous(rng, count)?;
        self.palette.replace(colors);
        Ok(())
    }

    /// Replace the palette with extracted dominant colors.
    ///
    /// An empty extraction yields an empty palette, not an error — a
    /// degenerate image is a fact about the image, not a failure.
    pub fn apply_extraction(&mut self, colors: Vec<Rgb>) {
        self.palette.replace(colors);
    }

    /// Sample a color with the replacing policy: the palette becomes just
    /// this color, selected.
    pub fn sample_replacing(&mut self, color: Rgb) {
        self.palette.replace_with(color);
    }

    /// Sample a color with the accumulating policy: prepend, dedup, cap.
    pub fn sample_accumulating(&mut self, color: Rgb) {
        self.palette.accumulate(color);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
