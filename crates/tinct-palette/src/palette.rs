//! The palette itself: an ordered color list plus a selection cursor.
//!
//! Two ways colors get in:
//!
//! - **Replace**: the whole list is swapped out at once (generation,
//!   extraction, eyedropper-with-replace). Selection is rebuilt from
//!   scratch.
//! - **Accumulate**: a single color is prepended to what's there, with the
//!   list capped and colors already present left untouched. This is the
//!   "collect swatches one click at a time" policy.

use tinct_color::Rgb;

/// Most colors the accumulating policy will retain.
pub const MAX_PALETTE_LEN: usize = 10;

/// An ordered list of colors with at most one selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
    selected: Option<usize>,
}

impl Palette {
    /// An empty palette with no selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { colors: Vec::new(), selected: None }
    }

    /// The colors in display order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the selected color, if any.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected color, if any.
    #[must_use]
    pub fn selected_color(&self) -> Option<Rgb> {
        self.selected.map(|i| self.colors[i])
    }

    /// Swap in a whole new color list. The first color becomes the
    /// selection; an empty list leaves nothing selected.
    pub fn replace(&mut self, colors: Vec<Rgb>) {
        self.selected = if colors.is_empty() { None } else { Some(0) };
        self.colors = colors;
    }

    /// Replace the whole palette with a single color and select it.
    ///
    /// This is the eyedropper's policy: the sampled color *becomes* the
    /// palette.
    pub fn replace_with(&mut self, color: Rgb) {
        self.colors = vec![color];
        self.selected = Some(0);
    }

    /// Prepend a color and cap the list at [`MAX_PALETTE_LEN`]. The new
    /// color is selected.
    ///
    /// Re-sampling a color the palette already holds is a no-op: the list
    /// order and selection stay exactly as they were.
    pub fn accumulate(&mut self, color: Rgb) {
        if self.colors.contains(&color) {
            return;
        }
        self.colors.insert(0, color);
        self.colors.truncate(MAX_PALETTE_LEN);
        self.selected = Some(0);
    }

    /// Select the color at `index`. Out-of-range indices are ignored.
    ///
    /// Selecting the already-selected index is a no-op, not a toggle.
    pub fn select(&mut self, index: usize) {
        if index < self.colors.len() {
            self.selected = Some(index);
        }
    }

    /// Move the selection one step right, wrapping. Selects the first
    /// color when nothing is selected yet.
    pub fn select_next(&mut self) {
        if self.colors.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.colors.len(),
            None => 0,
        });
    }

    /// Move the selection one step left, wrapping. Selects the last
    /// color when nothing is selected yet.
    pub fn select_prev(&mut self) {
        if self.colors.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + self.colors.len() - 1) % self.colors.len(),
            None => self.colors.len() - 1,
        });
    }

    /// Drop all colors and the selection.
    pub fn clear(&mut self) {
        self.colors.clear();
        self.selected = None;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
