// SPDX-License-Identifier: MIT
//
// FrameBuffer — the 2D cell grid everything paints to.
//
// Flat `Vec<Cell>` with row-major indexing so a row is contiguous in
// memory; the renderer scans it left to right. Wide characters take two
// columns: the first cell holds the character, the second a continuation
// cell carrying the same colors.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Attr, Cell, CellColor};

/// A 2D buffer of terminal cells.
///
/// # Examples
///
/// ```
/// use tinct_term::buffer::FrameBuffer;
/// use tinct_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// buf.set(5, 3, Cell::new('X'));
/// assert_eq!(buf.get(5, 3).unwrap().ch, 'X');
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer filled with empty cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether `(x, y)` is within the buffer.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell reference, or `None` out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// A single row as a slice, or `None` if `y` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// Write a cell, bounds-checked. Returns `true` if in bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Clear the buffer to empty cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize the buffer, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = usize::from(width) * usize::from(height);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    /// Fill a rectangle with copies of `cell`. The rectangle is clipped
    /// to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, cell: Cell) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                let idx = self.index(col, row);
                self.cells[idx] = cell;
            }
        }
    }

    /// Draw a string starting at `(x, y)`, advancing by display width.
    ///
    /// Wide characters get a continuation cell in their second column.
    /// Drawing stops at the right edge; a wide character that would
    /// straddle it is dropped. Returns the column after the last cell
    /// drawn.
    pub fn draw_str(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: CellColor,
        bg: CellColor,
        attrs: Attr,
    ) -> u16 {
        if y >= self.height {
            return x;
        }

        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col >= self.width || col + w > self.width {
                break;
            }

            self.set(col, y, Cell::styled(ch, fg, bg, attrs));
            if w == 2 {
                self.set(col + 1, y, Cell::continuation(fg, bg, attrs));
            }
            col += w;
        }
        col
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf = FrameBuffer::new(10, 4);
        assert_eq!((buf.width(), buf.height()), (10, 4));
        assert_eq!(buf.get(3, 2), Some(&Cell::EMPTY));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut buf = FrameBuffer::new(10, 4);
        assert!(buf.set(9, 3, Cell::new('Z')));
        assert_eq!(buf.get(9, 3).unwrap().ch, 'Z');
    }

    #[test]
    fn out_of_bounds_access_is_safe() {
        let mut buf = FrameBuffer::new(10, 4);
        assert!(!buf.set(10, 0, Cell::new('a')));
        assert!(!buf.set(0, 4, Cell::new('a')));
        assert_eq!(buf.get(10, 0), None);
        assert_eq!(buf.get(0, 4), None);
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut buf = FrameBuffer::new(4, 2);
        buf.set(1, 1, Cell::new('x'));
        buf.clear();
        assert_eq!(buf.get(1, 1), Some(&Cell::EMPTY));
    }

    #[test]
    fn resize_changes_dimensions_and_clears() {
        let mut buf = FrameBuffer::new(4, 2);
        buf.set(0, 0, Cell::new('x'));
        buf.resize(6, 3);
        assert_eq!((buf.width(), buf.height()), (6, 3));
        assert_eq!(buf.get(0, 0), Some(&Cell::EMPTY));
        assert_eq!(buf.get(5, 2), Some(&Cell::EMPTY));
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut buf = FrameBuffer::new(5, 5);
        let cell = Cell::styled(' ', CellColor::Default, CellColor::Rgb(1, 2, 3), Attr::empty());
        buf.fill_rect(3, 3, 10, 10, cell);
        assert_eq!(buf.get(4, 4), Some(&cell));
        assert_eq!(buf.get(2, 2), Some(&Cell::EMPTY));
    }

    #[test]
    fn draw_str_places_characters() {
        let mut buf = FrameBuffer::new(10, 2);
        let next = buf.draw_str(2, 0, "hi", CellColor::Default, CellColor::Default, Attr::empty());
        assert_eq!(next, 4);
        assert_eq!(buf.get(2, 0).unwrap().ch, 'h');
        assert_eq!(buf.get(3, 0).unwrap().ch, 'i');
    }

    #[test]
    fn draw_str_truncates_at_right_edge() {
        let mut buf = FrameBuffer::new(4, 1);
        let next = buf.draw_str(2, 0, "long", CellColor::Default, CellColor::Default, Attr::empty());
        assert_eq!(next, 4);
        assert_eq!(buf.get(3, 0).unwrap().ch, 'o');
    }

    #[test]
    fn draw_str_wide_chars_take_two_columns() {
        let mut buf = FrameBuffer::new(10, 1);
        let next = buf.draw_str(0, 0, "色", CellColor::Default, CellColor::Default, Attr::empty());
        assert_eq!(next, 2);
        assert_eq!(buf.get(0, 0).unwrap().ch, '色');
        assert!(buf.get(1, 0).unwrap().is_continuation());
    }

    #[test]
    fn draw_str_drops_wide_char_straddling_the_edge() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.draw_str(2, 0, "色", CellColor::Default, CellColor::Default, Attr::empty());
        assert_eq!(buf.get(2, 0), Some(&Cell::EMPTY));
    }

    #[test]
    fn draw_str_below_buffer_is_a_noop() {
        let mut buf = FrameBuffer::new(4, 1);
        let next = buf.draw_str(0, 5, "hi", CellColor::Default, CellColor::Default, Attr::empty());
        assert_eq!(next, 0);
    }

    #[test]
    fn row_slice_is_contiguous() {
        let mut buf = FrameBuffer::new(3, 2);
        buf.set(0, 1, Cell::new('a'));
        buf.set(2, 1, Cell::new('b'));
        let row = buf.row(1).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[0].ch, 'a');
        assert_eq!(row[2].ch, 'b');
        assert!(buf.row(2).is_none());
    }
}
