// SPDX-License-Identifier: MIT
//
// Cell — the atomic unit of terminal rendering.
//
// Every character position on screen is a Cell: one character, foreground
// and background colors, a few text attributes. The renderer's job is to
// turn a grid of these into ANSI output.
//
// Wide characters (CJK, some emoji) occupy two columns. The first cell
// holds the character; the second is a continuation cell (ch = '\0') that
// the renderer skips while still applying its background.

// ─── CellColor ───────────────────────────────────────────────────────────────

/// A color as the terminal sees it.
///
/// Truecolor or the terminal's own default — nothing in between. The
/// application deals in exact RGB; downgrading to palette approximations
/// would defeat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit color.
    Rgb(u8, u8, u8),

    /// Terminal default (inherits the user's terminal theme).
    #[default]
    Default,
}

// ─── Attr ────────────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes as a compact bitfield, mapping to SGR parameters.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD    = 1 << 0;
        /// SGR 2 — decreased intensity.
        const DIM     = 1 << 1;
        /// SGR 7 — swap foreground and background.
        const INVERSE = 1 << 2;
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// Continuation marker for the second column of a wide character.
const CONTINUATION: char = '\0';

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character to display. `'\0'` marks a wide-char continuation.
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Cell {
    /// An empty cell: space, default colors, no attributes.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    /// A cell with a character and default styling.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: CellColor::Default,
            bg: CellColor::Default,
            attrs: Attr::empty(),
        }
    }

    /// A fully styled cell.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self { ch, fg, bg, attrs }
    }

    /// A continuation cell carrying its owner's colors for background fill.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self { ch: CONTINUATION, fg, bg, attrs }
    }

    /// Whether this is the second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// Whether two cells share fg, bg, and attributes.
    ///
    /// The renderer batches runs of same-styled cells into a single SGR
    /// prefix.
    #[inline]
    #[must_use]
    pub fn same_style(self, other: Self) -> bool {
        self.fg == other.fg && self.bg == other.bg && self.attrs == other.attrs
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
