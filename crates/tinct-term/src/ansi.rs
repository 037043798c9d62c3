// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No
// state, no decisions about when to emit. Cursor positions are 0-indexed
// in our API and converted to 1-indexed for the terminal.

use std::io::{self, Write};

use crate::cell::{Attr, CellColor};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` (CUP; ANSI is 1-indexed).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes (SGR 0). The renderer must re-emit its style
/// after calling this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground color.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color.
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Emit SGR codes for text attributes as one CSI sequence
/// (`\x1b[1;7m` for bold + inverse). Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    w.write_all(b";")?;
                }
                w.write_all($code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, b"1");
    emit!(Attr::DIM, b"2");
    emit!(Attr::INVERSE, b"7");
    let _ = first;

    w.write_all(b"m")
}

// ─── Synchronized Output ─────────────────────────────────────────────────────

/// Begin synchronized output (DEC 2026) — the terminal buffers output
/// until [`end_sync`], preventing visible frame tearing.
#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

/// End synchronized output — render the buffered frame.
#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Alternate Screen ───────────────────────────────────────────────────────

/// Enter the alternate screen buffer (DEC 1049), preserving the user's
/// shell content for restore on exit.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Mouse Protocol ─────────────────────────────────────────────────────────

/// Enable SGR mouse click tracking (DEC 1000 + 1006).
///
/// Click granularity is all the eyedropper needs; SGR format (1006)
/// supports coordinates beyond column 223 and distinguishes press from
/// release.
pub fn enable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1000h")?;
    w.write_all(b"\x1b[?1006h")
}

/// Disable mouse tracking.
pub fn disable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1006l")?;
    w.write_all(b"\x1b[?1000l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cursor_to_is_one_indexed() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(emit(|w| cursor_to(w, 10, 20)), "\x1b[21;11H");
    }

    #[test]
    fn cursor_visibility_sequences() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn clear_and_reset_sequences() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn fg_truecolor() {
        assert_eq!(
            emit(|w| fg(w, CellColor::Rgb(255, 128, 0))),
            "\x1b[38;2;255;128;0m"
        );
    }

    #[test]
    fn fg_default() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
    }

    #[test]
    fn bg_truecolor() {
        assert_eq!(
            emit(|w| bg(w, CellColor::Rgb(0, 100, 200))),
            "\x1b[48;2;0;100;200m"
        );
    }

    #[test]
    fn bg_default() {
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
    }

    #[test]
    fn attrs_empty_emits_nothing() {
        assert_eq!(emit(|w| attrs(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_single() {
        assert_eq!(emit(|w| attrs(w, Attr::BOLD)), "\x1b[1m");
        assert_eq!(emit(|w| attrs(w, Attr::DIM)), "\x1b[2m");
        assert_eq!(emit(|w| attrs(w, Attr::INVERSE)), "\x1b[7m");
    }

    #[test]
    fn attrs_combined() {
        assert_eq!(
            emit(|w| attrs(w, Attr::BOLD | Attr::DIM | Attr::INVERSE)),
            "\x1b[1;2;7m"
        );
    }

    #[test]
    fn sync_sequences() {
        assert_eq!(emit(|w| begin_sync(w)), "\x1b[?2026h");
        assert_eq!(emit(|w| end_sync(w)), "\x1b[?2026l");
    }

    #[test]
    fn alt_screen_sequences() {
        assert_eq!(emit(|w| enter_alt_screen(w)), "\x1b[?1049h");
        assert_eq!(emit(|w| exit_alt_screen(w)), "\x1b[?1049l");
    }

    #[test]
    fn mouse_enable_is_click_plus_sgr() {
        let out = emit(|w| enable_mouse(w));
        assert!(out.contains("\x1b[?1000h"));
        assert!(out.contains("\x1b[?1006h"));
        assert!(!out.contains("\x1b[?1002h"));
    }

    #[test]
    fn mouse_disable_reverses_both() {
        let out = emit(|w| disable_mouse(w));
        assert!(out.contains("\x1b[?1006l"));
        assert!(out.contains("\x1b[?1000l"));
    }

    #[test]
    fn sequences_compose() {
        let mut buf = Vec::new();
        cursor_to(&mut buf, 5, 3).unwrap();
        fg(&mut buf, CellColor::Rgb(255, 0, 0)).unwrap();
        attrs(&mut buf, Attr::BOLD).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "\x1b[4;6H\x1b[38;2;255;0;0m\x1b[1m");
    }
}
