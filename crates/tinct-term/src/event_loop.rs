// SPDX-License-Identifier: MIT
//
// Event loop — the beating heart of the TUI.
//
// Hybrid event/tick model: the loop blocks on the input channel with a
// timeout, so input latency is near zero while idle CPU stays near zero.
// Ticks fire at a fixed interval for animations and timed state (notice
// expiry); resize arrives as SIGWINCH and is folded into the same loop.
//
// Rendering is a full repaint into a cell grid, batched into style runs
// and wrapped in synchronized output so the terminal swaps frames
// atomically. At palette-tool sizes a full frame is a few kilobytes;
// damage tracking would buy nothing.
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::input::{Event, Parser};
use crate::reader::InputReader;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ───────────────────────────────────────────────────────────────

/// Set by the signal handler; swapped back to false by the loop.
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn handle_sigwinch(_: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::SeqCst);
}

/// Install the SIGWINCH handler. `SA_RESTART` keeps interrupted reads
/// transparent to the rest of the program.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handle_sigwinch as usize;
        action.sa_flags = libc::SA_RESTART;
        libc::sigaction(libc::SIGWINCH, &raw const action, std::ptr::null_mut());
    }
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App Trait ──────────────────────────────────────────────────────────────

/// What the application wants the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// The application side of the event loop.
///
/// Implementors hold all application state; the loop owns the terminal,
/// the input machinery, and the frame buffer.
pub trait App {
    /// Handle one input event. Return [`Action::Quit`] to stop the loop.
    fn on_event(&mut self, event: Event) -> Action {
        let _ = event;
        Action::Continue
    }

    /// The terminal was resized.
    fn on_resize(&mut self, size: Size) {
        let _ = size;
    }

    /// Periodic tick. Return `true` to request a redraw.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the current state into the frame buffer.
    fn paint(&mut self, buf: &mut FrameBuffer);
}

// ─── Configuration ──────────────────────────────────────────────────────────

/// Event loop tuning.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Tick interval in microseconds. Also bounds how long the loop
    /// blocks waiting for input.
    pub tick_interval_us: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        // ~30 Hz. Plenty for notice expiry and crosshair feedback.
        Self {
            tick_interval_us: 33_333,
        }
    }
}

// ─── EventLoop ──────────────────────────────────────────────────────────────

/// Owns the terminal and drives an [`App`] until it quits.
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    config: LoopConfig,
}

impl EventLoop {
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            config: LoopConfig::default(),
        })
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run the application until it returns [`Action::Quit`].
    ///
    /// The terminal is restored before returning, including on error.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, input reading, or rendering
    /// fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let (mut reader, rx) = match InputReader::spawn() {
            Ok(pair) => pair,
            Err(e) => {
                let _ = self.terminal.leave();
                return Err(e);
            }
        };

        let result = self.run_inner(app, &rx);

        reader.stop();
        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut buf = FrameBuffer::new(size.cols, size.rows);
        let timeout = Duration::from_micros(self.config.tick_interval_us);

        // First frame before any input.
        self.present(app, &mut buf)?;

        loop {
            let mut dirty = false;

            match rx.recv_timeout(timeout) {
                Ok(bytes) => {
                    for event in self.parser.advance(&bytes) {
                        match app.on_event(event) {
                            Action::Quit => return Ok(()),
                            Action::Continue => {}
                        }
                    }
                    dirty = true;
                }
                Err(RecvTimeoutError::Timeout) => {
                    // A buffered lone ESC resolves to the Escape key now.
                    if self.parser.has_pending() {
                        for event in self.parser.flush() {
                            match app.on_event(event) {
                                Action::Quit => return Ok(()),
                                Action::Continue => {}
                            }
                        }
                        dirty = true;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }

            if SIGWINCH_RECEIVED.swap(false, Ordering::SeqCst) {
                let size = self.terminal.refresh_size();
                buf.resize(size.cols, size.rows);
                app.on_resize(size);
                dirty = true;
            }

            if app.on_tick() {
                dirty = true;
            }

            if dirty {
                self.present(app, &mut buf)?;
            }
        }
    }

    /// Paint the app into the buffer and write the frame to the terminal.
    fn present(&mut self, app: &mut impl App, buf: &mut FrameBuffer) -> io::Result<()> {
        buf.clear();
        app.paint(buf);

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        render_frame(&mut lock, buf)?;
        lock.flush()
    }
}

// ─── Renderer ───────────────────────────────────────────────────────────────

/// Write one full frame as ANSI output.
///
/// Each row gets one cursor move; within a row, cells with the same
/// style are emitted as a run under a single SGR prefix. Continuation
/// cells are skipped since the wide character before them already
/// covered their column.
fn render_frame(w: &mut impl Write, buf: &FrameBuffer) -> io::Result<()> {
    ansi::begin_sync(w)?;

    for y in 0..buf.height() {
        let Some(row) = buf.row(y) else { continue };
        ansi::cursor_to(w, 0, y)?;

        let mut current: Option<crate::cell::Cell> = None;
        for cell in row {
            if cell.is_continuation() {
                continue;
            }
            let restyle = match current {
                Some(prev) => !prev.same_style(*cell),
                None => true,
            };
            if restyle {
                ansi::reset(w)?;
                ansi::attrs(w, cell.attrs)?;
                ansi::fg(w, cell.fg)?;
                ansi::bg(w, cell.bg)?;
                current = Some(*cell);
            }
            let mut encoded = [0u8; 4];
            w.write_all(cell.ch.encode_utf8(&mut encoded).as_bytes())?;
        }
        ansi::reset(w)?;
    }

    ansi::end_sync(w)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cell::{Attr, Cell, CellColor};

    struct NullApp;

    impl App for NullApp {
        fn paint(&mut self, _buf: &mut FrameBuffer) {}
    }

    #[test]
    fn default_config_ticks_around_thirty_hertz() {
        let config = LoopConfig::default();
        assert_eq!(config.tick_interval_us, 33_333);
    }

    #[test]
    fn app_defaults_continue_and_stay_clean() {
        let mut app = NullApp;
        assert_eq!(
            app.on_event(crate::input::press(crate::input::KeyCode::Char('x'))),
            Action::Continue
        );
        assert!(!app.on_tick());
        app.on_resize(Size { cols: 10, rows: 10 });
    }

    #[test]
    fn render_frame_wraps_in_sync_markers() {
        let buf = FrameBuffer::new(2, 1);
        let mut out = Vec::new();
        render_frame(&mut out, &buf).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("\x1b[?2026h"));
        assert!(s.ends_with("\x1b[?2026l"));
    }

    #[test]
    fn render_frame_batches_same_style_runs() {
        let mut buf = FrameBuffer::new(3, 1);
        let style = CellColor::Rgb(10, 20, 30);
        for x in 0..3 {
            buf.set(x, 0, Cell::styled('a', style, CellColor::Default, Attr::empty()));
        }
        let mut out = Vec::new();
        render_frame(&mut out, &buf).unwrap();
        let s = String::from_utf8(out).unwrap();
        // One fg sequence for the whole run of three cells.
        assert_eq!(s.matches("\x1b[38;2;10;20;30m").count(), 1);
        assert!(s.contains("aaa"));
    }

    #[test]
    fn render_frame_restyles_on_change() {
        let mut buf = FrameBuffer::new(2, 1);
        buf.set(0, 0, Cell::styled('a', CellColor::Rgb(1, 1, 1), CellColor::Default, Attr::empty()));
        buf.set(1, 0, Cell::styled('b', CellColor::Rgb(2, 2, 2), CellColor::Default, Attr::empty()));
        let mut out = Vec::new();
        render_frame(&mut out, &buf).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("\x1b[38;2;1;1;1m"));
        assert!(s.contains("\x1b[38;2;2;2;2m"));
    }

    #[test]
    fn render_frame_skips_continuation_cells() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.draw_str(0, 0, "色", CellColor::Default, CellColor::Default, Attr::empty());
        let mut out = Vec::new();
        render_frame(&mut out, &buf).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s.matches('色').count(), 1);
        assert!(!s.contains('\0'));
    }

    #[test]
    fn render_frame_positions_each_row() {
        let buf = FrameBuffer::new(2, 3);
        let mut out = Vec::new();
        render_frame(&mut out, &buf).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("\x1b[1;1H"));
        assert!(s.contains("\x1b[2;1H"));
        assert!(s.contains("\x1b[3;1H"));
    }
}
