// SPDX-License-Identifier: MIT
//
// Input parsing — raw stdin bytes to key and mouse events.
//
// The parser is incremental: bytes arrive in arbitrary chunks from the
// reader thread, and an escape sequence may be split across chunks. Each
// `advance` call consumes as many complete events as the buffer holds
// and keeps the incomplete tail for the next chunk. A lone ESC is
// ambiguous (Escape key vs. start of a sequence); it stays buffered
// until `flush` is called on a read timeout.

// ─── Event Types ─────────────────────────────────────────────────────────────

/// A parsed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

/// Logical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
    }
}

/// A mouse event with 0-indexed cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

// ─── Constructors ────────────────────────────────────────────────────────────

/// A plain key press with no modifiers.
#[inline]
#[must_use]
pub const fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::empty(),
    })
}

/// A Ctrl+letter press.
#[inline]
#[must_use]
pub const fn ctrl_key(c: char) -> Event {
    Event::Key(KeyEvent {
        code: KeyCode::Char(c),
        modifiers: Modifiers::CTRL,
    })
}

/// A key press with explicit modifiers.
#[inline]
#[must_use]
pub const fn key_with(code: KeyCode, modifiers: Modifiers) -> Event {
    Event::Key(KeyEvent { code, modifiers })
}

// ─── Parser ──────────────────────────────────────────────────────────────────

/// Result of attempting to parse one event from the front of the buffer.
enum Parsed {
    /// A complete event consuming `usize` bytes.
    Event(Event, usize),
    /// The buffer holds a prefix of a sequence; wait for more bytes.
    Incomplete,
    /// Unrecognized bytes to discard.
    Skip(usize),
}

/// Incremental input parser.
#[derive(Debug, Default)]
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feed a chunk of raw bytes, returning all complete events.
    pub fn advance(&mut self, bytes: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(bytes);

        let mut events = Vec::new();
        loop {
            if self.buf.is_empty() {
                break;
            }
            match try_parse(&self.buf) {
                Parsed::Event(event, consumed) => {
                    self.buf.drain(..consumed);
                    events.push(event);
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => {
                    self.buf.drain(..n);
                }
            }
        }
        events
    }

    /// Whether bytes are buffered awaiting completion.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Resolve buffered bytes on read timeout.
    ///
    /// A lone buffered ESC becomes the Escape key; any other leftover
    /// prefix is discarded as a broken sequence.
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.buf == [0x1B] {
            events.push(press(KeyCode::Escape));
        }
        self.buf.clear();
        events
    }
}

// ─── Byte Dispatch ───────────────────────────────────────────────────────────

fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),

        // Ctrl+A..Ctrl+Z, excluding the bytes that double as Tab (0x09),
        // Enter (0x0A/0x0D), and Backspace (0x08).
        b @ 0x01..=0x1A if !matches!(b, 0x08 | 0x09 | 0x0A | 0x0D) => {
            let c = (b + b'a' - 1) as char;
            Parsed::Event(ctrl_key(c), 1)
        }

        0x08 | 0x7F => Parsed::Event(press(KeyCode::Backspace), 1),
        0x09 => Parsed::Event(press(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Event(press(KeyCode::Enter), 1),

        b @ 0x20..=0x7E => Parsed::Event(press(KeyCode::Char(b as char)), 1),

        b if b >= 0x80 => parse_utf8(buf),

        _ => Parsed::Skip(1),
    }
}

// ─── Escape Sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        // Lone ESC so far — could be the Escape key or a sequence prefix.
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),

        // ESC ESC — treat as a single Escape key press.
        0x1B => Parsed::Event(press(KeyCode::Escape), 2),

        // Alt+printable.
        b @ 0x20..=0x7E => Parsed::Event(
            key_with(KeyCode::Char(b as char), Modifiers::ALT),
            2,
        ),

        // Alt+Ctrl+letter.
        b @ 0x01..=0x1A if !matches!(b, 0x08 | 0x09 | 0x0A | 0x0D) => {
            let c = (b + b'a' - 1) as char;
            Parsed::Event(
                key_with(KeyCode::Char(c), Modifiers::ALT | Modifiers::CTRL),
                2,
            )
        }

        _ => Parsed::Skip(2),
    }
}

/// Parse a CSI sequence (`ESC [ params final`).
fn parse_csi(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'[');

    // SGR mouse sequences have their own grammar (`ESC [ < ... M/m`).
    if buf.len() >= 3 && buf[2] == b'<' {
        return parse_sgr_mouse(buf);
    }

    // Scan for the final byte (0x40..=0x7E).
    let mut i = 2;
    while i < buf.len() {
        let b = buf[i];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(i + 1);
        }
        i += 1;
    }
    if i >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[i];
    let params = &buf[2..i];
    let len = i + 1;

    let code = match final_byte {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'Z' => {
            return Parsed::Event(key_with(KeyCode::Tab, Modifiers::SHIFT), len);
        }
        b'~' => {
            let (num, _) = parse_u16_at(params, 0);
            let code = match num {
                1 | 7 => KeyCode::Home,
                3 => KeyCode::Delete,
                4 | 8 => KeyCode::End,
                5 => KeyCode::PageUp,
                6 => KeyCode::PageDown,
                _ => return Parsed::Skip(len),
            };
            let modifiers = csi_modifiers(params);
            return Parsed::Event(key_with(code, modifiers), len);
        }
        _ => return Parsed::Skip(len),
    };

    let modifiers = csi_modifiers(params);
    Parsed::Event(key_with(code, modifiers), len)
}

/// Parse an SS3 sequence (`ESC O x`) — arrows and Home/End from
/// application cursor mode.
fn parse_ss3(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        _ => return Parsed::Skip(3),
    };
    Parsed::Event(press(code), 3)
}

// ─── SGR Mouse ───────────────────────────────────────────────────────────────

/// Parse an SGR mouse report: `ESC [ < cb ; x ; y (M|m)`.
///
/// `M` is press, `m` is release. Coordinates are 1-indexed on the wire
/// and converted to 0-indexed here.
fn parse_sgr_mouse(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 3 && buf[2] == b'<');

    // Find the terminating M/m.
    let mut end = 3;
    loop {
        if end >= buf.len() {
            return Parsed::Incomplete;
        }
        match buf[end] {
            b'M' | b'm' => break,
            b'0'..=b'9' | b';' => end += 1,
            _ => return Parsed::Skip(end + 1),
        }
    }

    let is_release = buf[end] == b'm';
    let len = end + 1;

    let mut pos = 3;
    let Some(cb) = parse_u16_from(buf, &mut pos) else {
        return Parsed::Skip(len);
    };
    if !skip_byte(buf, &mut pos, b';') {
        return Parsed::Skip(len);
    }
    let Some(x) = parse_u16_from(buf, &mut pos) else {
        return Parsed::Skip(len);
    };
    if !skip_byte(buf, &mut pos, b';') {
        return Parsed::Skip(len);
    }
    let Some(y) = parse_u16_from(buf, &mut pos) else {
        return Parsed::Skip(len);
    };

    let mut modifiers = Modifiers::empty();
    if cb & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 8 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    let kind = if cb & 64 != 0 {
        // Scroll wheel encodes direction in the low bits.
        if cb & 3 == 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        }
    } else {
        let Some(button) = decode_mouse_button(cb & 3) else {
            return Parsed::Skip(len);
        };
        if is_release {
            MouseEventKind::Release(button)
        } else {
            MouseEventKind::Press(button)
        }
    };

    Parsed::Event(
        Event::Mouse(MouseEvent {
            kind,
            x: x.saturating_sub(1),
            y: y.saturating_sub(1),
            modifiers,
        }),
        len,
    )
}

const fn decode_mouse_button(bits: u16) -> Option<MouseButton> {
    match bits {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

// ─── UTF-8 ──────────────────────────────────────────────────────────────────

/// Parse a multi-byte UTF-8 character starting at `buf[0]`.
fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };

    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    // All continuation bytes must be 0b10xxxxxx.
    if !buf[1..expected].iter().all(|b| b & 0xC0 == 0x80) {
        return Parsed::Skip(1);
    }

    match std::str::from_utf8(&buf[..expected]) {
        Ok(s) => match s.chars().next() {
            Some(c) => Parsed::Event(press(KeyCode::Char(c)), expected),
            None => Parsed::Skip(expected),
        },
        Err(_) => Parsed::Skip(1),
    }
}

// ─── Param Helpers ───────────────────────────────────────────────────────────

/// Parse a decimal number at `offset`, returning `(value, next_offset)`.
/// Missing digits parse as 0.
fn parse_u16_at(params: &[u8], offset: usize) -> (u16, usize) {
    let mut value: u16 = 0;
    let mut i = offset;
    while i < params.len() && params[i].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(u16::from(params[i] - b'0'));
        i += 1;
    }
    (value, i)
}

/// Parse a decimal number at `*pos`, advancing past the digits. Returns
/// `None` if no digit is present.
fn parse_u16_from(buf: &[u8], pos: &mut usize) -> Option<u16> {
    let start = *pos;
    let (value, next) = parse_u16_at(buf, start);
    if next == start {
        return None;
    }
    *pos = next;
    Some(value)
}

/// Consume one expected byte at `*pos`.
fn skip_byte(buf: &[u8], pos: &mut usize, expected: u8) -> bool {
    if *pos < buf.len() && buf[*pos] == expected {
        *pos += 1;
        true
    } else {
        false
    }
}

/// Extract xterm-style modifiers from CSI params (`1;5A` → Ctrl).
///
/// The modifier parameter is `1 + bitmask`, so subtract one before
/// decoding.
fn csi_modifiers(params: &[u8]) -> Modifiers {
    let (_, after_first) = parse_u16_at(params, 0);
    if after_first >= params.len() || params[after_first] != b';' {
        return Modifiers::empty();
    }
    let (param, _) = parse_u16_at(params, after_first + 1);
    if param == 0 {
        return Modifiers::empty();
    }
    decode_modifiers(param)
}

const fn decode_modifiers(param: u16) -> Modifiers {
    let mask = (param - 1) as u8;
    let mut bits = 0u8;
    if mask & 1 != 0 {
        bits |= Modifiers::SHIFT.bits();
    }
    if mask & 2 != 0 {
        bits |= Modifiers::ALT.bits();
    }
    if mask & 4 != 0 {
        bits |= Modifiers::CTRL.bits();
    }
    Modifiers::from_bits_truncate(bits)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
