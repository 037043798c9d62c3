// SPDX-License-Identifier: MIT
//
// tinct-term — a small terminal layer for the palette studio.
//
// Raw mode and alternate screen with RAII restore, a cell grid to paint
// into, an input parser (keys plus SGR mouse clicks), and an event loop
// that ties them together behind the `App` trait. Truecolor only: the
// whole point of the application is showing exact RGB values.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod event_loop;
pub mod input;
pub mod reader;
pub mod terminal;

pub use buffer::FrameBuffer;
pub use cell::{Attr, Cell, CellColor};
pub use event_loop::{Action, App, EventLoop};
pub use input::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use terminal::{Size, Terminal};
