//! # tinct-palette — palette state and harmonious generation
//!
//! Three layers, bottom up:
//!
//! - [`generate`]: stateless analogous-harmony generator. Random base hue,
//!   30° steps, saturation and lightness drawn from ranges tuned to stay
//!   vivid and legible.
//! - [`Palette`]: an ordered list of colors plus a selection cursor, with
//!   the two sampling policies (replace wholesale, or accumulate with
//!   dedup and a cap).
//! - [`Session`]: the mode state machine. Switching modes clears the
//!   palette; each mode fills it through its own operation.
//!
//! All randomness comes through an injected [`rand::Rng`], so every layer
//! is deterministic under a seeded generator.

pub mod error;
pub mod generate;
pub mod palette;
pub mod session;

pub use error::PaletteError;
pub use generate::{MAX_COLORS, MIN_COLORS, analogous, analogous_hsl};
pub use palette::{MAX_PALETTE_LEN, Palette};
pub use session::{Mode, Session};
