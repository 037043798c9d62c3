//! The canonical color type: 8-bit-per-channel RGB.
//!
//! Everything else in the system (hex strings, HSL, extracted pixels) is a
//! view of or a path into this type. Hex parsing is strict on shape — six
//! hexits, optional `#` — and lenient on case; formatting is always
//! uppercase `#RRGGBB`.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;
use crate::hsl::Hsl;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A color as three 8-bit sRGB channels.
///
/// # Examples
///
/// ```
/// use tinct_color::Rgb;
///
/// let coral = Rgb::from_hex("#FF7F50").unwrap();
/// assert_eq!(coral, Rgb::new(255, 127, 80));
/// assert_eq!(coral.hex(), "#FF7F50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from 8-bit channel values.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from floating-point channel values in the 0–255 range.
    ///
    /// Values are rounded to the nearest integer and clamped into [0, 255].
    /// Out-of-range input is a caller convenience, not an error.
    #[must_use]
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: channel_to_u8(r),
            g: channel_to_u8(g),
            b: channel_to_u8(b),
        }
    }

    /// Parse a hex color string.
    ///
    /// Accepts exactly six hexits with an optional leading `#`, any letter
    /// case. Shorthand `#RGB`, alpha digits, and anything else malformed is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] carrying the original
    /// input when the string does not match that shape.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hexits = s.strip_prefix('#').unwrap_or(s);
        let bytes = hexits.as_bytes();
        if bytes.len() != 6 {
            return Err(ColorError::InvalidColorFormat(s.to_string()));
        }

        let parse_byte = |pair: &[u8]| -> Option<u8> {
            let hi = parse_hex_digit(pair[0])?;
            let lo = parse_hex_digit(pair[1])?;
            Some(hi << 4 | lo)
        };

        match (
            parse_byte(&bytes[0..2]),
            parse_byte(&bytes[2..4]),
            parse_byte(&bytes[4..6]),
        ) {
            (Some(r), Some(g), Some(b)) => Ok(Self { r, g, b }),
            _ => Err(ColorError::InvalidColorFormat(s.to_string())),
        }
    }

    /// Format as an uppercase `#RRGGBB` string.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to HSL.
    ///
    /// Hue is degrees in [0, 360), saturation and lightness are percent in
    /// [0, 100]. Achromatic colors report hue 0 and saturation 0.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let l = (max + min) / 2.0;

        if delta < f64::EPSILON {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let h = if (max - r).abs() < f64::EPSILON {
            ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl::new(h * 60.0, s * 100.0, l * 100.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Round a 0–255 float channel to u8, clamping out-of-range input.
#[inline]
fn channel_to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hex_formats_uppercase_with_hash() {
        assert_eq!(Rgb::new(255, 127, 80).hex(), "#FF7F50");
        assert_eq!(Rgb::new(0, 0, 0).hex(), "#000000");
        assert_eq!(Rgb::new(255, 255, 255).hex(), "#FFFFFF");
    }

    #[test]
    fn parse_accepts_optional_hash_and_any_case() {
        let expected = Rgb::new(255, 127, 80);
        assert_eq!(Rgb::from_hex("#FF7F50").unwrap(), expected);
        assert_eq!(Rgb::from_hex("ff7f50").unwrap(), expected);
        assert_eq!(Rgb::from_hex("#Ff7F50").unwrap(), expected);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in ["not-a-color", "#FFF", "#FF7F5", "#FF7F501", "", "#", "#GG0000"] {
            assert_eq!(
                Rgb::from_hex(input),
                Err(ColorError::InvalidColorFormat(input.to_string())),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_error_preserves_original_input() {
        // The reported string keeps the '#' even though parsing strips it.
        let err = Rgb::from_hex("#zzzzzz").unwrap_err();
        assert_eq!(err, ColorError::InvalidColorFormat("#zzzzzz".to_string()));
    }

    #[test]
    fn hex_round_trip_is_exact() {
        for hex in ["#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#C86432"] {
            assert_eq!(Rgb::from_hex(hex).unwrap().hex(), hex);
        }
    }

    #[test]
    fn round_trip_normalizes_case() {
        assert_eq!(Rgb::from_hex("#c86432").unwrap().hex(), "#C86432");
    }

    #[test]
    fn from_channels_rounds_and_clamps() {
        assert_eq!(Rgb::from_channels(127.4, 127.5, 127.6), Rgb::new(127, 128, 128));
        assert_eq!(Rgb::from_channels(-10.0, 300.0, 0.0), Rgb::new(0, 255, 0));
    }

    #[test]
    fn from_str_parses_like_from_hex() {
        let parsed: Rgb = "#8800FF".parse().unwrap();
        assert_eq!(parsed, Rgb::new(0x88, 0x00, 0xFF));
        assert!("oops".parse::<Rgb>().is_err());
    }

    #[test]
    fn display_matches_hex() {
        let c = Rgb::new(18, 52, 86);
        assert_eq!(format!("{c}"), c.hex());
    }

    #[test]
    fn to_hsl_primaries() {
        let red = Rgb::new(255, 0, 0).to_hsl().rounded();
        assert_eq!(red, (0, 100, 50));

        let green = Rgb::new(0, 255, 0).to_hsl().rounded();
        assert_eq!(green, (120, 100, 50));

        let blue = Rgb::new(0, 0, 255).to_hsl().rounded();
        assert_eq!(blue, (240, 100, 50));
    }

    #[test]
    fn to_hsl_achromatic_has_zero_hue_and_saturation() {
        assert_eq!(Rgb::new(0, 0, 0).to_hsl().rounded(), (0, 0, 0));
        assert_eq!(Rgb::new(255, 255, 255).to_hsl().rounded(), (0, 0, 100));
        assert_eq!(Rgb::new(128, 128, 128).to_hsl().rounded(), (0, 0, 50));
    }

    #[test]
    fn to_hsl_magenta_side_of_the_wheel() {
        // Hue formula goes negative for magenta-ish colors before wrapping.
        let magenta = Rgb::new(255, 0, 255).to_hsl().rounded();
        assert_eq!(magenta, (300, 100, 50));
    }
}
