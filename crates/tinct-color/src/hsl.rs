//! HSL — the generator's working representation.
//!
//! Palette generation thinks in hue angles and percent saturation/lightness;
//! this type carries those values and converts them to the canonical [`Rgb`]
//! on demand. Construction normalizes rather than validates: hue wraps into
//! [0, 360), saturation and lightness clamp into [0, 100].

use std::fmt;

use crate::rgb::Rgb;

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color as hue (degrees), saturation (percent), lightness (percent).
///
/// # Examples
///
/// ```
/// use tinct_color::Hsl;
///
/// let red = Hsl::new(0.0, 100.0, 50.0);
/// assert_eq!(red.hex(), "#FF0000");
///
/// // Hue wraps, saturation and lightness clamp.
/// let wrapped = Hsl::new(-30.0, 150.0, 50.0);
/// assert_eq!(wrapped.rounded(), (330, 100, 50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees, [0, 360).
    pub h: f64,

    /// Saturation in percent, [0, 100].
    pub s: f64,

    /// Lightness in percent, [0, 100].
    pub l: f64,
}

impl Hsl {
    /// Create an HSL color, normalizing each component into its range.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Convert to 8-bit RGB.
    ///
    /// Standard piecewise chroma construction; the only precision loss is
    /// the final rounding to 8-bit channels.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = self.h;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r1, g1, b1) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::from_channels((r1 + m) * 255.0, (g1 + m) * 255.0, (b1 + m) * 255.0)
    }

    /// Format as an uppercase `#RRGGBB` string (via [`Rgb`]).
    #[must_use]
    pub fn hex(self) -> String {
        self.to_rgb().hex()
    }

    /// Round components to integers for display: `(h°, s%, l%)`.
    ///
    /// A hue that rounds up to 360 wraps back to 0.
    #[must_use]
    pub fn rounded(self) -> (u16, u8, u8) {
        let h = (self.h.round() as u16) % 360;
        (h, self.s.round() as u8, self.l.round() as u8)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, s, l) = self.rounded();
        write!(f, "hsl({h}, {s}%, {l}%)")
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsl()
    }
}

/// Normalize a hue angle to the range [0, 360).
#[inline]
fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn known_hex_values() {
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).hex(), "#FF0000");
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).hex(), "#00FF00");
        assert_eq!(Hsl::new(240.0, 100.0, 50.0).hex(), "#0000FF");
        assert_eq!(Hsl::new(0.0, 0.0, 0.0).hex(), "#000000");
        assert_eq!(Hsl::new(0.0, 0.0, 100.0).hex(), "#FFFFFF");
        assert_eq!(Hsl::new(0.0, 0.0, 50.0).hex(), "#808080");
    }

    #[test]
    fn hue_wraps_into_range() {
        assert_eq!(Hsl::new(360.0, 100.0, 50.0).h, 0.0);
        assert_eq!(Hsl::new(390.0, 100.0, 50.0).h, 30.0);
        assert_eq!(Hsl::new(-30.0, 100.0, 50.0).h, 330.0);
        assert_eq!(Hsl::new(-390.0, 100.0, 50.0).h, 330.0);
    }

    #[test]
    fn saturation_and_lightness_clamp() {
        let c = Hsl::new(180.0, 150.0, -20.0);
        assert_eq!((c.s, c.l), (100.0, 0.0));

        let d = Hsl::new(180.0, -1.0, 120.0);
        assert_eq!((d.s, d.l), (0.0, 100.0));
    }

    #[test]
    fn wrapped_hue_converts_like_its_canonical_angle() {
        assert_eq!(Hsl::new(480.0, 100.0, 50.0).hex(), Hsl::new(120.0, 100.0, 50.0).hex());
    }

    #[test]
    fn hsl_survives_a_trip_through_rgb() {
        // Integer-degree hues at the generator's saturation/lightness ranges
        // come back within a degree after 8-bit quantization.
        for h in [0.0, 30.0, 60.0, 150.0, 270.0, 330.0] {
            let original = Hsl::new(h, 80.0, 60.0);
            let recovered = original.to_rgb().to_hsl();
            assert!(
                (original.h - recovered.h).abs() < 1.0,
                "hue {h} came back as {}",
                recovered.h
            );
            assert!((original.s - recovered.s).abs() < 1.0);
            assert!((original.l - recovered.l).abs() < 1.0);
        }
    }

    #[test]
    fn rounded_wraps_359_point_6_to_zero() {
        let c = Hsl::new(359.6, 50.0, 50.0);
        assert_eq!(c.rounded().0, 0);
    }

    #[test]
    fn display_is_css_like() {
        assert_eq!(format!("{}", Hsl::new(210.0, 70.0, 45.0)), "hsl(210, 70%, 45%)");
    }

    #[test]
    fn from_impls_match_the_named_conversions() {
        let rgb: Rgb = Hsl::new(0.0, 100.0, 50.0).into();
        assert_eq!(rgb, Rgb::new(255, 0, 0));

        let hsl: Hsl = Rgb::new(255, 0, 0).into();
        assert_eq!(hsl.rounded(), (0, 100, 50));
    }
}
