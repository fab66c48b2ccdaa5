//! Color types and conversion functions for rally-ramp.
//!
//! Provides three color types (`Rgb`, `Hsb`, `Hsl`) and pure conversion
//! functions between them and 6-digit hex strings. HSB is the working space
//! for ramp interpolation; RGB is only an intermediate and display format.
//!
//! Two flavors of hex parsing exist. [`hex_to_rgb`] and [`hex_to_hsb`] are
//! lenient (`None` / zero HSB on bad input) and feed display readouts only.
//! [`Rgb::from_hex`] is strict and is what ramp generation and contrast
//! evaluation use.

use crate::error::RampError;
use serde::{Deserialize, Serialize};

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue/saturation/brightness color.
///
/// `h` is in degrees `[0, 360)`, `s` and `b` are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

/// Hue/saturation/lightness color, used for display readouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsb {
    /// The neutral fallback returned by [`hex_to_hsb`] for malformed input.
    pub const ZERO: Hsb = Hsb {
        h: 0.0,
        s: 0.0,
        b: 0.0,
    };
}

impl Rgb {
    /// Parses a hex color string like "#1FA846" or "1fa846" (case insensitive).
    ///
    /// Returns `RampError::InvalidColor` if the input is not exactly 6 hex
    /// digits with an optional leading `#`.
    pub fn from_hex(hex: &str) -> Result<Rgb, RampError> {
        hex_to_rgb(hex).ok_or_else(|| {
            RampError::InvalidColor(format!(
                "expected 6 hex digits with optional '#', got {hex:?}"
            ))
        })
    }

    /// Converts the color to a canonical uppercase hex string like `"#1FA846"`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS-style `rgb(r, g, b)` string.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Parses a 6-digit hex color, optionally prefixed with `#`.
///
/// Returns `None` for any input that does not match; never panics.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    // from_str_radix would accept a leading '+', so check the digits first.
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Hue in degrees of an RGB color given its normalized channels, max and delta.
///
/// Achromatic colors (`delta == 0`) have hue 0.
fn hue_degrees(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    normalize_hue(sector * 60.0)
}

/// Converts 8-bit RGB channels to HSB.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> Hsb {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    Hsb {
        h: hue_degrees(r, g, b, max, delta),
        s: if max == 0.0 { 0.0 } else { delta / max },
        b: max,
    }
}

/// Converts a hex string to HSB, falling back to [`Hsb::ZERO`] when the
/// string is malformed.
///
/// Only for display readouts: the fallback silently masks bad input.
pub fn hex_to_hsb(hex: &str) -> Hsb {
    match hex_to_rgb(hex) {
        Some(rgb) => rgb_to_hsb(rgb.r, rgb.g, rgb.b),
        None => Hsb::ZERO,
    }
}

/// Converts HSB back to 8-bit RGB using the standard six-sector formula.
///
/// Hue wraps; saturation and brightness are clamped to `[0, 1]`. Channels
/// are rounded to the nearest integer.
pub fn hsb_to_rgb(hsb: Hsb) -> Rgb {
    let h = normalize_hue(hsb.h);
    let s = hsb.s.clamp(0.0, 1.0);
    let v = hsb.b.clamp(0.0, 1.0);

    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match hp.floor() as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |ch: f64| ((ch + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: to_u8(r),
        g: to_u8(g),
        b: to_u8(b),
    }
}

/// Converts 8-bit RGB to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = (
        rgb.r as f64 / 255.0,
        rgb.g as f64 / 255.0,
        rgb.b as f64 / 255.0,
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsl {
        h: hue_degrees(r, g, b, max, delta),
        s,
        l,
    }
}

/// Integer hue readout for a hex color, in degrees `[0, 360)`.
///
/// Uses the lenient [`hex_to_hsb`], so malformed input reads as 0.
pub fn display_hue(hex: &str) -> u16 {
    (hex_to_hsb(hex).h.round() as u16) % 360
}

/// Applies inverse sRGB gamma to a single 8-bit channel.
pub fn srgb_channel_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Normalizes a hue angle to [0, 360).
pub(crate) fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // -- Hex parsing tests --

    #[test]
    fn hex_to_rgb_parses_with_hash() {
        let rgb = hex_to_rgb("#1FA846").unwrap();
        assert_eq!(rgb, Rgb { r: 31, g: 168, b: 70 });
    }

    #[test]
    fn hex_to_rgb_parses_without_hash() {
        let rgb = hex_to_rgb("00ff00").unwrap();
        assert_eq!(rgb, Rgb { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn hex_to_rgb_is_case_insensitive() {
        assert_eq!(hex_to_rgb("#FF00AA"), hex_to_rgb("#ff00aa"));
    }

    #[test]
    fn hex_to_rgb_returns_none_for_malformed_input() {
        assert_eq!(hex_to_rgb("#gggggg"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#"), None);
        assert_eq!(hex_to_rgb("#ff00ff00"), None);
        assert_eq!(hex_to_rgb("##ff00ff"), None);
        assert_eq!(hex_to_rgb("+f+f+f"), None);
        assert_eq!(hex_to_rgb(" ff00ff"), None);
        assert_eq!(hex_to_rgb("ééé"), None);
    }

    #[test]
    fn from_hex_reports_invalid_color() {
        let err = Rgb::from_hex("nope").unwrap_err();
        assert!(matches!(err, RampError::InvalidColor(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn to_hex_is_uppercase_with_hash() {
        assert_eq!(Rgb { r: 31, g: 168, b: 70 }.to_hex(), "#1FA846");
        assert_eq!(Rgb { r: 0, g: 0, b: 0 }.to_hex(), "#000000");
        assert_eq!(Rgb { r: 255, g: 255, b: 255 }.to_hex(), "#FFFFFF");
    }

    #[test]
    fn lowercase_input_canonicalizes_to_uppercase() {
        assert_eq!(Rgb::from_hex("c0ffee").unwrap().to_hex(), "#C0FFEE");
    }

    #[test]
    fn to_css_formats_rgb_function() {
        assert_eq!(Rgb { r: 31, g: 168, b: 70 }.to_css(), "rgb(31, 168, 70)");
    }

    // -- RGB -> HSB tests --

    #[test]
    fn rgb_to_hsb_primaries() {
        let red = rgb_to_hsb(255, 0, 0);
        assert!(approx_eq(red.h, 0.0) && approx_eq(red.s, 1.0) && approx_eq(red.b, 1.0));
        let green = rgb_to_hsb(0, 255, 0);
        assert!(approx_eq(green.h, 120.0), "green hue: {}", green.h);
        let blue = rgb_to_hsb(0, 0, 255);
        assert!(approx_eq(blue.h, 240.0), "blue hue: {}", blue.h);
    }

    #[test]
    fn rgb_to_hsb_magenta_side_wraps_into_range() {
        // Red is max and blue > green: raw sector is negative before wrapping.
        let hsb = rgb_to_hsb(255, 0, 128);
        assert!(hsb.h > 300.0 && hsb.h < 360.0, "hue: {}", hsb.h);
    }

    #[test]
    fn rgb_to_hsb_black_has_zero_saturation() {
        assert_eq!(rgb_to_hsb(0, 0, 0), Hsb::ZERO);
    }

    #[test]
    fn rgb_to_hsb_gray_is_achromatic() {
        let gray = rgb_to_hsb(128, 128, 128);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!(approx_eq(gray.b, 128.0 / 255.0));
    }

    #[test]
    fn rgb_to_hsb_anchor_green() {
        let hsb = rgb_to_hsb(31, 168, 70);
        // (b - r) / delta + 2 = (70 - 31) / 137 + 2
        let expected = ((70.0 - 31.0) / 137.0 + 2.0) * 60.0;
        assert!(approx_eq(hsb.h, expected), "hue: {}", hsb.h);
        assert!(approx_eq(hsb.s, 137.0 / 168.0));
        assert!(approx_eq(hsb.b, 168.0 / 255.0));
    }

    #[test]
    fn hex_to_hsb_falls_back_to_zero_for_malformed_input() {
        assert_eq!(hex_to_hsb("not a color"), Hsb::ZERO);
        assert_eq!(hex_to_hsb("#12345"), Hsb::ZERO);
        assert_eq!(hex_to_hsb(""), Hsb::ZERO);
    }

    #[test]
    fn hex_to_hsb_matches_rgb_to_hsb() {
        assert_eq!(hex_to_hsb("#1FA846"), rgb_to_hsb(31, 168, 70));
    }

    // -- HSB -> RGB tests --

    #[test]
    fn hsb_to_rgb_primaries_and_extremes() {
        let cases = [
            (0.0, 1.0, 1.0, Rgb { r: 255, g: 0, b: 0 }),
            (120.0, 1.0, 1.0, Rgb { r: 0, g: 255, b: 0 }),
            (240.0, 1.0, 1.0, Rgb { r: 0, g: 0, b: 255 }),
            (60.0, 1.0, 1.0, Rgb { r: 255, g: 255, b: 0 }),
            (0.0, 0.0, 1.0, Rgb { r: 255, g: 255, b: 255 }),
            (200.0, 0.7, 0.0, Rgb { r: 0, g: 0, b: 0 }),
        ];
        for (h, s, b, expected) in cases {
            assert_eq!(hsb_to_rgb(Hsb { h, s, b }), expected, "h={h} s={s} b={b}");
        }
    }

    #[test]
    fn hsb_to_rgb_wraps_hue() {
        let wrapped = hsb_to_rgb(Hsb { h: 480.0, s: 1.0, b: 1.0 });
        let direct = hsb_to_rgb(Hsb { h: 120.0, s: 1.0, b: 1.0 });
        assert_eq!(wrapped, direct);
        let negative = hsb_to_rgb(Hsb { h: -120.0, s: 1.0, b: 1.0 });
        assert_eq!(negative, hsb_to_rgb(Hsb { h: 240.0, s: 1.0, b: 1.0 }));
    }

    #[test]
    fn hsb_to_rgb_clamps_out_of_range_channels() {
        let rgb = hsb_to_rgb(Hsb { h: 0.0, s: 1.5, b: 2.0 });
        assert_eq!(rgb, Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn anchor_round_trips_exactly() {
        let rgb = Rgb::from_hex("#1FA846").unwrap();
        let back = hsb_to_rgb(rgb_to_hsb(rgb.r, rgb.g, rgb.b));
        assert_eq!(back.to_hex(), "#1FA846");
    }

    // -- HSL and display tests --

    #[test]
    fn rgb_to_hsl_known_values() {
        let red = rgb_to_hsl(Rgb { r: 255, g: 0, b: 0 });
        assert!(approx_eq(red.h, 0.0) && approx_eq(red.s, 1.0) && approx_eq(red.l, 0.5));
        let white = rgb_to_hsl(Rgb { r: 255, g: 255, b: 255 });
        assert!(approx_eq(white.s, 0.0) && approx_eq(white.l, 1.0));
    }

    #[test]
    fn display_hue_rounds_to_whole_degrees() {
        assert_eq!(display_hue("#1FA846"), 137);
        assert_eq!(display_hue("#00FF00"), 120);
    }

    #[test]
    fn display_hue_is_zero_for_malformed_input() {
        assert_eq!(display_hue("#XYZXYZ"), 0);
    }

    #[test]
    fn normalize_hue_handles_negative_and_large() {
        assert!(approx_eq(normalize_hue(-30.0), 330.0));
        assert!(approx_eq(normalize_hue(720.0), 0.0));
        assert!(normalize_hue(-1e-18) < 360.0);
    }

    #[test]
    fn srgb_linearization_endpoints() {
        assert!(approx_eq(srgb_channel_to_linear(0), 0.0));
        assert!(approx_eq(srgb_channel_to_linear(255), 1.0));
        // 10/255 is below the 0.04045 knee.
        assert!(approx_eq(srgb_channel_to_linear(10), 10.0 / 255.0 / 12.92));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hsb_round_trip_within_one_per_channel(
                r in any::<u8>(),
                g in any::<u8>(),
                b in any::<u8>(),
            ) {
                let back = hsb_to_rgb(rgb_to_hsb(r, g, b));
                prop_assert!((back.r as i16 - r as i16).abs() <= 1, "r: {} vs {}", back.r, r);
                prop_assert!((back.g as i16 - g as i16).abs() <= 1, "g: {} vs {}", back.g, g);
                prop_assert!((back.b as i16 - b as i16).abs() <= 1, "b: {} vs {}", back.b, b);
            }

            #[test]
            fn rgb_to_hsb_stays_in_range(
                r in any::<u8>(),
                g in any::<u8>(),
                b in any::<u8>(),
            ) {
                let hsb = rgb_to_hsb(r, g, b);
                prop_assert!(hsb.h >= 0.0 && hsb.h < 360.0, "h: {}", hsb.h);
                prop_assert!((0.0..=1.0).contains(&hsb.s), "s: {}", hsb.s);
                prop_assert!((0.0..=1.0).contains(&hsb.b), "b: {}", hsb.b);
            }

            #[test]
            fn hex_round_trip_is_exact(
                r in any::<u8>(),
                g in any::<u8>(),
                b in any::<u8>(),
            ) {
                let rgb = Rgb { r, g, b };
                prop_assert_eq!(Rgb::from_hex(&rgb.to_hex()).unwrap(), rgb);
                prop_assert_eq!(hex_to_rgb(&rgb.to_hex().to_lowercase()), Some(rgb));
            }

            #[test]
            fn hex_to_rgb_never_panics(s in ".{0,10}") {
                let _ = hex_to_rgb(&s);
                let _ = hex_to_hsb(&s);
            }

            #[test]
            fn hsb_to_rgb_accepts_any_finite_hue(
                h in -1000.0_f64..1000.0,
                s in 0.0_f64..=1.0,
                v in 0.0_f64..=1.0,
            ) {
                let _ = hsb_to_rgb(Hsb { h, s, b: v });
            }
        }
    }
}
