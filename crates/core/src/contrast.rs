//! WCAG 2.1 contrast evaluation of a generated ramp against a background.
//!
//! Contrast ratios are rounded to two decimals before the AA threshold is
//! applied, so a reported `4.50` never passes.

use crate::color::{srgb_channel_to_linear, Rgb};
use crate::error::RampError;
use crate::ramp::GeneratedColor;
use serde::{Deserialize, Serialize};

/// Minimum contrast for normal-size text at WCAG AA. Ratios must exceed it.
pub const AA_CONTRAST_THRESHOLD: f64 = 4.5;

/// Background the ramp is evaluated against when none is given.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// Foreground text color chosen for legibility on a ramp step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ink {
    White,
    Black,
}

impl Ink {
    /// Hex value of the ink, `"#FFFFFF"` or `"#000000"`.
    pub fn hex(self) -> &'static str {
        match self {
            Ink::White => "#FFFFFF",
            Ink::Black => "#000000",
        }
    }
}

/// Contrast of one ramp step against the background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    pub step: usize,
    pub label: usize,
    pub hex: String,
    /// Rounded to two decimals, in `[1, 21]`.
    pub contrast_ratio: f64,
    pub ink: Ink,
    pub meets_threshold: bool,
}

/// Relative luminance per WCAG 2.1: `0.2126 R + 0.7152 G + 0.0722 B` on
/// linearized channels. Returns a value in `[0, 1]`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * srgb_channel_to_linear(rgb.r)
        + 0.7152 * srgb_channel_to_linear(rgb.g)
        + 0.0722 * srgb_channel_to_linear(rgb.b)
}

/// Unrounded WCAG contrast ratio between two colors, independent of order.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Evaluates every color of a ramp against `background`.
///
/// Returns `RampError::InvalidColor` if the background or any color's hex is
/// malformed. Results keep the input order.
pub fn evaluate_contrast(
    colors: &[GeneratedColor],
    background: &str,
) -> Result<Vec<ContrastResult>, RampError> {
    let background = Rgb::from_hex(background)?;
    colors
        .iter()
        .map(|color| {
            let rgb = Rgb::from_hex(&color.hex)?;
            let ratio = round_to_hundredths(contrast_ratio(background, rgb));
            let meets_threshold = ratio > AA_CONTRAST_THRESHOLD;
            Ok(ContrastResult {
                step: color.step,
                label: color.label,
                hex: color.hex.clone(),
                contrast_ratio: ratio,
                ink: if meets_threshold { Ink::White } else { Ink::Black },
                meets_threshold,
            })
        })
        .collect()
}

/// The lowest step meeting the threshold, if any.
pub fn first_sufficient_contrast(results: &[ContrastResult]) -> Option<&ContrastResult> {
    results
        .iter()
        .filter(|r| r.meets_threshold)
        .min_by_key(|r| r.step)
}
