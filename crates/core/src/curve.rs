//! Interpolation curves for ramp channels.
//!
//! A [`Curve`] maps a normalized step parameter `t` in `[0, 1]` onto `[0, 1]`
//! with fixed endpoints (`apply(0) == 0`, `apply(1) == 1`). The ramp generator
//! only ever calls [`Curve::apply`], so adding a variant here needs no change
//! to the generator.

use crate::error::RampError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// All available curve kinds, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Curve {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
}

/// All curves, in display order.
const ALL_CURVES: &[Curve] = &[
    Curve::Linear,
    Curve::EaseInQuad,
    Curve::EaseOutQuad,
    Curve::EaseInOutQuad,
    Curve::EaseInCubic,
    Curve::EaseOutCubic,
    Curve::EaseInOutCubic,
    Curve::EaseInSine,
    Curve::EaseOutSine,
    Curve::EaseInOutSine,
];

impl Curve {
    /// Maps `t` through the curve. `t` is clamped to `[0, 1]`; NaN reads as 0.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Curve::Linear => t,
            Curve::EaseInQuad => t * t,
            Curve::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Curve::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Curve::EaseInCubic => t * t * t,
            Curve::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Curve::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Curve::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Curve::EaseOutSine => (t * PI / 2.0).sin(),
            Curve::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// Returns the serialized name of this curve (e.g. `"easeInQuad"`).
    pub fn name(self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::EaseInQuad => "easeInQuad",
            Curve::EaseOutQuad => "easeOutQuad",
            Curve::EaseInOutQuad => "easeInOutQuad",
            Curve::EaseInCubic => "easeInCubic",
            Curve::EaseOutCubic => "easeOutCubic",
            Curve::EaseInOutCubic => "easeInOutCubic",
            Curve::EaseInSine => "easeInSine",
            Curve::EaseOutSine => "easeOutSine",
            Curve::EaseInOutSine => "easeInOutSine",
        }
    }

    /// Returns every available curve.
    pub fn all() -> &'static [Curve] {
        ALL_CURVES
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = RampError;

    /// Parses a curve name. Returns `RampError::Configuration` for unknown names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CURVES
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| RampError::Configuration(format!("unknown curve: {s:?}")))
    }
}
