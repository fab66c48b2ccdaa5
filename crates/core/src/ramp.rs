//! Curve-driven ramp generation in HSB space.
//!
//! A [`RampRequest`] describes how hue, saturation and brightness each sweep
//! from a start to an end value over a fixed number of steps. One step is
//! pinned to the exact lock color: the step nearest to it is located on the
//! raw curves, then saturation and brightness are re-interpolated piecewise
//! through the lock so the tonal ramp stays ordered. Hue always follows its
//! own curve, so a lock hue outside the swept range shows up as an outlier
//! at the locked step only.

use crate::color::{
    hex_to_hsb, hsb_to_rgb, normalize_hue, rgb_to_hsb, rgb_to_hsl, Hsb, Hsl, Rgb,
};
use crate::curve::Curve;
use crate::error::RampError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Largest step count a request may ask for.
pub const MAX_STEPS: usize = 1024;

/// How one channel varies across the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub curve: Curve,
    /// Exponent applied after the curve; > 1 holds early steps back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl ChannelSpec {
    /// A linear channel from `start` to `end` with no rate.
    pub fn linear(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            curve: Curve::Linear,
            rate: None,
        }
    }

    /// Replaces the curve.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Sets the rate exponent.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Progress in `[0, 1]` at step parameter `t`: curve first, then rate.
    fn progress(&self, t: f64) -> f64 {
        let u = self.curve.apply(t);
        match self.rate {
            Some(rate) => u.powf(rate),
            None => u,
        }
    }

    fn value_at(&self, progress: f64) -> f64 {
        self.start + progress * (self.end - self.start)
    }

    fn validate(&self, name: &str, unit_range: bool) -> Result<(), RampError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(RampError::Configuration(format!(
                "{name}: start and end must be finite, got {} and {}",
                self.start, self.end
            )));
        }
        let unit = 0.0..=1.0;
        if unit_range && !(unit.contains(&self.start) && unit.contains(&self.end)) {
            return Err(RampError::Configuration(format!(
                "{name}: start and end must be within [0, 1], got {} and {}",
                self.start, self.end
            )));
        }
        if let Some(rate) = self.rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(RampError::Configuration(format!(
                    "{name}: rate must be a positive finite number, got {rate}"
                )));
            }
        }
        Ok(())
    }
}

/// Direction of the hue sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    #[serde(alias = "cw")]
    Clockwise,
    #[serde(alias = "ccw")]
    Counterclockwise,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Clockwise => f.write_str("clockwise"),
            Rotation::Counterclockwise => f.write_str("counterclockwise"),
        }
    }
}

impl FromStr for Rotation {
    type Err = RampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clockwise" | "cw" => Ok(Rotation::Clockwise),
            "counterclockwise" | "ccw" => Ok(Rotation::Counterclockwise),
            other => Err(RampError::Configuration(format!(
                "unknown rotation: {other:?}"
            ))),
        }
    }
}

/// Everything needed to generate a ramp.
///
/// Deserializes from the same camelCase JSON shape the web tool uses
/// (`minorSteps`, `lockHex`). Two equal requests always produce equal ramps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampRequest {
    pub steps: usize,
    pub hue: ChannelSpec,
    pub saturation: ChannelSpec,
    pub brightness: ChannelSpec,
    /// Steps rendered as minor. Indices past the end are ignored.
    #[serde(default)]
    pub minor_steps: BTreeSet<usize>,
    pub lock_hex: String,
    #[serde(default)]
    pub rotation: Rotation,
}

impl RampRequest {
    /// Builds the standard 11-step monochrome ramp around `lock_hex`.
    ///
    /// The hue comes from the lenient [`hex_to_hsb`], so a malformed hex
    /// still yields a request; [`generate_ramp`] then rejects it. The hue is
    /// kept fractional rather than rounded to whole degrees so every step
    /// shares the lock's exact hue.
    pub fn from_lock_hex(lock_hex: &str) -> Self {
        let h = hex_to_hsb(lock_hex).h;
        Self {
            steps: 11,
            hue: ChannelSpec::linear(h, h),
            saturation: ChannelSpec::linear(0.04, 1.0).with_rate(2.0),
            brightness: ChannelSpec::linear(1.0, 0.11),
            minor_steps: BTreeSet::from([0, 1]),
            lock_hex: lock_hex.to_string(),
            rotation: Rotation::Clockwise,
        }
    }

    /// Parses a request from JSON.
    ///
    /// Shape errors surface as `RampError::Configuration`.
    pub fn from_json(json: &str) -> Result<Self, RampError> {
        serde_json::from_str(json).map_err(|e| RampError::Configuration(e.to_string()))
    }

    /// Checks the request shape. Does not look at the lock color.
    pub fn validate(&self) -> Result<(), RampError> {
        if self.steps == 0 {
            return Err(RampError::Configuration(
                "steps must be at least 1".to_string(),
            ));
        }
        if self.steps > MAX_STEPS {
            return Err(RampError::Configuration(format!(
                "steps must be at most {MAX_STEPS}, got {}",
                self.steps
            )));
        }
        self.hue.validate("hue", false)?;
        self.saturation.validate("saturation", true)?;
        self.brightness.validate("brightness", true)?;
        Ok(())
    }

    /// Step parameter in `[0, 1]`; 0 for a single-step ramp.
    fn step_param(&self, step: usize) -> f64 {
        if self.steps <= 1 {
            0.0
        } else {
            step as f64 / (self.steps - 1) as f64
        }
    }

    fn hue_param(&self, step: usize) -> f64 {
        let t = self.step_param(step);
        match self.rotation {
            Rotation::Clockwise => t,
            Rotation::Counterclockwise => 1.0 - t,
        }
    }

    /// Per-step progress of each channel along its own curve.
    fn progress_at(&self, step: usize) -> Progress {
        let t = self.step_param(step);
        Progress {
            hue: self.hue.progress(self.hue_param(step)),
            saturation: self.saturation.progress(t),
            brightness: self.brightness.progress(t),
        }
    }

    fn hsb_at(&self, p: Progress) -> Hsb {
        Hsb {
            h: normalize_hue(self.hue.value_at(p.hue)),
            s: self.saturation.value_at(p.saturation).clamp(0.0, 1.0),
            b: self.brightness.value_at(p.brightness).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Progress {
    hue: f64,
    saturation: f64,
    brightness: f64,
}

/// One step of a generated ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedColor {
    pub step: usize,
    /// Display label, `step * 100`.
    pub label: usize,
    pub hex: String,
    pub h: f64,
    pub s: f64,
    pub b: f64,
    pub is_major: bool,
    pub is_locked: bool,
}

impl GeneratedColor {
    /// The exact HSB this color was built from.
    pub fn hsb(&self) -> Hsb {
        Hsb {
            h: self.h,
            s: self.s,
            b: self.b,
        }
    }

    /// Parses [`GeneratedColor::hex`] back to RGB.
    pub fn rgb(&self) -> Result<Rgb, RampError> {
        Rgb::from_hex(&self.hex)
    }

    /// CSS `rgb(r, g, b)` readout of this color.
    pub fn rgb_string(&self) -> Result<String, RampError> {
        self.rgb().map(|rgb| rgb.to_css())
    }

    /// HSL readout of this color.
    pub fn hsl(&self) -> Result<Hsl, RampError> {
        self.rgb().map(rgb_to_hsl)
    }
}

/// Distance between two HSB colors with each channel weighted equally.
///
/// Hue uses the shorter arc, scaled so that 180 degrees counts as 1.
fn hsb_distance(a: Hsb, b: Hsb) -> f64 {
    let dh = (a.h - b.h).rem_euclid(360.0);
    let dh = dh.min(360.0 - dh) / 180.0;
    let ds = a.s - b.s;
    let db = a.b - b.b;
    dh * dh + ds * ds + db * db
}

/// Index of the point nearest to `target`; ties go to the lowest index.
fn nearest_step(points: &[Hsb], target: Hsb) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, &p) in points.iter().enumerate() {
        let d = hsb_distance(p, target);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

/// Re-interpolates a channel so it passes through `lock` at progress `pivot`.
///
/// Progress below the pivot maps onto `[start, lock]`, above onto `[lock, end]`.
/// The result is clamped to `[0, 1]`.
fn through_lock(progress: f64, pivot: f64, start: f64, lock: f64, end: f64) -> f64 {
    let value = if progress <= pivot {
        if pivot > 0.0 {
            start + (progress / pivot) * (lock - start)
        } else {
            lock
        }
    } else {
        lock + ((progress - pivot) / (1.0 - pivot)) * (end - lock)
    };
    value.clamp(0.0, 1.0)
}

/// Generates the ramp described by `request`.
///
/// Returns `RampError::Configuration` for an invalid request (including
/// `steps == 0`) and `RampError::InvalidColor` when `lock_hex` is malformed.
pub fn generate_ramp(request: &RampRequest) -> Result<Vec<GeneratedColor>, RampError> {
    request.validate()?;
    let lock_rgb = Rgb::from_hex(&request.lock_hex)?;
    let lock = rgb_to_hsb(lock_rgb.r, lock_rgb.g, lock_rgb.b);

    let progress: Vec<Progress> = (0..request.steps).map(|i| request.progress_at(i)).collect();
    let raw: Vec<Hsb> = progress.iter().map(|&p| request.hsb_at(p)).collect();
    let locked = nearest_step(&raw, lock);
    let pivot = progress[locked];

    let colors = raw
        .iter()
        .zip(&progress)
        .enumerate()
        .map(|(step, (point, p))| {
            let (hsb, hex) = if step == locked {
                (lock, lock_rgb.to_hex())
            } else {
                let sat = &request.saturation;
                let bri = &request.brightness;
                let hsb = Hsb {
                    h: point.h,
                    s: through_lock(p.saturation, pivot.saturation, sat.start, lock.s, sat.end),
                    b: through_lock(p.brightness, pivot.brightness, bri.start, lock.b, bri.end),
                };
                (hsb, hsb_to_rgb(hsb).to_hex())
            };
            GeneratedColor {
                step,
                label: step * 100,
                hex,
                h: hsb.h,
                s: hsb.s,
                b: hsb.b,
                is_major: !request.minor_steps.contains(&step),
                is_locked: step == locked,
            }
        })
        .collect();

    Ok(colors)
}

/// Number of major steps in a ramp.
pub fn major_count(colors: &[GeneratedColor]) -> usize {
    colors.iter().filter(|c| c.is_major).count()
}
