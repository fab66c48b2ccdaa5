#![deny(unsafe_code)]
//! Core types for the rally-ramp palette generator.
//!
//! Provides hex/RGB/HSB conversion (`color`), interpolation curves (`curve`),
//! the lock-pinned ramp generator (`ramp`) and WCAG contrast evaluation
//! (`contrast`). Everything here is a pure function of its inputs.

pub mod color;
pub mod contrast;
pub mod curve;
pub mod error;
pub mod ramp;

pub use color::{display_hue, hex_to_hsb, hex_to_rgb, hsb_to_rgb, rgb_to_hsb, Hsb, Hsl, Rgb};
pub use contrast::{
    evaluate_contrast, first_sufficient_contrast, ContrastResult, Ink, AA_CONTRAST_THRESHOLD,
    DEFAULT_BACKGROUND,
};
pub use curve::Curve;
pub use error::RampError;
pub use ramp::{
    generate_ramp, major_count, ChannelSpec, GeneratedColor, RampRequest, Rotation,
    MAX_STEPS,
};
