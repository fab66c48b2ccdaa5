//! Builds the ramp request from a JSON file and/or command-line overrides.

use crate::error::CliError;
use rally_ramp_core::{RampRequest, Rotation};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Lock color used when neither `--lock` nor `--config` is given.
pub const DEFAULT_LOCK: &str = "#1FA846";

/// Command-line overrides applied on top of the base request.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub lock: Option<String>,
    pub steps: Option<usize>,
    pub rotation: Option<Rotation>,
}

/// Reads a JSON ramp request from `path`.
pub fn load_request(path: &Path) -> Result<RampRequest, CliError> {
    let json = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("failed to read {}: {e}", path.display())))?;
    let request = RampRequest::from_json(&json)?;
    debug!(path = %path.display(), steps = request.steps, "loaded ramp request");
    Ok(request)
}

/// Resolves the request to generate.
///
/// Starts from the file at `config` if given, otherwise from the standard
/// ramp around the lock color. A `--lock` override on top of a file only
/// replaces the lock; the file's hue curve is kept.
pub fn resolve_request(
    config: Option<&Path>,
    overrides: Overrides,
) -> Result<RampRequest, CliError> {
    let mut request = match config {
        Some(path) => {
            let mut request = load_request(path)?;
            if let Some(lock) = overrides.lock {
                request.lock_hex = lock;
            }
            request
        }
        None => RampRequest::from_lock_hex(overrides.lock.as_deref().unwrap_or(DEFAULT_LOCK)),
    };
    if let Some(steps) = overrides.steps {
        request.steps = steps;
    }
    if let Some(rotation) = overrides.rotation {
        request.rotation = rotation;
    }
    debug!(?request, "resolved ramp request");
    Ok(request)
}
