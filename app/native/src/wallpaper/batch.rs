//! Multi-display driver.
//!
//! Runs one independent `prepare` per display in parallel. A failure on one
//! display is recorded in its outcome and never stops the others.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rayon::prelude::*;
use serde::Serialize;

use super::dimension::{Dimension, DimensionParseError};
use super::error::ProcessingError;
use super::output::{ensure_output_dir, output_path};
use super::pipeline::{self, PrepareOptions};

/// A display to prepare a wallpaper for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTarget {
    /// 0-based position in the caller's display list.
    pub index: usize,
    /// Pixel resolution of the display.
    pub dimension: Dimension,
    /// Human-readable name, if the caller knows one.
    pub name: Option<String>,
}

impl DisplayTarget {
    #[must_use]
    pub const fn new(index: usize, dimension: Dimension) -> Self { Self { index, dimension, name: None } }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "display {} ({name}, {})", self.index, self.dimension),
            None => write!(f, "display {} ({})", self.index, self.dimension),
        }
    }
}

/// A display as written on the command line or in the configuration file:
/// `WIDTHxHEIGHT` or `NAME=WIDTHxHEIGHT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySpec {
    pub name: Option<String>,
    pub dimension: Dimension,
}

impl DisplaySpec {
    /// Turns the spec into the target at position `index`.
    #[must_use]
    pub fn into_target(self, index: usize) -> DisplayTarget {
        let target = DisplayTarget::new(index, self.dimension);
        match self.name {
            Some(name) => target.with_name(name),
            None => target,
        }
    }
}

impl FromStr for DisplaySpec {
    type Err = DimensionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, dimension)) = s.rsplit_once('=') else {
            return Ok(Self { name: None, dimension: s.parse()? });
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(DimensionParseError::new(s));
        }

        Ok(Self { name: Some(name.to_string()), dimension: dimension.parse()? })
    }
}

impl fmt::Display for DisplaySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}={}", self.dimension),
            None => write!(f, "{}", self.dimension),
        }
    }
}

/// Result of preparing a wallpaper for one display.
#[derive(Debug)]
pub struct DisplayOutcome {
    pub target: DisplayTarget,
    pub result: Result<PathBuf, ProcessingError>,
}

impl DisplayOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool { self.result.is_ok() }
}

/// Prepares `source` for every display in `targets`.
///
/// Outputs are written to `output_dir` with one file per display (see
/// [`output_path`]). Outcomes are returned in the order of `targets`.
///
/// # Errors
///
/// Returns `ProcessingError::Io` only if `output_dir` cannot be created;
/// per-display failures are reported inside the returned outcomes.
pub fn prepare_all(
    source: &Path,
    targets: &[DisplayTarget],
    options: PrepareOptions,
    output_dir: &Path,
) -> Result<Vec<DisplayOutcome>, ProcessingError> {
    if !options.is_passthrough() {
        ensure_output_dir(output_dir)?;
    }

    let outcomes = targets
        .par_iter()
        .map(|target| {
            let output = output_path(output_dir, source, target, options);
            let result = pipeline::prepare(source, target.dimension, options, &output);

            match &result {
                Ok(path) => tracing::info!(
                    display = target.index,
                    dimension = %target.dimension,
                    path = %path.display(),
                    "wallpaper prepared"
                ),
                Err(err) => tracing::warn!(
                    display = target.index,
                    dimension = %target.dimension,
                    error = %err,
                    "failed to prepare wallpaper"
                ),
            }

            DisplayOutcome { target: target.clone(), result }
        })
        .collect();

    Ok(outcomes)
}
