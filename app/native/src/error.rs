//! Error types for the wallpaper CLI.
//!
//! Library code reports [`ProcessingError`] and [`ConfigError`]; the command
//! layer folds everything into [`WallpaperError`].

use thiserror::Error;

use crate::config::ConfigError;
use crate::wallpaper::{DimensionParseError, ProcessingError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum WallpaperError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Image processing failed.
    #[error("Wallpaper error: {0}")]
    ProcessingError(#[from] ProcessingError),
    /// One or more displays could not be prepared.
    #[error("{failed} of {total} displays failed")]
    PartialFailure { failed: usize, total: usize },
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for WallpaperError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for WallpaperError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<ConfigError> for WallpaperError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<DimensionParseError> for WallpaperError {
    fn from(err: DimensionParseError) -> Self { Self::InvalidArguments(err.to_string()) }
}
