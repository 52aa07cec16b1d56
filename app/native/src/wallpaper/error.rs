//! Errors produced while preparing a wallpaper.

use std::path::PathBuf;

use thiserror::Error;

use super::dimension::Dimension;

/// Errors that can occur while decoding, compositing or encoding a wallpaper.
///
/// Every error is scoped to a single request; none of them is retried.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The request violates an input invariant (e.g. the margin covers the whole display).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The source image could not be read or has an unsupported format.
    #[error("Failed to decode image {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    /// A pixel buffer (the canvas or the resampled image) could not be allocated.
    #[error("Failed to allocate a {dimension} pixel buffer")]
    Allocation { dimension: Dimension },
    /// The final raster could not be materialized.
    #[error("Failed to compose final image: {0}")]
    Composition(String),
    /// The canvas could not be converted to PNG.
    #[error("Failed to encode image: {0}")]
    Encode(String),
    /// The destination could not be opened or written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
