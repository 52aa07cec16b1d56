//! Output locations for prepared wallpapers.
//!
//! Prepared wallpapers live in `~/.local/share/wallpaper` by default, with a
//! fallback to the system temp directory if the home directory is unknown.

use std::fs;
use std::path::{Path, PathBuf};

use super::batch::DisplayTarget;
use super::error::ProcessingError;
use super::pipeline::PrepareOptions;

/// Name of the output subdirectory.
const OUTPUT_SUBDIR: &str = "wallpaper";

/// Returns the default directory for prepared wallpapers.
#[must_use]
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir().map_or_else(
        || std::env::temp_dir().join(OUTPUT_SUBDIR),
        |home| home.join(".local").join("share").join(OUTPUT_SUBDIR),
    )
}

/// Ensures `dir` exists, creating missing parents.
///
/// # Errors
///
/// Returns `ProcessingError::Io` if the directory cannot be created.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ProcessingError> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|err| ProcessingError::io(dir, err))?;
        tracing::debug!(path = %dir.display(), "created output directory");
    }
    Ok(())
}

/// Generates a unique file name for the source, display and processing parameters.
#[must_use]
pub fn output_filename(source: &Path, target: &DisplayTarget, options: PrepareOptions) -> String {
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("wallpaper");
    format!(
        "{stem}_d{}_{}_m{}_r{}.png",
        target.index,
        target.dimension,
        options.margin(),
        options.radius().unwrap_or(0)
    )
}

/// Returns the full output path for `source` on `target` inside `dir`.
#[must_use]
pub fn output_path(dir: &Path, source: &Path, target: &DisplayTarget, options: PrepareOptions) -> PathBuf {
    dir.join(output_filename(source, target, options))
}
