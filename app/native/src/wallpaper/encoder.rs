//! PNG encoding of a composited canvas.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageError};
use tempfile::NamedTempFile;

use super::compositor::Canvas;
use super::error::ProcessingError;

/// Encodes `canvas` as an 8-bit RGBA, non-interlaced PNG into `writer`.
///
/// # Errors
///
/// Returns `ProcessingError::Encode` if the encoder rejects the pixel data and
/// `ProcessingError::Io` (against `path`, for context) if writing fails.
pub fn write_png<W: Write>(canvas: &Canvas, writer: W, path: &Path) -> Result<(), ProcessingError> {
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);

    encoder
        .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ExtendedColorType::Rgba8)
        .map_err(|err| match err {
            ImageError::IoError(source) => ProcessingError::io(path, source),
            other => ProcessingError::Encode(other.to_string()),
        })
}

/// Writes `canvas` as a PNG file at `output`, creating or replacing it.
///
/// The image is first encoded into a temporary file next to `output` and only
/// renamed over it once encoding succeeded, so a failed encode never leaves a
/// partial file behind.
///
/// # Errors
///
/// Returns `ProcessingError::Io` if the destination directory is missing or not
/// writable, and `ProcessingError::Encode` if the canvas cannot be encoded.
pub fn encode_png(canvas: &Canvas, output: &Path) -> Result<(), ProcessingError> {
    let parent = output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(parent).map_err(|err| ProcessingError::io(output, err))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_png(canvas, &mut writer, output)?;
        writer.flush().map_err(|err| ProcessingError::io(output, err))?;
    }

    temp.persist(output).map_err(|err| ProcessingError::io(output, err.error))?;

    tracing::debug!(path = %output.display(), "encoded wallpaper");
    Ok(())
}
