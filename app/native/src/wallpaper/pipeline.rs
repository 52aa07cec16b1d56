//! The `prepare` pipeline: decode, compute scale, composite, encode.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageReader};
use serde::{Deserialize, Serialize};

use super::compositor::{self, Canvas};
use super::dimension::Dimension;
use super::encoder;
use super::error::ProcessingError;
use super::scale;

/// Optional adjustments applied while preparing a wallpaper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrepareOptions {
    /// Height in pixels of the background band reserved at the top.
    pub margin_top: Option<u32>,
    /// Corner radius in pixels of the visible image region.
    pub border_radius: Option<u32>,
}

impl PrepareOptions {
    #[must_use]
    pub const fn new(margin_top: Option<u32>, border_radius: Option<u32>) -> Self {
        Self { margin_top, border_radius }
    }

    /// The top margin, treating an absent margin as zero.
    #[must_use]
    pub fn margin(&self) -> u32 { self.margin_top.unwrap_or(0) }

    /// The corner radius, treating zero as absent.
    #[must_use]
    pub fn radius(&self) -> Option<u32> { self.border_radius.filter(|radius| *radius > 0) }

    /// Returns whether the options leave the image untouched.
    #[must_use]
    pub fn is_passthrough(&self) -> bool { self.margin() == 0 && self.radius().is_none() }
}

/// A validated composition job for one display.
#[derive(Debug)]
pub struct CompositionRequest {
    source: DynamicImage,
    display: Dimension,
    margin_top: u32,
    border_radius: Option<u32>,
}

impl CompositionRequest {
    /// Validates the inputs and builds a request that owns the decoded `source`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessingError::InvalidRequest` if the source has a zero side or
    /// the margin leaves no room below it.
    pub fn new(
        source: DynamicImage,
        display: Dimension,
        options: PrepareOptions,
    ) -> Result<Self, ProcessingError> {
        validate(display, options)?;

        let (width, height) = source.dimensions();
        if Dimension::new(width, height).is_none() {
            return Err(ProcessingError::InvalidRequest(format!(
                "source image has no pixels ({width}x{height})"
            )));
        }

        Ok(Self {
            source,
            display,
            margin_top: options.margin(),
            border_radius: options.radius(),
        })
    }

    /// The dimension of the decoded source image.
    #[must_use]
    pub fn image_dimension(&self) -> Dimension {
        let (width, height) = self.source.dimensions();
        Dimension::clamped(width, height)
    }

    #[must_use]
    pub const fn display(&self) -> Dimension { self.display }

    /// Runs the scale computation and composites the canvas.
    ///
    /// # Errors
    ///
    /// Propagates allocation and composition failures.
    pub fn render(&self) -> Result<Canvas, ProcessingError> {
        let scaled = scale::compute(self.image_dimension(), self.display, self.margin_top);
        compositor::composite(&self.source, scaled, self.display, self.margin_top, self.border_radius)
    }
}

/// Checks the request invariants that do not depend on the source image.
fn validate(display: Dimension, options: PrepareOptions) -> Result<(), ProcessingError> {
    scale::check_margin(display, options.margin())
}

/// Decodes the image at `path`, guessing the format from its content.
///
/// # Errors
///
/// Returns `ProcessingError::Decode` if the file cannot be read or decoded.
pub fn decode(path: &Path) -> Result<DynamicImage, ProcessingError> {
    let decode_error = |reason: String| ProcessingError::Decode { path: path.to_path_buf(), reason };

    ImageReader::open(path)
        .map_err(|err| decode_error(err.to_string()))?
        .with_guessed_format()
        .map_err(|err| decode_error(err.to_string()))?
        .decode()
        .map_err(|err| decode_error(err.to_string()))
}

/// Reads only the dimensions of the image at `path`, without decoding pixels.
///
/// # Errors
///
/// Returns `ProcessingError::Decode` if the header cannot be read.
pub fn probe_dimension(path: &Path) -> Result<Dimension, ProcessingError> {
    let decode_error = |reason: String| ProcessingError::Decode { path: path.to_path_buf(), reason };

    let (width, height) = ImageReader::open(path)
        .map_err(|err| decode_error(err.to_string()))?
        .with_guessed_format()
        .map_err(|err| decode_error(err.to_string()))?
        .into_dimensions()
        .map_err(|err| decode_error(err.to_string()))?;

    Dimension::new(width, height).ok_or_else(|| decode_error(format!("image has no pixels ({width}x{height})")))
}

/// Prepares `source` as a wallpaper for `display` and writes it to `output`.
///
/// When the options neither reserve a margin nor round the corners, the
/// source is returned untouched instead of being re-encoded. Otherwise the
/// returned path is `output`.
///
/// # Errors
///
/// Returns the first error of the decode, composite or encode step.
pub fn prepare(
    source: &Path,
    display: Dimension,
    options: PrepareOptions,
    output: &Path,
) -> Result<PathBuf, ProcessingError> {
    validate(display, options)?;

    if options.is_passthrough() {
        tracing::debug!(source = %source.display(), "no margin or radius requested, using source as-is");
        return Ok(source.to_path_buf());
    }

    let image = decode(source)?;
    let request = CompositionRequest::new(image, display, options)?;

    tracing::debug!(
        source = %source.display(),
        image = %request.image_dimension(),
        display = %request.display(),
        margin_top = options.margin(),
        border_radius = ?options.radius(),
        "preparing wallpaper"
    );

    let canvas = request.render()?;
    encoder::encode_png(&canvas, output)?;

    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    use super::*;

    fn dim(width: u32, height: u32) -> Dimension { Dimension::new(width, height).unwrap() }

    fn write_source(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 200) as u8 + 20, (y % 200) as u8 + 20, 90]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_options_zero_radius_is_absent() {
        let options = PrepareOptions::new(None, Some(0));
        assert_eq!(options.radius(), None);
        assert!(options.is_passthrough());
        assert!(!PrepareOptions::new(Some(10), None).is_passthrough());
        assert!(!PrepareOptions::new(None, Some(10)).is_passthrough());
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: PrepareOptions =
            serde_json::from_str(r#"{"marginTop": 32, "borderRadius": 12}"#).unwrap();
        assert_eq!(options, PrepareOptions::new(Some(32), Some(12)));
    }

    #[test]
    fn test_prepare_writes_display_sized_png() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "source.png", 300, 150);
        let output = dir.path().join("out.png");

        let path = prepare(&source, dim(192, 120), PrepareOptions::new(Some(12), Some(8)), &output)
            .unwrap();

        assert_eq!(path, output);
        let written = image::open(&output).unwrap();
        assert_eq!(written.dimensions(), (192, 120));
        assert_eq!(written.color(), image::ColorType::Rgba8);
    }

    #[test]
    fn test_prepare_passthrough_returns_source() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "source.png", 30, 15);
        let output = dir.path().join("out.png");

        let path = prepare(&source, dim(192, 120), PrepareOptions::default(), &output).unwrap();

        assert_eq!(path, source);
        assert!(!output.exists());
    }

    #[test]
    fn test_prepare_rejects_margin_covering_display() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "source.png", 30, 15);

        let err = prepare(
            &source,
            dim(192, 120),
            PrepareOptions::new(Some(120), None),
            &dir.path().join("out.png"),
        )
        .unwrap_err();

        assert!(matches!(err, ProcessingError::InvalidRequest(_)));
    }

    #[test]
    fn test_prepare_missing_source_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let err = prepare(
            &dir.path().join("nope.png"),
            dim(192, 120),
            PrepareOptions::new(Some(10), None),
            &dir.path().join("out.png"),
        )
        .unwrap_err();

        assert!(matches!(err, ProcessingError::Decode { .. }));
    }

    #[test]
    fn test_prepare_garbage_source_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("garbage.png");
        std::fs::write(&source, b"definitely not an image").unwrap();

        let err = prepare(
            &source,
            dim(192, 120),
            PrepareOptions::new(Some(10), None),
            &dir.path().join("out.png"),
        )
        .unwrap_err();

        assert!(matches!(err, ProcessingError::Decode { .. }));
    }

    #[test]
    fn test_probe_dimension_reads_header() {
        let dir = TempDir::new().unwrap();
        let source = write_source(dir.path(), "source.jpg", 64, 48);
        assert_eq!(probe_dimension(&source).unwrap(), dim(64, 48));
    }

    #[test]
    fn test_request_reports_image_dimension() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(40, 20));
        let request =
            CompositionRequest::new(image, dim(16, 9), PrepareOptions::new(Some(1), None)).unwrap();
        assert_eq!(request.image_dimension(), dim(40, 20));
        assert_eq!(request.display(), dim(16, 9));
        assert_eq!(request.render().unwrap().dimension(), dim(16, 9));
    }

    #[test]
    fn test_request_rejects_empty_source() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = CompositionRequest::new(image, dim(16, 9), PrepareOptions::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidRequest(_)));
    }
}
