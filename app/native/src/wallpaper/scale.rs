//! Scale computation for fitting an image into the area below the top margin.
//!
//! The image is scaled so it exactly fills the available area along one axis
//! and overflows along the other. The overflow is later removed by the
//! compositor: horizontally by centering, vertically by clipping.

use std::fmt;

use serde::Serialize;

use super::dimension::{Dimension, Orientation};
use super::error::ProcessingError;

/// Checks that `margin_top` leaves at least one row of `display` for the image.
///
/// # Errors
///
/// Returns `ProcessingError::InvalidRequest` if the margin covers the display.
pub fn check_margin(display: Dimension, margin_top: u32) -> Result<(), ProcessingError> {
    if margin_top >= display.height() {
        return Err(ProcessingError::InvalidRequest(format!(
            "top margin {margin_top}px leaves no room on a {display} display"
        )));
    }
    Ok(())
}

/// Computes the dimension the image must be scaled to.
///
/// `margin_top` must be smaller than `display.height()`; callers validate this
/// with [`check_margin`] before getting here.
///
/// The comparison and the scaling use integer arithmetic, so a tie between the
/// image aspect and the available aspect takes the first branch and both
/// branches produce the same result. Fractional results are truncated and never
/// drop below one pixel.
#[must_use]
pub fn compute(image: Dimension, display: Dimension, margin_top: u32) -> Dimension {
    debug_assert!(margin_top < display.height(), "margin must leave an available area");

    let available_height = display.height().saturating_sub(margin_top).max(1);

    match axis_for(image, display, available_height) {
        CropAxis::Horizontal => {
            let width = scale_component(image.width(), available_height, image.height());
            Dimension::clamped(width, available_height)
        }
        CropAxis::Vertical => {
            let height = scale_component(image.height(), display.width(), image.width());
            Dimension::clamped(display.width(), height)
        }
    }
}

/// Returns which axis overflows the available area after scaling.
///
/// `image.w / image.h >= display.w / available_h` is evaluated as a cross
/// product to keep ties exact.
fn axis_for(image: Dimension, display: Dimension, available_height: u32) -> CropAxis {
    let image_side = u64::from(image.width()) * u64::from(available_height);
    let available_side = u64::from(display.width()) * u64::from(image.height());

    if image_side >= available_side { CropAxis::Horizontal } else { CropAxis::Vertical }
}

/// Returns `floor(value * numerator / denominator)`, saturating at `u32::MAX`.
#[allow(clippy::cast_possible_truncation)]
fn scale_component(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(numerator) / u64::from(denominator);
    scaled.min(u64::from(u32::MAX)) as u32
}

/// Axis along which the scaled image is larger than the available area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CropAxis {
    /// Scaled to the available height; excess width is cropped evenly on both sides.
    Horizontal,
    /// Scaled to the display width; excess height is clipped at the top.
    Vertical,
}

/// Whether the image grows or shrinks when scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleDirection {
    Up,
    Down,
    None,
}

impl fmt::Display for ScaleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Describes how an image will be scaled and cropped for a display.
///
/// Computed from dimensions alone, so it can be produced without decoding
/// the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingReport {
    pub image: Dimension,
    pub display: Dimension,
    pub margin_top: u32,
    pub orientation: Orientation,
    pub scale_factor: f64,
    pub direction: ScaleDirection,
    pub scaled: Dimension,
    pub crop_axis: CropAxis,
    pub crop_pixels: u32,
}

impl ScalingReport {
    /// Builds the report for `image` placed on `display` with `margin_top`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessingError::InvalidRequest` if the margin covers the display.
    pub fn new(image: Dimension, display: Dimension, margin_top: u32) -> Result<Self, ProcessingError> {
        check_margin(display, margin_top)?;

        let available_height = display.height().saturating_sub(margin_top).max(1);
        let crop_axis = axis_for(image, display, available_height);
        let scaled = compute(image, display, margin_top);

        let (scale_factor, crop_pixels) = match crop_axis {
            CropAxis::Horizontal => (
                f64::from(available_height) / f64::from(image.height()),
                scaled.width().saturating_sub(display.width()),
            ),
            CropAxis::Vertical => (
                f64::from(display.width()) / f64::from(image.width()),
                scaled.height().saturating_sub(available_height),
            ),
        };

        let direction = if scale_factor > 1.0 {
            ScaleDirection::Up
        } else if scale_factor < 1.0 {
            ScaleDirection::Down
        } else {
            ScaleDirection::None
        };

        Ok(Self {
            image,
            display,
            margin_top,
            orientation: image.orientation(),
            scale_factor,
            direction,
            scaled,
            crop_axis,
            crop_pixels,
        })
    }
}

impl fmt::Display for ScalingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.crop_axis {
            CropAxis::Horizontal => "horizontally",
            CropAxis::Vertical => "vertically",
        };

        writeln!(f, "Image orientation: {}", self.orientation)?;
        writeln!(f, "Scaling factor: {:.2}x ({})", self.scale_factor, self.direction)?;
        writeln!(f, "Image will be scaled to {}", self.scaled)?;
        write!(f, "Image cropping {}px {axis}", self.crop_pixels)
    }
}
