//! Canvas compositing.
//!
//! Fills a display-sized canvas with the background color, establishes the
//! clip region (the area below the top margin, optionally with rounded
//! corners) and only then draws the scaled image into it. The margin band and
//! the rounded-off corners therefore always keep the background color.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use super::dimension::Dimension;
use super::error::ProcessingError;
use super::geometry::{ClipRegion, Rect, RoundedRectPath};

/// Opaque black, used for the margin band and anything the image does not cover.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A display-sized RGBA8 raster.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocates a canvas and fills every pixel with `color`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessingError::Allocation` if the buffer cannot be reserved.
    pub fn filled(dimension: Dimension, color: Rgba<u8>) -> Result<Self, ProcessingError> {
        let allocation_error = || ProcessingError::Allocation { dimension };

        let pixel_count = usize::try_from(dimension.pixel_count()).map_err(|_| allocation_error())?;
        let len = pixel_count.checked_mul(4).ok_or_else(allocation_error)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| allocation_error())?;
        pixels.extend(std::iter::repeat_n(color.0, pixel_count).flatten());

        let image = RgbaImage::from_raw(dimension.width(), dimension.height(), pixels)
            .ok_or_else(|| {
                ProcessingError::Composition(format!("canvas buffer does not match {dimension}"))
            })?;

        Ok(Self { image })
    }

    #[must_use]
    pub fn width(&self) -> u32 { self.image.width() }

    #[must_use]
    pub fn height(&self) -> u32 { self.image.height() }

    #[must_use]
    pub fn dimension(&self) -> Dimension { Dimension::clamped(self.width(), self.height()) }

    /// Returns the pixel at `(x, y)`, or `None` if it lies outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> { self.image.get_pixel_checked(x, y).copied() }

    /// Raw RGBA8 bytes in row-major order.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] { self.image.as_raw() }
}

/// Where the scaled image goes and what part of it stays visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// The full scaled image: horizontally centered, bottom-aligned with the canvas.
    pub placement: Rect,
    /// The canvas area below the top margin.
    pub available: Rect,
    /// The active clip.
    pub clip: ClipRegion,
}

/// Computes placement, available area and clip region for a composition.
///
/// A `border_radius` of zero behaves as if no radius was given.
#[must_use]
pub fn layout(
    scaled: Dimension,
    display: Dimension,
    margin_top: u32,
    border_radius: Option<u32>,
) -> Layout {
    let available_height = display.height().saturating_sub(margin_top);
    let available = Rect::new(0, i64::from(margin_top), display.width(), available_height);

    let x_offset = (i64::from(display.width()) - i64::from(scaled.width())) / 2;
    let y_offset = i64::from(display.height()) - i64::from(scaled.height());
    let placement = Rect::new(x_offset, y_offset, scaled.width(), scaled.height());

    let clip = match border_radius.filter(|radius| *radius > 0) {
        Some(radius) => placement.intersection(&available).map_or(
            ClipRegion::Rect(Rect::new(0, 0, 0, 0)),
            |region| ClipRegion::Rounded(RoundedRectPath::new(region, f64::from(radius))),
        ),
        None => ClipRegion::Rect(available),
    };

    Layout { placement, available, clip }
}

/// Composites `source` onto a new display-sized canvas.
///
/// The source is resampled to `scaled`, placed according to [`layout`] and
/// drawn through the clip region over an opaque black background. Only the
/// part of the scaled image that can reach the canvas is resampled, so the
/// overflow axis of an extreme aspect ratio costs nothing.
///
/// # Errors
///
/// Returns `ProcessingError::Allocation` if the canvas or the resampled window
/// cannot be allocated and `ProcessingError::Composition` if the scaled image
/// cannot be drawn.
pub fn composite(
    source: &DynamicImage,
    scaled: Dimension,
    display: Dimension,
    margin_top: u32,
    border_radius: Option<u32>,
) -> Result<Canvas, ProcessingError> {
    let mut canvas = Canvas::filled(display, BACKGROUND)?;
    let layout = layout(scaled, display, margin_top, border_radius);

    tracing::debug!(
        canvas = %canvas.dimension(),
        scaled = %scaled,
        margin_top,
        placement = ?layout.placement,
        rounded = matches!(layout.clip, ClipRegion::Rounded(_)),
        "compositing wallpaper"
    );

    let canvas_rect = Rect::new(0, 0, canvas.width(), canvas.height());
    let Some(visible) = layout
        .clip
        .bounds()
        .intersection(&layout.placement)
        .and_then(|visible| visible.intersection(&canvas_rect))
    else {
        return Ok(canvas);
    };

    let patch = resample(source, scaled, &visible, &layout.placement)?;
    draw_clipped(&mut canvas, &patch, &visible, &layout.clip)?;

    Ok(canvas)
}

/// Support radius of the `CatmullRom` kernel, in output pixels.
const FILTER_SUPPORT: u64 = 2;

/// A resampled part of the scaled image and where it sits on the canvas.
struct Patch {
    image: RgbaImage,
    x: i64,
    y: i64,
}

/// One axis of a resampled window: the source span and the scaled span it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisWindow {
    source_start: u32,
    source_len: u32,
    scaled_start: u32,
    scaled_len: u32,
}

/// Maps `[start, start + len)` of a scaled axis back onto the source axis.
///
/// The whole axis maps exactly. A partial window is widened to whole source
/// pixels plus the filter support, then mapped forward again, so the returned
/// scaled span always contains the requested one.
#[allow(clippy::cast_possible_truncation)]
fn axis_window(source_len: u32, scaled_len: u32, start: u32, len: u32) -> AxisWindow {
    if start == 0 && len >= scaled_len {
        return AxisWindow { source_start: 0, source_len, scaled_start: 0, scaled_len };
    }

    let (source, scaled) = (u64::from(source_len), u64::from(scaled_len));
    let end = u64::from(start) + u64::from(len);
    // Downscaling widens the kernel by the scale ratio.
    let padding = FILTER_SUPPORT * source.div_ceil(scaled) + 1;

    let source_start = (u64::from(start) * source / scaled).saturating_sub(padding);
    let source_end = ((end * source).div_ceil(scaled) + padding).min(source);
    let scaled_start = source_start * scaled / source;
    let scaled_end = (source_end * scaled).div_ceil(source).min(scaled);

    // All values are bounded by `source_len` or `scaled_len`, both u32.
    AxisWindow {
        source_start: source_start as u32,
        source_len: (source_end - source_start) as u32,
        scaled_start: scaled_start as u32,
        scaled_len: (scaled_end - scaled_start) as u32,
    }
}

/// Checks that a `dimension` RGBA8 buffer can be allocated before the resampler tries.
fn reserve_rgba(dimension: Dimension) -> Result<(), ProcessingError> {
    let allocation_error = || ProcessingError::Allocation { dimension };

    let len = usize::try_from(dimension.pixel_count())
        .ok()
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(allocation_error)?;
    Vec::<u8>::new().try_reserve_exact(len).map_err(|_| allocation_error())
}

/// Resamples the part of the scaled image that covers `visible` (canvas coordinates)
/// using `CatmullRom` (good quality, much faster than Lanczos3).
fn resample(
    source: &DynamicImage,
    scaled: Dimension,
    visible: &Rect,
    placement: &Rect,
) -> Result<Patch, ProcessingError> {
    let offset = |value: i64| {
        u32::try_from(value).map_err(|_| {
            ProcessingError::Composition(format!("visible area {visible:?} lies outside the placement"))
        })
    };
    let (window_x, window_y) = (offset(visible.x - placement.x)?, offset(visible.y - placement.y)?);

    let (source_width, source_height) = source.dimensions();
    let columns = axis_window(source_width, scaled.width(), window_x, visible.width);
    let rows = axis_window(source_height, scaled.height(), window_y, visible.height);

    let patch_x = placement.x + i64::from(columns.scaled_start);
    let patch_y = placement.y + i64::from(rows.scaled_start);

    if (source_width, source_height) == (scaled.width(), scaled.height()) {
        let image = source
            .crop_imm(columns.source_start, rows.source_start, columns.source_len, rows.source_len)
            .into_rgba8();
        return Ok(Patch { image, x: patch_x, y: patch_y });
    }

    reserve_rgba(Dimension::clamped(columns.scaled_len, rows.scaled_len))?;

    let image = source
        .crop_imm(columns.source_start, rows.source_start, columns.source_len, rows.source_len)
        .resize_exact(columns.scaled_len, rows.scaled_len, FilterType::CatmullRom)
        .into_rgba8();

    Ok(Patch { image, x: patch_x, y: patch_y })
}

/// Draws the pixels of `patch` that fall inside `visible`, restricted to `clip`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_clipped(
    canvas: &mut Canvas,
    patch: &Patch,
    visible: &Rect,
    clip: &ClipRegion,
) -> Result<(), ProcessingError> {
    for y in visible.y..visible.bottom() {
        for x in visible.x..visible.right() {
            let coverage = clip.coverage(x, y);
            if coverage <= 0.0 {
                continue;
            }

            // The patch origin never lies right of or below `visible`, and
            // `visible` lies within the canvas.
            let source = patch
                .image
                .get_pixel_checked((x - patch.x) as u32, (y - patch.y) as u32)
                .ok_or_else(|| {
                    ProcessingError::Composition(format!(
                        "canvas pixel ({x}, {y}) maps outside the scaled image"
                    ))
                })?;
            let target = canvas.image.get_pixel_mut_checked(x as u32, y as u32).ok_or_else(|| {
                ProcessingError::Composition(format!("canvas pixel ({x}, {y}) is out of bounds"))
            })?;

            blend(target, *source, coverage);
        }
    }

    Ok(())
}

/// Source-over blend of `source` onto an opaque `target`, scaled by `coverage`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(target: &mut Rgba<u8>, source: Rgba<u8>, coverage: f64) {
    let alpha = f64::from(source[3]) / 255.0 * coverage;

    if alpha >= 1.0 {
        *target = Rgba([source[0], source[1], source[2], 255]);
        return;
    }

    for channel in 0..3 {
        let mixed = f64::from(source[channel]).mul_add(alpha, f64::from(target[channel]) * (1.0 - alpha));
        target[channel] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    target[3] = 255;
}
