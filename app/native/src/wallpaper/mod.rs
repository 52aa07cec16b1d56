//! Wallpaper preparation.
//!
//! Turns a source image into a display-sized PNG:
//!
//! - [`scale`] - computes the scaled image size for the area below the top margin
//! - [`compositor`] - fills the canvas, clips (optionally with rounded corners) and draws
//! - [`encoder`] - writes the canvas as PNG
//! - [`pipeline`] - `prepare`, the single-display entry point
//! - [`batch`] - `prepare_all`, one independent `prepare` per display in parallel

pub mod batch;
pub mod compositor;
pub mod dimension;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod scale;

pub use batch::{DisplayOutcome, DisplaySpec, DisplayTarget, prepare_all};
pub use compositor::{BACKGROUND, Canvas, composite};
pub use dimension::{Dimension, DimensionParseError, Orientation};
pub use encoder::encode_png;
pub use error::ProcessingError;
pub use geometry::{ClipRegion, PathSegment, Rect, RoundedRectPath};
pub use output::{default_output_dir, ensure_output_dir, output_path};
pub use pipeline::{CompositionRequest, PrepareOptions, prepare, probe_dimension};
pub use scale::{CropAxis, ScaleDirection, ScalingReport, check_margin};
