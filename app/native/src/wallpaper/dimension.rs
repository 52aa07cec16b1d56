//! Pixel dimensions for images and displays.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A width/height pair in pixels.
///
/// Both components are strictly positive; the only way to obtain a
/// `Dimension` is through a constructor that rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimension {
    width: u32,
    height: u32,
}

impl Dimension {
    /// Creates a dimension, returning `None` if either side is zero.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// Creates a dimension, clamping zero sides to one pixel.
    #[must_use]
    pub const fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    #[must_use]
    pub const fn width(self) -> u32 { self.width }

    #[must_use]
    pub const fn height(self) -> u32 { self.height }

    /// Returns `width / height`.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 { f64::from(self.width) / f64::from(self.height) }

    /// Returns the number of pixels covered by this dimension.
    #[must_use]
    pub const fn pixel_count(self) -> u64 { self.width as u64 * self.height as u64 }

    /// Returns the orientation implied by the aspect ratio.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else if self.width < self.height {
            Orientation::Portrait
        } else {
            Orientation::Square
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Error returned when a `WIDTHxHEIGHT` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid dimension '{input}': expected WIDTHxHEIGHT with positive integers (e.g. 1920x1080)")]
pub struct DimensionParseError {
    input: String,
}

impl DimensionParseError {
    pub(crate) fn new(input: &str) -> Self { Self { input: input.to_string() } }
}

impl FromStr for Dimension {
    type Err = DimensionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DimensionParseError::new(s);

        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(err)?;
        let width = width.trim().parse::<u32>().map_err(|_| err())?;
        let height = height.trim().parse::<u32>().map_err(|_| err())?;

        Self::new(width, height).ok_or_else(err)
    }
}

/// Image orientation derived from its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landscape => write!(f, "landscape"),
            Self::Portrait => write!(f, "portrait"),
            Self::Square => write!(f, "square"),
        }
    }
}
