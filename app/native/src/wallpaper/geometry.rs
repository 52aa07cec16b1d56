//! Canvas geometry: integer rectangles, the rounded-rectangle contour and clip regions.
//!
//! All coordinates use a top-left origin with `y` growing downwards, matching
//! the raster layout of the canvas.

use std::f64::consts::{FRAC_PI_2, PI};

/// Number of samples per axis for supersampling anti-aliasing.
pub const AA_SAMPLES: u32 = 4;

/// An axis-aligned rectangle on the integer pixel grid.
///
/// The origin may be negative: a scaled image wider than the display is placed
/// partly off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub const fn right(&self) -> i64 { self.x + self.width as i64 }

    #[must_use]
    pub const fn bottom(&self) -> i64 { self.y + self.height as i64 }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }

    /// Returns whether the pixel at `(x, y)` lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns the overlapping area of two rectangles, or `None` if they do not overlap.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return None;
        }

        // Both extents are bounded by one of the inputs' u32 sides.
        Some(Self::new(x, y, (right - x) as u32, (bottom - y) as u32))
    }
}

/// A point in continuous canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 { (self.x - other.x).hypot(self.y - other.y) }
}

/// One element of a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// A straight edge.
    Line { from: Point, to: Point },
    /// A circular arc around `center`, starting at `start_angle` and sweeping
    /// `sweep` radians. Angles follow the canvas orientation, so a positive
    /// sweep is clockwise on screen.
    Arc { center: Point, radius: f64, start_angle: f64, sweep: f64 },
}

impl PathSegment {
    #[must_use]
    pub fn start(&self) -> Point {
        match *self {
            Self::Line { from, .. } => from,
            Self::Arc { center, radius, start_angle, .. } => point_on_circle(center, radius, start_angle),
        }
    }

    #[must_use]
    pub fn end(&self) -> Point {
        match *self {
            Self::Line { to, .. } => to,
            Self::Arc { center, radius, start_angle, sweep } => {
                point_on_circle(center, radius, start_angle + sweep)
            }
        }
    }
}

fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(radius.mul_add(angle.cos(), center.x), radius.mul_add(angle.sin(), center.y))
}

/// Closed rounded-rectangle contour.
///
/// The contour has eight segments alternating straight edges and quarter
/// arcs, traversed clockwise starting on the top edge just right of the
/// top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectPath {
    bounds: Rect,
    radius: f64,
    segments: Vec<PathSegment>,
}

impl RoundedRectPath {
    /// Builds the contour for `rect`, clamping the radius to half the smaller side.
    #[must_use]
    pub fn new(rect: Rect, corner_radius: f64) -> Self {
        let max_radius = f64::from(rect.width.min(rect.height)) / 2.0;
        let radius = corner_radius.clamp(0.0, max_radius);

        #[allow(clippy::cast_precision_loss)]
        let (min_x, min_y, max_x, max_y) =
            (rect.x as f64, rect.y as f64, rect.right() as f64, rect.bottom() as f64);

        let arc = |cx: f64, cy: f64, start_angle: f64| PathSegment::Arc {
            center: Point::new(cx, cy),
            radius,
            start_angle,
            sweep: FRAC_PI_2,
        };
        let line = |x0: f64, y0: f64, x1: f64, y1: f64| PathSegment::Line {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
        };

        let segments = vec![
            line(min_x + radius, min_y, max_x - radius, min_y),
            arc(max_x - radius, min_y + radius, -FRAC_PI_2),
            line(max_x, min_y + radius, max_x, max_y - radius),
            arc(max_x - radius, max_y - radius, 0.0),
            line(max_x - radius, max_y, min_x + radius, max_y),
            arc(min_x + radius, max_y - radius, FRAC_PI_2),
            line(min_x, max_y - radius, min_x, min_y + radius),
            arc(min_x + radius, min_y + radius, PI),
        ];

        Self { bounds: rect, radius, segments }
    }

    #[must_use]
    pub const fn bounds(&self) -> Rect { self.bounds }

    /// The effective (clamped) corner radius.
    #[must_use]
    pub const fn radius(&self) -> f64 { self.radius }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] { &self.segments }

    /// Returns whether each segment starts where the previous one ends and the
    /// last segment returns to the first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        const EPSILON: f64 = 1e-6;

        if self.segments.is_empty() {
            return false;
        }

        // Pairs every segment with its successor, wrapping the last onto the first.
        self.segments
            .iter()
            .zip(self.segments.iter().cycle().skip(1))
            .all(|(current, next)| current.end().distance(next.start()) < EPSILON)
    }

    /// Returns whether `point` lies inside the contour (boundary included).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn contains(&self, point: Point) -> bool {
        let (min_x, min_y) = (self.bounds.x as f64, self.bounds.y as f64);
        let (max_x, max_y) = (self.bounds.right() as f64, self.bounds.bottom() as f64);

        if point.x < min_x || point.x > max_x || point.y < min_y || point.y > max_y {
            return false;
        }

        // Clamping to the inner rectangle yields the nearest corner center when
        // the point sits in a corner square, and the point itself otherwise.
        let nearest = Point::new(
            point.x.clamp(min_x + self.radius, max_x - self.radius),
            point.y.clamp(min_y + self.radius, max_y - self.radius),
        );

        point.distance(nearest) <= self.radius
    }

    /// Returns whether the pixel at `(x, y)` lies entirely outside every corner square.
    #[allow(clippy::cast_possible_truncation)]
    fn clear_of_corners(&self, x: i64, y: i64) -> bool {
        let reach = self.radius.ceil() as i64;
        let b = self.bounds;

        (x >= b.x + reach && x < b.right() - reach) || (y >= b.y + reach && y < b.bottom() - reach)
    }
}

/// The region outside of which drawing has no effect.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipRegion {
    /// Hard-edged rectangle.
    Rect(Rect),
    /// Rounded rectangle, anti-aliased along the corner arcs.
    Rounded(RoundedRectPath),
}

impl ClipRegion {
    /// The pixel rectangle enclosing the region.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        match self {
            Self::Rect(rect) => *rect,
            Self::Rounded(path) => path.bounds(),
        }
    }

    /// Fraction of the pixel at `(x, y)` covered by the region, in `0.0..=1.0`.
    ///
    /// Uses `AA_SAMPLES`×`AA_SAMPLES` supersampling near the rounded corners.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self, x: i64, y: i64) -> f64 {
        match self {
            Self::Rect(rect) => {
                if rect.contains(x, y) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Rounded(path) => {
                if !path.bounds().contains(x, y) {
                    return 0.0;
                }
                if path.clear_of_corners(x, y) {
                    return 1.0;
                }

                let step = 1.0 / f64::from(AA_SAMPLES);
                let mut inside = 0u32;

                for sy in 0..AA_SAMPLES {
                    for sx in 0..AA_SAMPLES {
                        let sample = Point::new(
                            (f64::from(sx) + 0.5).mul_add(step, x as f64),
                            (f64::from(sy) + 0.5).mul_add(step, y as f64),
                        );
                        if path.contains(sample) {
                            inside += 1;
                        }
                    }
                }

                f64::from(inside) / f64::from(AA_SAMPLES * AA_SAMPLES)
            }
        }
    }
}
