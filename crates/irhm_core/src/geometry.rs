//! Points and bounding boxes over sample coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::SampleCollection;
use crate::error::CoreError;

/// A physical `(x, y)` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle enclosing a set of samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x_min: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Top edge.
    pub y_max: f64,
}

impl BoundingBox {
    /// Returns the lower-left corner.
    pub fn min(&self) -> Point {
        Point::new(self.x_min, self.y_min)
    }

    /// Returns the upper-right corner.
    pub fn max(&self) -> Point {
        Point::new(self.x_max, self.y_max)
    }

    /// Returns the horizontal extent.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Returns the vertical extent.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns `true` if `p` lies in the half-open box `[min, max)`.
    pub fn contains(&self, p: Point) -> bool {
        self.x_min <= p.x && p.x < self.x_max && self.y_min <= p.y && p.y < self.y_max
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min(), self.max())
    }
}

/// Computes the box enclosing every sample of `collection`, grown by `expand`.
///
/// Without an origin, both axes are derived from the data:
/// `[min - expand, max + expand]`. With an origin, only the x minimum is
/// pinned to `origin.x` (and not reduced by `expand`); `origin.y` is ignored
/// and the y range is still derived from the data.
///
/// # Errors
///
/// Returns [`CoreError::EmptyCollection`] if the collection has no samples,
/// [`CoreError::NonFiniteSample`] if any coordinate is infinite or NaN and
/// [`CoreError::NonFiniteExtent`] if the grown box overflows.
pub fn compute_box(
    collection: &SampleCollection,
    origin: Option<Point>,
    expand: f64,
) -> Result<BoundingBox, CoreError> {
    if let Some(s) = collection
        .samples()
        .find(|s| !(s.x.is_finite() && s.y.is_finite()))
    {
        return Err(CoreError::NonFiniteSample { x: s.x, y: s.y });
    }
    let mut samples = collection.samples();
    let first = samples.next().ok_or(CoreError::EmptyCollection)?;

    let (mut x_min, mut x_max) = (first.x, first.x);
    let (mut y_min, mut y_max) = (first.y, first.y);
    for s in samples {
        x_min = x_min.min(s.x);
        x_max = x_max.max(s.x);
        y_min = y_min.min(s.y);
        y_max = y_max.max(s.y);
    }

    // The origin pins the x axis only.
    let x_min = match origin {
        Some(o) => o.x,
        None => x_min - expand,
    };

    let bbox = BoundingBox {
        x_min,
        y_min: y_min - expand,
        x_max: x_max + expand,
        y_max: y_max + expand,
    };
    if !(bbox.width().is_finite() && bbox.height().is_finite()) {
        return Err(CoreError::NonFiniteExtent(bbox));
    }
    Ok(bbox)
}
