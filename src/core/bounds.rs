//! Axis-aligned bounding box over map features.

use serde::{Deserialize, Serialize};

use super::Point2D;

/// Axis-aligned bounding box.
///
/// Grows monotonically as segments are discovered; used for store-level
/// extent queries and for sizing exported renderings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Point2D,
    /// Maximum corner.
    pub max: Point2D,
}

impl Bounds {
    /// Create a degenerate bounds containing a single point.
    #[inline]
    pub fn from_point(p: Point2D) -> Self {
        Self { min: p, max: p }
    }

    /// Expand to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, p: Point2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Width of the box (x extent).
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box (y extent).
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True iff the point lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
