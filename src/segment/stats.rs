//! Running least-squares statistics for online line fitting.
//!
//! A segment never retains its raw points; everything needed to recover
//! the fitted line is folded into five running sums. Slope and intercept
//! come from the closed-form solution:
//!
//! ```text
//! m = (n·Σxy − Σx·Σy) / (n·Σxx − (Σx)²)
//! b = (Σy − m·Σx) / n
//! ```

use serde::{Deserialize, Serialize};

use crate::core::math::slope_angle;
use crate::core::Point2D;

/// Running sums over all points ever incorporated into a segment.
///
/// `n` is monotonically non-decreasing; sums are only added to, never
/// subtracted from (merge absorption adds the other side's sums in).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SufficientStats {
    /// Number of points incorporated.
    pub n: u32,
    /// Sum of x.
    pub sx: f32,
    /// Sum of y.
    pub sy: f32,
    /// Sum of x².
    pub sxx: f32,
    /// Sum of x·y.
    pub sxy: f32,
}

impl SufficientStats {
    /// Empty statistics (`n = 0`).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a point into the sums.
    #[inline]
    pub fn add(&mut self, x: f32, y: f32) {
        self.n += 1;
        self.sx += x;
        self.sy += y;
        self.sxx += x * x;
        self.sxy += x * y;
    }

    /// Candidate sums with one more point folded in, without committing.
    ///
    /// Used by transactional admission: validate the candidate first,
    /// commit only on acceptance.
    #[inline]
    pub fn with_point(mut self, x: f32, y: f32) -> Self {
        self.add(x, y);
        self
    }

    /// Hypothetical union of two statistics, without committing either side.
    #[inline]
    pub fn pooled(&self, other: &SufficientStats) -> Self {
        Self {
            n: self.n + other.n,
            sx: self.sx + other.sx,
            sy: self.sy + other.sy,
            sxx: self.sxx + other.sxx,
            sxy: self.sxy + other.sxy,
        }
    }

    /// Add another segment's sums into these (merge absorption).
    #[inline]
    pub fn absorb(&mut self, other: &SufficientStats) {
        *self = self.pooled(other);
    }

    /// Solve for the least-squares line through the accumulated points.
    ///
    /// Returns `None` while `n < 2`, or when the denominator
    /// `n·Σxx − (Σx)²` is zero (all x identical, e.g. an exactly
    /// vertical wall) — the caller keeps its previous fit in that case.
    pub fn solve(&self) -> Option<LineFit> {
        if self.n < 2 {
            return None;
        }
        let n = self.n as f32;
        let denominator = n * self.sxx - self.sx * self.sx;
        if denominator == 0.0 {
            return None;
        }
        let slope = (n * self.sxy - self.sx * self.sy) / denominator;
        let intercept = (self.sy - slope * self.sx) / n;
        Some(LineFit { slope, intercept })
    }
}

/// A fitted line `y = slope·x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineFit {
    /// Slope `m`.
    pub slope: f32,
    /// Intercept `b`.
    pub intercept: f32,
}

impl LineFit {
    /// Evaluate `y = m·x + b`.
    #[inline]
    pub fn predict_y(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }

    /// Solve `x = (y − b) / m`. Caller must ensure `m != 0`.
    #[inline]
    pub fn predict_x(&self, y: f32) -> f32 {
        (y - self.intercept) / self.slope
    }

    /// Angle of the line in slope space, (−π/2, π/2).
    #[inline]
    pub fn angle(&self) -> f32 {
        slope_angle(self.slope)
    }

    /// Project a point onto the line, choosing the numerically stable form.
    ///
    /// For near-horizontal lines (`|m| < 1`) the foot keeps the point's x
    /// and takes y from the line; for near-vertical lines it keeps y and
    /// solves for x. This avoids dividing by a small slope.
    #[inline]
    pub fn project(&self, p: Point2D) -> Point2D {
        if self.slope * self.slope < 1.0 {
            Point2D::new(p.x, self.predict_y(p.x))
        } else {
            Point2D::new(self.predict_x(p.y), p.y)
        }
    }
}
