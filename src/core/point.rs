//! 2D point type for world-frame sensor samples.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point in the shared world frame (millimeters).
///
/// Produced upstream by the pose/ranging pipeline as
/// `position + distance * (cos(heading), sin(heading))`.
/// The mapping engine requires both coordinates to be finite;
/// use [`Point2D::is_finite`] at the ingest boundary.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in world frame.
    pub x: f32,
    /// Y coordinate in world frame.
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Origin point.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point2D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// True iff both coordinates are finite (no NaN, no infinity).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Check approximate equality within an absolute epsilon.
    #[inline]
    pub fn approx_eq(&self, other: Point2D, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}
