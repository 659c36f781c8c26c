//! Angle utilities for slope-space comparisons.
//!
//! Line directions are undirected, so all angles here live in the
//! open interval (−π/2, π/2] rather than the full circle.

use std::f32::consts::FRAC_PI_2;

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad.to_degrees()
}

/// Angle of a line given its slope, in (−π/2, π/2).
///
/// This is the angle space the admission tolerance compares in:
/// `slope_angle(m) = atan(m)`.
#[inline]
pub fn slope_angle(slope: f32) -> f32 {
    slope.atan()
}

/// Undirected angle of a displacement `(dx, dy)`, in [−π/2, π/2].
///
/// Safe for vertical displacements (`dx == 0` maps to π/2), which is why
/// the endpoint-extension guard uses this instead of `atan(dy/dx)`.
#[inline]
pub fn local_angle(dx: f32, dy: f32) -> f32 {
    if dx == 0.0 {
        FRAC_PI_2
    } else {
        (dy / dx).atan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_deg_rad_conversion() {
        assert_relative_eq!(deg_to_rad(180.0), PI, epsilon = 1e-6);
        assert_relative_eq!(deg_to_rad(90.0), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(rad_to_deg(PI), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_slope_angle() {
        assert_relative_eq!(slope_angle(0.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(slope_angle(1.0), FRAC_PI_4, epsilon = 1e-6);
        assert_relative_eq!(slope_angle(-1.0), -FRAC_PI_4, epsilon = 1e-6);
        // Steep slopes saturate towards ±π/2
        assert!(slope_angle(1e6) > FRAC_PI_2 - 1e-3);
    }

    #[test]
    fn test_local_angle_vertical_safe() {
        assert_relative_eq!(local_angle(0.0, 5.0), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(local_angle(1.0, 1.0), FRAC_PI_4, epsilon = 1e-6);
        assert_relative_eq!(local_angle(2.0, 0.0), 0.0, epsilon = 1e-6);
    }
}
