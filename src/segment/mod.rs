//! The online-fitted wall segment entity.
//!
//! A [`Segment`] is one candidate wall: running least-squares statistics,
//! a cached slope/intercept, two endpoints bounding its visible extent,
//! and a radius-based membership test. Points are folded into sums and
//! never retained, so memory stays constant no matter how many samples a
//! wall receives.
//!
//! Admission control: a brand-new segment accepts almost any direction
//! (start tolerance ≈ 90°), but the tolerance decays exponentially with
//! point count, so a well-observed wall "locks in" and shrugs off
//! out-of-line samples.

use serde::{Deserialize, Serialize};

use crate::config::{AdmissionPolicy, SegmentTuning};
use crate::core::math::local_angle;
use crate::core::Point2D;

mod stats;

pub use stats::{LineFit, SufficientStats};

use std::f32::consts::PI;

/// Segment lifecycle state, driven purely by point count.
///
/// Transitions are monotonic: `Nascent → Trending → Established`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentState {
    /// Fewer than 2 points: degenerates to a single representative point.
    Nascent,
    /// Fitted, but direction still adjustable.
    Trending,
    /// Past the established threshold: stricter endpoint-extension guard.
    Established,
}

/// An online least-squares-fitted line segment approximating one wall.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Segment {
    stats: SufficientStats,
    /// Cached fit, populated once `n >= 2` and the least-squares
    /// denominator is nonzero.
    fit: Option<LineFit>,
    /// The two extremities of the visible extent. Mutated only by outward
    /// extension, never retracted.
    endpoints: [Point2D; 2],
    /// First point ever seen; the representative point while `n < 2`.
    seed: Point2D,
    #[serde(skip, default = "default_tuning")]
    tuning: SegmentTuning,
}

fn default_tuning() -> SegmentTuning {
    crate::config::MapperConfig::default().tuning()
}

impl Segment {
    /// Create a segment seeded at a point (`n = 0`; the seed is not yet
    /// folded in — the caller adds it via [`Segment::add_point`]).
    pub fn new(seed: Point2D, tuning: SegmentTuning) -> Self {
        Self {
            stats: SufficientStats::new(),
            fit: None,
            endpoints: [seed, seed],
            seed,
            tuning,
        }
    }

    /// Number of points incorporated so far.
    #[inline]
    pub fn point_count(&self) -> u32 {
        self.stats.n
    }

    /// The cached fit, if any.
    #[inline]
    pub fn fit(&self) -> Option<LineFit> {
        self.fit
    }

    /// Running sufficient statistics.
    #[inline]
    pub fn stats(&self) -> &SufficientStats {
        &self.stats
    }

    /// The two endpoints bounding the visible extent.
    #[inline]
    pub fn endpoints(&self) -> [Point2D; 2] {
        self.endpoints
    }

    /// Base membership radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.tuning.radius
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SegmentState {
        if self.stats.n < 2 {
            SegmentState::Nascent
        } else if self.stats.n <= self.tuning.established_threshold {
            SegmentState::Trending
        } else {
            SegmentState::Established
        }
    }

    /// Incorporate a new sample.
    ///
    /// Returns `true` if the slope update was committed (always the case
    /// while `n < 3`), `false` if the sample's implied direction was out
    /// of tolerance and the cached fit was left unchanged. Under
    /// [`AdmissionPolicy::FoldAlways`] a rejected sample still perturbs
    /// the running sums; under the default transactional policy it leaves
    /// no trace at all.
    pub fn add_point(&mut self, x: f32, y: f32) -> bool {
        let candidate = self.stats.with_point(x, y);
        let mut new_fit = self.fit;

        if candidate.n >= 2 {
            match candidate.solve() {
                Some(solved) => {
                    if candidate.n > 2 {
                        if let Some(current) = self.fit {
                            let angle_diff = (current.angle() - solved.angle()).abs();
                            let tolerance = self.tuning.tolerance(candidate.n);
                            if angle_diff > tolerance {
                                log::debug!(
                                    "[Segment] rejected sample ({:.1}, {:.1}): \
                                     angle diff {:.4} rad > tolerance {:.4} rad at n={}",
                                    x,
                                    y,
                                    angle_diff,
                                    tolerance,
                                    candidate.n
                                );
                                if self.tuning.admission == AdmissionPolicy::FoldAlways {
                                    self.stats = candidate;
                                }
                                return false;
                            }
                        }
                    }
                    new_fit = Some(solved);
                }
                // Zero denominator: no fit update this call, sums still
                // commit (this is a degenerate geometry, not a rejection).
                None => {}
            }
        }

        self.stats = candidate;
        self.fit = new_fit;

        if self.stats.n > 2 {
            self.try_extend(Point2D::new(x, y));
        } else {
            self.endpoints[1] = Point2D::new(x, y);
        }
        true
    }

    /// True iff the point lies strictly inside the rectangle spanned by
    /// the two endpoints.
    #[inline]
    pub fn in_boundary(&self, p: Point2D) -> bool {
        let [a, b] = self.endpoints;
        p.x > a.x.min(b.x) && p.x < a.x.max(b.x) && p.y > a.y.min(b.y) && p.y < a.y.max(b.y)
    }

    /// Membership distance from a point to this segment.
    ///
    /// - `n < 2`: distance to the representative seed point
    /// - inside the endpoint rectangle: distance to the stable projection
    ///   onto the fitted line
    /// - otherwise: minimum distance to either endpoint
    pub fn membership_distance(&self, p: Point2D) -> f32 {
        if self.stats.n < 2 {
            return p.distance(self.seed);
        }
        if self.in_boundary(p) {
            if let Some(fit) = self.fit {
                return p.distance(fit.project(p));
            }
        }
        let [a, b] = self.endpoints;
        p.distance(a).min(p.distance(b))
    }

    /// Radius-based membership test used by ingestion and merge/bridge
    /// logic: `membership_distance(p) < radius · multiplier`.
    #[inline]
    pub fn in_line_radius(&self, p: Point2D, multiplier: f32) -> bool {
        self.membership_distance(p) < self.tuning.radius * multiplier
    }

    /// Check whether merging `other` into this segment keeps both sides'
    /// directions coherent.
    ///
    /// Pools both segments' statistics hypothetically and requires the
    /// joint slope's angular deviation from each fitted side's own slope
    /// to be within that side's tolerance at the combined count. A side
    /// without a fit yet carries its evidence entirely in the pooled sums
    /// and imposes no angular constraint.
    pub fn can_combine(&self, other: &Segment) -> bool {
        let pooled = self.stats.pooled(&other.stats);
        let Some(joint) = pooled.solve() else {
            return true;
        };
        if let Some(fit) = self.fit {
            if (fit.angle() - joint.angle()).abs() > self.tuning.tolerance(pooled.n) {
                return false;
            }
        }
        if let Some(fit) = other.fit {
            if (fit.angle() - joint.angle()).abs() > other.tuning.tolerance(pooled.n) {
                return false;
            }
        }
        true
    }

    /// Irreversibly absorb `other` into this segment.
    ///
    /// Adds `other`'s sufficient statistics in, recomputes the fit, and
    /// extends the endpoints outward to also cover both of `other`'s
    /// endpoints. The caller is responsible for discarding `other`.
    pub fn combine(&mut self, other: &Segment) {
        self.stats.absorb(&other.stats);
        if let Some(solved) = self.stats.solve() {
            self.fit = Some(solved);
        }
        let [a, b] = other.endpoints;
        self.try_extend(a);
        self.try_extend(b);
        log::debug!(
            "[Segment] absorbed segment with n={} (combined n={})",
            other.stats.n,
            self.stats.n
        );
    }

    /// Try to consolidate with another segment.
    ///
    /// Returns `true` iff `other` was absorbed into `self` (the caller
    /// must then remove `other` from its store). When the segments are
    /// too far or not colinear enough to merge, but their infinite lines
    /// intersect near both segments and both are established enough, the
    /// intersection is fed into both as a synthetic corner sample —
    /// nudging each endpoint toward the shared corner without merging
    /// identities — and `false` is returned.
    pub fn connect(&mut self, other: &mut Segment) -> bool {
        let mut min_distance = f32::INFINITY;
        let mut closest_other = other.endpoints[0];
        for end_self in self.endpoints {
            for end_other in other.endpoints {
                let d = end_self.distance(end_other);
                if d < min_distance {
                    min_distance = d;
                    closest_other = end_other;
                }
            }
        }

        if self.in_line_radius(closest_other, 1.0) && self.can_combine(other) {
            self.combine(other);
            return true;
        }

        // Too little data on both sides for a line intersection.
        if self.stats.n < 2 && other.stats.n < 2 {
            return false;
        }
        let (Some(fit_self), Some(fit_other)) = (self.fit, other.fit) else {
            return false;
        };
        // Parallel: no unique intersection.
        if fit_self.slope == fit_other.slope {
            return false;
        }

        let ix = (fit_other.intercept - fit_self.intercept) / (fit_self.slope - fit_other.slope);
        let iy = fit_self.predict_y(ix);
        let intersection = Point2D::new(ix, iy);

        let multiplier = self.tuning.bridge_radius_multiplier;
        if self.stats.n > self.tuning.bridge_min_points
            && other.stats.n > other.tuning.bridge_min_points
            && self.in_line_radius(intersection, multiplier)
            && other.in_line_radius(intersection, multiplier)
        {
            log::debug!(
                "[Segment] bridging corner at ({:.1}, {:.1})",
                intersection.x,
                intersection.y
            );
            self.add_point(ix, iy);
            other.add_point(ix, iy);
        }
        false
    }

    /// Extend an endpoint outward if the new point lies outside the
    /// current endpoint rectangle.
    ///
    /// The replacement endpoint is the stable projection of the point
    /// onto the fitted line. Once Established, the extension is gated:
    /// the local direction from the chosen endpoint to the raw point must
    /// stay within the configured angle of the segment's slope, so one
    /// noisy outlier cannot snap a long wall's endpoint outward.
    fn try_extend(&mut self, p: Point2D) {
        if self.in_boundary(p) {
            return;
        }
        let Some(fit) = self.fit else {
            return;
        };

        let [a, b] = self.endpoints;
        let replacement = fit.project(p);

        // Pick the endpoint on the side the point extends past, along the
        // axis matching the stable projection form.
        let index = if fit.slope * fit.slope < 1.0 {
            if p.x < a.x.min(b.x) {
                if a.x < b.x {
                    0
                } else {
                    1
                }
            } else if p.x > a.x.max(b.x) {
                if a.x > b.x {
                    0
                } else {
                    1
                }
            } else {
                return;
            }
        } else if p.y < a.y.min(b.y) {
            if a.y < b.y {
                0
            } else {
                1
            }
        } else if p.y > a.y.max(b.y) {
            if a.y > b.y {
                0
            } else {
                1
            }
        } else {
            return;
        };

        if self.state() == SegmentState::Established {
            let anchor = self.endpoints[index];
            let local = local_angle(p.x - anchor.x, p.y - anchor.y);
            let diff = (local - fit.angle()).abs();
            // Undirected lines: a near-π difference is near-parallel.
            let diff = diff.min(PI - diff);
            if diff > self.tuning.extension_angle_limit {
                log::trace!(
                    "[Segment] extension blocked: local angle off by {:.3} rad",
                    diff
                );
                return;
            }
        }

        self.endpoints[index] = replacement;
    }
}
