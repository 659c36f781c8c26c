//! Per-cycle orchestration: point ingestion and pairwise consolidation.
//!
//! The [`Resolver`] owns the [`SegmentStore`] and drives one synchronous
//! cycle per incoming sensor sample:
//!
//! ```text
//! point ──► ingest (match-or-create) ──► consolidate (merge / bridge)
//! ```
//!
//! Cycles run to completion before the next point is processed; there is
//! no internal suspension and no concurrent store mutation.

use crate::config::{MapperConfig, MatchPolicy, SegmentTuning};
use crate::core::Point2D;
use crate::segment::Segment;

mod store;

pub use store::{SegmentId, SegmentRecord, SegmentStore};

/// What `ingest` did with a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The point matched an existing segment.
    Matched {
        /// Segment that received the point.
        id: SegmentId,
        /// Whether the slope update was admitted (see
        /// [`Segment::add_point`]).
        admitted: bool,
    },
    /// No segment matched; a new one was created and seeded.
    Created {
        /// Id of the new segment.
        id: SegmentId,
    },
}

/// Contract violation at the ingest boundary.
///
/// Non-finite coordinates must be filtered by the upstream point source;
/// the engine refuses them loudly rather than let NaN poison the
/// accumulated statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IngestError {
    /// A coordinate was NaN or infinite.
    NonFinite {
        /// Offending point as received.
        x: f32,
        /// Offending point as received.
        y: f32,
    },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::NonFinite { x, y } => {
                write!(f, "non-finite input point ({}, {})", x, y)
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// The per-cycle orchestrator: match-or-create ingestion followed by an
/// all-pairs consolidation sweep.
#[derive(Clone, Debug)]
pub struct Resolver {
    store: SegmentStore,
    tuning: SegmentTuning,
    match_policy: MatchPolicy,
}

impl Resolver {
    /// Create a resolver from a validated configuration.
    pub fn new(config: MapperConfig) -> Result<Self, crate::config::ConfigError> {
        config.validate()?;
        Ok(Self {
            store: SegmentStore::new(),
            tuning: config.tuning(),
            match_policy: config.match_policy,
        })
    }

    /// The live segment store.
    #[inline]
    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    /// Run one full cycle for a sample: ingest, then consolidate.
    ///
    /// This is the per-sensor-sample entry point; cost is `O(k²)` in the
    /// number of live segments.
    pub fn step(&mut self, point: Point2D) -> Result<IngestOutcome, IngestError> {
        let outcome = self.ingest(point)?;
        self.consolidate();
        Ok(outcome)
    }

    /// Assign a point to a segment, or create a new one.
    ///
    /// Under [`MatchPolicy::FirstMatch`] the first segment (in insertion
    /// order) whose membership test passes receives the point; under
    /// [`MatchPolicy::NearestMatch`] the passing segment with the
    /// smallest membership distance does.
    pub fn ingest(&mut self, point: Point2D) -> Result<IngestOutcome, IngestError> {
        if !point.is_finite() {
            return Err(IngestError::NonFinite {
                x: point.x,
                y: point.y,
            });
        }

        if let Some(idx) = self.find_match(point) {
            let admitted = self.store.get_mut(idx).map_or(false, |segment| {
                segment.add_point(point.x, point.y)
            });
            return Ok(IngestOutcome::Matched {
                id: self.store.id_at(idx),
                admitted,
            });
        }

        let mut segment = Segment::new(point, self.tuning);
        segment.add_point(point.x, point.y);
        let id = self.store.insert(segment);
        log::debug!(
            "[Resolver] new segment {:?} at ({:.1}, {:.1}), {} live",
            id,
            point.x,
            point.y,
            self.store.len()
        );
        Ok(IngestOutcome::Created { id })
    }

    fn find_match(&self, point: Point2D) -> Option<usize> {
        match self.match_policy {
            MatchPolicy::FirstMatch => self
                .store
                .segments()
                .iter()
                .position(|segment| segment.in_line_radius(point, 1.0)),
            MatchPolicy::NearestMatch => self
                .store
                .segments()
                .iter()
                .enumerate()
                .filter(|(_, segment)| segment.in_line_radius(point, 1.0))
                .min_by(|(_, a), (_, b)| {
                    a.membership_distance(point)
                        .total_cmp(&b.membership_distance(point))
                })
                .map(|(idx, _)| idx),
        }
    }

    /// All-pairs consolidation sweep.
    ///
    /// For each segment `i`, every later segment `j` is offered via
    /// [`Segment::connect`]: on absorption `j` is removed from the store
    /// and the same position (now holding the next element) is retested;
    /// otherwise `j` advances. The sweep uses plain indices with
    /// `split_at_mut`, so removal never invalidates an iterator.
    pub fn consolidate(&mut self) {
        let mut i = 0;
        while i < self.store.len() {
            let mut j = i + 1;
            while j < self.store.len() {
                let absorbed = {
                    let (left, right) = self.store.split_at_mut(j);
                    left[i].connect(&mut right[0])
                };
                if absorbed {
                    let id = self.store.id_at(j);
                    self.store.remove(j);
                    log::debug!(
                        "[Resolver] merged segment {:?} into {:?}, {} live",
                        id,
                        self.store.id_at(i),
                        self.store.len()
                    );
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }

    /// Drop all session state.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}
