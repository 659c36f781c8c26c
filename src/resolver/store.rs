//! Live collection of wall segments for the current session.

use serde::{Deserialize, Serialize};

use crate::core::{Bounds, Point2D};
use crate::segment::{Segment, SegmentState};

/// Stable identity of a segment within a session.
///
/// Ids are never reused, so a renderer can track a wall across cycles
/// even as other segments are absorbed and removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u32);

/// Exported view of one segment: the output contract of the engine.
///
/// Serializable so the host application can emit whatever structured
/// format it wants (JSON polyline sets, YAML session dumps, ...).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Stable segment identity.
    pub id: SegmentId,
    /// One extremity of the visible extent.
    pub endpoint_a: Point2D,
    /// The other extremity.
    pub endpoint_b: Point2D,
    /// Fitted slope, if the segment has one (`n >= 2`, non-degenerate).
    pub slope: Option<f32>,
    /// Fitted intercept, paired with `slope`.
    pub intercept: Option<f32>,
    /// Number of points incorporated.
    pub point_count: u32,
    /// Lifecycle state.
    pub state: SegmentState,
}

/// The live, unordered collection of segments.
///
/// Exclusively owned by the [`Resolver`](crate::Resolver) during a cycle;
/// supports insertion, removal after merge absorption, and in-place
/// mutation.
#[derive(Clone, Debug, Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    ids: Vec<SegmentId>,
    next_id: u32,
}

impl SegmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True iff no segments are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All live segments, in insertion order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment by position.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Segment> {
        self.segments.get(idx)
    }

    /// Mutable segment by position.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Segment> {
        self.segments.get_mut(idx)
    }

    /// Id of the segment at a position.
    #[inline]
    pub fn id_at(&self, idx: usize) -> SegmentId {
        self.ids[idx]
    }

    /// Insert a new segment, assigning it a fresh id.
    pub fn insert(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId(self.next_id);
        self.next_id += 1;
        self.segments.push(segment);
        self.ids.push(id);
        id
    }

    /// Remove the segment at a position (after it was absorbed by a merge).
    pub fn remove(&mut self, idx: usize) -> Segment {
        self.ids.remove(idx);
        self.segments.remove(idx)
    }

    /// Split mutable access at `mid`, for pairwise operations on two
    /// distinct segments without cloning.
    pub(crate) fn split_at_mut(&mut self, mid: usize) -> (&mut [Segment], &mut [Segment]) {
        self.segments.split_at_mut(mid)
    }

    /// Axis-aligned bounds over all segment endpoints.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.segments.iter();
        let first = iter.next()?;
        let [a, b] = first.endpoints();
        let mut bounds = Bounds::from_point(a);
        bounds.expand_to_include(b);
        for segment in iter {
            let [a, b] = segment.endpoints();
            bounds.expand_to_include(a);
            bounds.expand_to_include(b);
        }
        Some(bounds)
    }

    /// Snapshot of the store as exportable records, in insertion order.
    pub fn records(&self) -> Vec<SegmentRecord> {
        self.segments
            .iter()
            .zip(&self.ids)
            .map(|(segment, &id)| {
                let [endpoint_a, endpoint_b] = segment.endpoints();
                let fit = segment.fit();
                SegmentRecord {
                    id,
                    endpoint_a,
                    endpoint_b,
                    slope: fit.map(|f| f.slope),
                    intercept: fit.map(|f| f.intercept),
                    point_count: segment.point_count(),
                    state: segment.state(),
                }
            })
            .collect()
    }

    /// Drop all segments (ids are still not reused afterwards).
    pub fn clear(&mut self) {
        self.segments.clear();
        self.ids.clear();
    }
}
