//! # Wallmap: Incremental Wall-Segment Mapping Engine
//!
//! An online mapping engine for operator-worn tracking rigs that fuse
//! dead reckoning with a rotating single-beam range sensor. It consumes
//! a stream of world-frame 2D points and incrementally fits, extends,
//! and consolidates them into a small set of line segments representing
//! the walls of an unknown building — without ever re-scanning the point
//! history.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wallmap::{MapperConfig, Point2D, Resolver};
//!
//! let mut resolver = Resolver::new(MapperConfig::default())?;
//!
//! // One cycle per sensor sample
//! resolver.step(Point2D::new(120.0, 40.0))?;
//!
//! for wall in resolver.store().records() {
//!     println!(
//!         "wall {:?}: ({:.0}, {:.0}) -> ({:.0}, {:.0}), {} points",
//!         wall.id,
//!         wall.endpoint_a.x,
//!         wall.endpoint_a.y,
//!         wall.endpoint_b.x,
//!         wall.endpoint_b.y,
//!         wall.point_count,
//!     );
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! pose/ranging pipeline (external)
//!         │  world-frame Point2D, one per sample
//!         ▼
//! ┌───────────────┐   match-or-create   ┌──────────────┐
//! │   Resolver    │────────────────────►│ SegmentStore │
//! │ ingest + all- │   merge / bridge    │ (live walls) │
//! │ pairs sweep   │◄────────────────────│              │
//! └───────────────┘                     └──────┬───────┘
//!                                              │ records() / SVG
//!                                              ▼
//!                                    renderer / exporter
//! ```
//!
//! ## Design
//!
//! Each [`Segment`] keeps only sufficient statistics (`n, Σx, Σy, Σxx,
//! Σxy`), so memory grows with the number of distinct walls, not with
//! the number of points. An exponentially tightening angular admission
//! tolerance lets young segments swing freely while established walls
//! hold their direction. The per-cycle consolidation pass merges
//! colinear neighbors and bridges near-perpendicular segments toward
//! their shared corner.
//!
//! The engine is single-threaded and step-driven: one
//! [`Resolver::step`] call runs an entire ingest + consolidate cycle to
//! completion before the next sample.

pub mod config;
pub mod core;
pub mod io;
pub mod resolver;
pub mod segment;

pub use config::{
    AdmissionPolicy, ConfigError, ConfigLoadError, MapperConfig, MatchPolicy, SegmentTuning,
};
pub use crate::core::{Bounds, Point2D};
pub use io::{render_svg, write_svg_file, SvgConfig};
pub use resolver::{IngestError, IngestOutcome, Resolver, SegmentId, SegmentRecord, SegmentStore};
pub use segment::{LineFit, Segment, SegmentState, SufficientStats};
