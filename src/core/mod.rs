//! Core value types shared across the engine.
//!
//! - [`Point2D`]: world-frame sample (millimeters)
//! - [`Bounds`]: axis-aligned extent of the current map
//! - [`math`]: slope-space angle helpers

mod bounds;
mod point;

pub mod math;

pub use bounds::Bounds;
pub use point::Point2D;
