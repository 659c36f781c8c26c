//! Engine configuration.
//!
//! All tunable parameters of the mapping engine live in [`MapperConfig`].
//! Configurations can be loaded from YAML files for reproducible sessions:
//!
//! ```rust,ignore
//! use wallmap::MapperConfig;
//!
//! let config = MapperConfig::from_yaml_file("wallmap.yaml")?;
//! let resolver = wallmap::Resolver::new(config)?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::math::deg_to_rad;

mod error;

pub use error::{ConfigError, ConfigLoadError};

/// Policy for assigning an ingested point to an existing segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First segment (in insertion order) whose membership test passes.
    ///
    /// Order-dependent, but matches the behavior the rest of the pipeline
    /// was tuned against.
    #[default]
    FirstMatch,
    /// Segment with the smallest membership distance among those that pass.
    NearestMatch,
}

/// Policy for handling a sample whose implied slope is out of tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// Reject the sample's influence entirely: running sums are only
    /// committed when the slope update is accepted.
    #[default]
    Transactional,
    /// Legacy ordering: fold the sample into the sums first, then validate.
    /// A rejected sample still perturbs the statistics permanently.
    FoldAlways,
}

/// Configuration for the wall-segment mapping engine.
///
/// Distances are in world units (millimeters on the reference rig),
/// angles in degrees. Converted once into a [`SegmentTuning`] that each
/// segment carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Base membership/merge distance around a segment.
    /// Default: 50.0
    pub radius: f32,

    /// Floor of the angular admission tolerance, in degrees.
    /// Default: 1.0
    pub angular_tolerance_min_deg: f32,

    /// Admission tolerance for a brand-new segment, in degrees.
    /// Default: 90.0
    pub angular_tolerance_start_deg: f32,

    /// Decay rate `k` in `tolerance(n) = max(min, start · e^(−k·(n−2)))`.
    /// Larger values lock a segment's direction in faster.
    /// Default: 1.0
    pub tolerance_decay_rate: f32,

    /// Point count above which a segment is Established and applies the
    /// stricter endpoint-extension guard.
    /// Default: 10
    pub established_trend_point_count: u32,

    /// Maximum angle, in degrees, between an Established segment's slope
    /// and the local slope towards a new point for an endpoint extension
    /// to be applied.
    /// Default: 60.0
    pub extension_angle_limit_deg: f32,

    /// Multiplier on `radius` when testing a line-intersection point for
    /// corner bridging.
    /// Default: 2.0
    pub bridge_radius_multiplier: f32,

    /// Minimum point count each segment needs before a corner may be
    /// inferred between them.
    /// Default: 5
    pub bridge_min_points: u32,

    /// How ingested points are assigned to existing segments.
    /// Default: first_match
    pub match_policy: MatchPolicy,

    /// How out-of-tolerance samples are handled.
    /// Default: transactional
    pub admission: AdmissionPolicy,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            angular_tolerance_min_deg: 1.0,
            angular_tolerance_start_deg: 90.0,
            tolerance_decay_rate: 1.0,
            established_trend_point_count: 10,
            extension_angle_limit_deg: 60.0,
            bridge_radius_multiplier: 2.0,
            bridge_min_points: 5,
            match_policy: MatchPolicy::default(),
            admission: AdmissionPolicy::default(),
        }
    }
}

impl MapperConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file and validate it.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(ConfigLoadError::Parse)
    }

    /// Validate all parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("radius", self.radius),
            ("angular_tolerance_min_deg", self.angular_tolerance_min_deg),
            (
                "angular_tolerance_start_deg",
                self.angular_tolerance_start_deg,
            ),
            ("extension_angle_limit_deg", self.extension_angle_limit_deg),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !self.tolerance_decay_rate.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "tolerance_decay_rate",
            });
        }
        if self.tolerance_decay_rate < 0.0 {
            return Err(ConfigError::Negative {
                field: "tolerance_decay_rate",
                value: self.tolerance_decay_rate,
            });
        }
        if !self.bridge_radius_multiplier.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "bridge_radius_multiplier",
            });
        }
        if self.bridge_radius_multiplier < 1.0 {
            return Err(ConfigError::BelowMinimum {
                field: "bridge_radius_multiplier",
                value: self.bridge_radius_multiplier,
                min: 1.0,
            });
        }
        Ok(())
    }

    /// Convert to the radians-space tuning block segments carry.
    pub fn tuning(&self) -> SegmentTuning {
        SegmentTuning {
            radius: self.radius,
            min_tolerance: deg_to_rad(self.angular_tolerance_min_deg),
            start_tolerance: deg_to_rad(self.angular_tolerance_start_deg),
            decay_rate: self.tolerance_decay_rate,
            established_threshold: self.established_trend_point_count,
            extension_angle_limit: deg_to_rad(self.extension_angle_limit_deg),
            bridge_radius_multiplier: self.bridge_radius_multiplier,
            bridge_min_points: self.bridge_min_points,
            admission: self.admission,
        }
    }

    // ===== Builder Methods =====

    /// Builder-style setter for the membership radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Builder-style setter for the match policy.
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Builder-style setter for the admission policy.
    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.admission = admission;
        self
    }
}

/// Validated, radians-converted parameters carried by each segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentTuning {
    /// Base membership/merge distance.
    pub radius: f32,
    /// Tolerance floor, radians.
    pub min_tolerance: f32,
    /// Tolerance for a brand-new segment, radians.
    pub start_tolerance: f32,
    /// Exponential decay rate `k`.
    pub decay_rate: f32,
    /// Point count above which a segment is Established.
    pub established_threshold: u32,
    /// Established extension guard limit, radians.
    pub extension_angle_limit: f32,
    /// Radius multiplier gating corner bridging.
    pub bridge_radius_multiplier: f32,
    /// Minimum per-segment point count gating corner bridging.
    pub bridge_min_points: u32,
    /// Admission policy for out-of-tolerance samples.
    pub admission: AdmissionPolicy,
}

impl SegmentTuning {
    /// Admission tolerance at point count `n`, in radians.
    ///
    /// `tolerance(n) = max(min, start · e^(−k·(n−2)))` — strictly
    /// non-increasing in `n`: early points are forgiving, the direction
    /// locks in as evidence accumulates.
    #[inline]
    pub fn tolerance(&self, n: u32) -> f32 {
        let exponent = -self.decay_rate * (n as f32 - 2.0);
        self.min_tolerance.max(self.start_tolerance * exponent.exp())
    }
}
