//! Configuration error types.

use std::io;

/// A configuration value failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Field must be strictly positive.
    NonPositive {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Field must be non-negative.
    Negative {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Field is below its minimum.
    BelowMinimum {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f32,
        /// Required minimum.
        min: f32,
    },
    /// Field must be finite.
    NonFinite {
        /// Field name.
        field: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be > 0 (got {})", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must be >= 0 (got {})", field, value)
            }
            ConfigError::BelowMinimum { field, value, min } => {
                write!(f, "{} must be >= {} (got {})", field, min, value)
            }
            ConfigError::NonFinite { field } => {
                write!(f, "{} must be finite", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when loading configuration from YAML.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// I/O error reading the file.
    Io(io::Error),
    /// YAML parsing error.
    Parse(serde_yaml::Error),
    /// Configuration validation failed.
    Validation(ConfigError),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Io(e) => write!(f, "IO error: {}", e),
            ConfigLoadError::Parse(e) => write!(f, "YAML parse error: {}", e),
            ConfigLoadError::Validation(e) => write!(f, "Config validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigLoadError::Io(e) => Some(e),
            ConfigLoadError::Parse(e) => Some(e),
            ConfigLoadError::Validation(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigLoadError {
    fn from(err: io::Error) -> Self {
        ConfigLoadError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigLoadError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigLoadError::Parse(err)
    }
}

impl From<ConfigError> for ConfigLoadError {
    fn from(err: ConfigError) -> Self {
        ConfigLoadError::Validation(err)
    }
}
