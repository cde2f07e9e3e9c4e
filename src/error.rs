//! Error types for the plot core.
//!
//! Every error here is local and synchronous: a rejected mutation leaves the
//! previous registry snapshot in place and hands the reason back to the caller.
//! An axis without a domain is not an error, it is reported as `None`.

use thiserror::Error;

/// Setup-time mistakes made by whoever configures the plot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{a} and {b} shouldn't be both defined for the position {position}")]
    ExclusiveMargins {
        a: &'static str,
        b: &'static str,
        position: String,
    },

    #[error("legend position {0:?} unknown")]
    UnknownLegendPosition(String),

    #[error("axis {axis} mixes numeric and date values")]
    MixedValueKinds { axis: String },

    #[error("logarithmic axis {axis} needs a positive domain, got [{min}, {max}]")]
    NonPositiveLogDomain { axis: String, min: f64, max: f64 },

    #[error("axis {0} declares only one bound of its domain")]
    IncompleteDomain(String),

    #[error("malformed axis identifier {0:?}")]
    MalformedAxisId(String),

    #[error("controller axes must differ, both are {0}")]
    SameAxis(String),
}

/// Main error type for plot state operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A proposed domain would break `min < max`.
    #[error("invalid domain for axis {axis}: min {min} must be lower than max {max}")]
    InvariantViolation { axis: String, min: f64, max: f64 },

    #[error("unknown axis {0}")]
    UnknownAxis(String),

    #[error("unknown series {0}")]
    UnknownSeries(String),
}

impl PlotError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, PlotError::Configuration(_))
    }
}

/// Result type alias for plot operations.
pub type Result<T> = std::result::Result<T, PlotError>;
