use crate::error::{ConfigError, PlotError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of an axis, e.g. `"x"`, `"y"` or `"intensity"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AxisId(String);

impl AxisId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(ConfigError::MalformedAxisId(id).into());
        }
        Ok(Self(id))
    }

    /// Default horizontal axis.
    pub fn x() -> Self {
        Self("x".to_string())
    }

    /// Default vertical axis.
    pub fn y() -> Self {
        Self("y".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AxisId {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for AxisId {
    type Error = PlotError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AxisId {
    type Error = PlotError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AxisId> for String {
    fn from(id: AxisId) -> Self {
        id.0
    }
}

/// Values keyed by axis. Only axes known to the registry ever appear as keys.
pub type AxisMap<T> = BTreeMap<AxisId, T>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Linear,
    Log,
}

/// Pixel direction an axis is laid out along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    #[default]
    Numeric,
    Time,
}

/// A value along an axis. Time values compare by absolute timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Time(DateTime<Utc>),
}

impl AxisValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Numeric,
            Self::Time(_) => ValueKind::Time,
        }
    }

    /// Position on the axis: the number itself, or milliseconds since the epoch.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Time(t) => t.timestamp_millis() as f64,
        }
    }

    pub fn from_f64(kind: ValueKind, value: f64) -> Option<Self> {
        match kind {
            ValueKind::Numeric => Some(Self::Number(value)),
            ValueKind::Time => DateTime::from_timestamp_millis(value.round() as i64).map(Self::Time),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<DateTime<Utc>> for AxisValue {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Time(t)
    }
}

/// A `[min, max]` window along an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainRange {
    pub min: f64,
    pub max: f64,
}

impl DomainRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Builds a range that satisfies `min < max`, rejecting it otherwise.
    pub fn checked(axis: &AxisId, min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        if range.is_valid() {
            Ok(range)
        } else {
            Err(PlotError::InvariantViolation {
                axis: axis.to_string(),
                min,
                max,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn union(&self, other: &DomainRange) -> DomainRange {
        DomainRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Widens a zero-width range by half a unit on each side, measured in the
    /// scale's transformed space: a positive value on a log axis becomes
    /// `[v / 10^0.5, v * 10^0.5]`.
    pub fn expand_degenerate(self, scale_type: ScaleType) -> DomainRange {
        if (self.max - self.min).abs() >= f64::EPSILON {
            return self;
        }
        match scale_type {
            ScaleType::Log if self.min > 0.0 => {
                let step = 10f64.sqrt();
                DomainRange {
                    min: self.min / step,
                    max: self.max * step,
                }
            }
            _ => DomainRange {
                min: self.min - 0.5,
                max: self.max + 0.5,
            },
        }
    }

    /// Shifts both bounds by `delta`.
    pub fn pan(&self, delta: f64) -> DomainRange {
        DomainRange {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Scales the window around `pivot` by `factor`, keeping `pivot` fixed.
    pub fn zoom_at(&self, pivot: f64, factor: f64) -> DomainRange {
        DomainRange {
            min: pivot + (self.min - pivot) * factor,
            max: pivot + (self.max - pivot) * factor,
        }
    }
}

/// Resolved domain of one axis as seen by readers of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisDomain {
    pub axis_id: AxisId,
    pub min: f64,
    pub max: f64,
    pub kind: ValueKind,
    pub scale_type: ScaleType,
    /// `true` when pinned by `set_axis`, `false` when aggregated from series.
    pub explicit: bool,
}

impl AxisDomain {
    pub fn range(&self) -> DomainRange {
        DomainRange::new(self.min, self.max)
    }

    pub fn min_value(&self) -> Option<AxisValue> {
        AxisValue::from_f64(self.kind, self.min)
    }

    pub fn max_value(&self) -> Option<AxisValue> {
        AxisValue::from_f64(self.kind, self.max)
    }
}
