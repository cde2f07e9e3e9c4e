//! Plain configuration values handed over by the surrounding view layer.

use crate::data_types::{AxisId, AxisOrientation, AxisValue, DomainRange, PlotGeometry, ScaleType, ValueKind};
use crate::error::{ConfigError, Result};
use crate::legend::LegendConfig;
use chrono_tz::Tz;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub id: AxisId,
    pub orientation: AxisOrientation,
    #[serde(default)]
    pub scale_type: ScaleType,
    #[serde(default)]
    pub min: Option<AxisValue>,
    #[serde(default)]
    pub max: Option<AxisValue>,
    /// Reverses the pixel direction of the axis.
    #[serde(default)]
    pub flip: bool,
    #[serde(default)]
    pub label: Option<String>,
}

impl AxisConfig {
    pub fn new(id: AxisId, orientation: AxisOrientation) -> Self {
        Self {
            id,
            orientation,
            scale_type: ScaleType::Linear,
            min: None,
            max: None,
            flip: false,
            label: None,
        }
    }

    pub fn horizontal(id: AxisId) -> Self {
        Self::new(id, AxisOrientation::Horizontal)
    }

    pub fn vertical(id: AxisId) -> Self {
        Self::new(id, AxisOrientation::Vertical)
    }

    pub fn with_scale(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }

    pub fn with_domain(mut self, min: impl Into<AxisValue>, max: impl Into<AxisValue>) -> Self {
        self.min = Some(min.into());
        self.max = Some(max.into());
        self
    }

    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Declared value kind, if the config pins a domain.
    pub fn kind(&self) -> Option<ValueKind> {
        self.min.or(self.max).map(|v| v.kind())
    }

    /// The pinned domain, if both bounds are given.
    pub fn explicit_domain(&self) -> Result<Option<DomainRange>> {
        match (self.min, self.max) {
            (None, None) => Ok(None),
            (Some(min), Some(max)) => {
                if min.kind() != max.kind() {
                    return Err(ConfigError::MixedValueKinds {
                        axis: self.id.to_string(),
                    }
                    .into());
                }
                DomainRange::checked(&self.id, min.as_f64(), max.as_f64()).map(Some)
            }
            _ => Err(ConfigError::IncompleteDomain(self.id.to_string()).into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub geometry: PlotGeometry,
    pub axes: Vec<AxisConfig>,
    pub legend: LegendConfig,
    /// Zone time axes are displayed in.
    pub time_zone: Tz,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            geometry: PlotGeometry::default(),
            axes: vec![
                AxisConfig::horizontal(AxisId::x()),
                AxisConfig::vertical(AxisId::y()),
            ],
            legend: LegendConfig::default(),
            time_zone: Tz::UTC,
        }
    }
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> eyre::Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse plot configuration")
    }

    pub fn to_json_string(&self) -> eyre::Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize plot configuration")
    }
}
