//! Bidirectional data ↔ pixel mappings.

use crate::data_types::{AxisId, DomainRange, ScaleType};
use crate::error::{ConfigError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Mapping of one axis, valid only for the domain and pixel range it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartScale {
    axis_id: AxisId,
    domain: DomainRange,
    range: (f64, f64),
    scale_type: ScaleType,
    // Domain bounds in the transformed space (identity or log10).
    t_min: f64,
    t_max: f64,
}

impl ChartScale {
    pub fn new(
        axis_id: AxisId,
        domain: DomainRange,
        range: (f64, f64),
        scale_type: ScaleType,
    ) -> Result<Self> {
        let domain = DomainRange::checked(&axis_id, domain.min, domain.max)?;
        if scale_type == ScaleType::Log && domain.min <= 0.0 {
            return Err(ConfigError::NonPositiveLogDomain {
                axis: axis_id.to_string(),
                min: domain.min,
                max: domain.max,
            }
            .into());
        }
        let (t_min, t_max) = match scale_type {
            ScaleType::Linear => (domain.min, domain.max),
            ScaleType::Log => (domain.min.log10(), domain.max.log10()),
        };
        Ok(Self {
            axis_id,
            domain,
            range,
            scale_type,
            t_min,
            t_max,
        })
    }

    pub fn new_linear(axis_id: AxisId, domain: DomainRange, range: (f64, f64)) -> Result<Self> {
        Self::new(axis_id, domain, range, ScaleType::Linear)
    }

    pub fn axis_id(&self) -> &AxisId {
        &self.axis_id
    }

    pub fn domain(&self) -> DomainRange {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Data value into the transformed space. `None` for non-positive values on log axes.
    pub fn transform(&self, value: f64) -> Option<f64> {
        match self.scale_type {
            ScaleType::Linear => Some(value),
            ScaleType::Log if value > 0.0 => Some(value.log10()),
            ScaleType::Log => None,
        }
    }

    pub fn untransform(&self, t: f64) -> f64 {
        match self.scale_type {
            ScaleType::Linear => t,
            ScaleType::Log => 10f64.powf(t),
        }
    }

    /// Data → pixel.
    pub fn to_pixel(&self, value: f64) -> Option<f64> {
        let t = self.transform(value)?;
        let (p0, p1) = self.range;
        Some(p0 + (t - self.t_min) / (self.t_max - self.t_min) * (p1 - p0))
    }

    /// Pixel → data, the exact inverse of [`to_pixel`](Self::to_pixel).
    pub fn to_data(&self, pixel: f64) -> f64 {
        let (p0, p1) = self.range;
        let t = self.t_min + (pixel - p0) / (p1 - p0) * (self.t_max - self.t_min);
        self.untransform(t)
    }

    /// Clamps a pixel position into the range of this axis.
    pub fn clamp_pixel(&self, pixel: f64) -> f64 {
        let (p0, p1) = self.range;
        pixel.clamp(p0.min(p1), p0.max(p1))
    }

    /// Domain window scaled by `factor` around `pivot`, in the transformed space
    /// so log axes zoom geometrically. Bounds come back unsorted.
    pub fn zoom_window(&self, pivot: f64, factor: f64) -> Option<(f64, f64)> {
        let c = self.transform(pivot)?;
        let window = DomainRange::new(self.t_min, self.t_max).zoom_at(c, factor);
        Some((self.untransform(window.min), self.untransform(window.max)))
    }

    /// Returns (m, c) such that pixel = value * m + c.
    /// Only exact for linear scales, log scales return `None`.
    pub fn linear_coeffs(&self) -> Option<(f64, f64)> {
        if self.scale_type != ScaleType::Linear {
            return None;
        }
        let (p0, p1) = self.range;
        let m = (p1 - p0) / (self.domain.max - self.domain.min);
        Some((m, p0 - m * self.domain.min))
    }
}

/// Value identity of a mapping. Floats are keyed by their bit patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ScaleKey {
    domain: (u64, u64),
    range: (u64, u64),
    scale_type: ScaleType,
}

impl ScaleKey {
    fn new(domain: DomainRange, range: (f64, f64), scale_type: ScaleType) -> Self {
        Self {
            domain: (domain.min.to_bits(), domain.max.to_bits()),
            range: (range.0.to_bits(), range.1.to_bits()),
            scale_type,
        }
    }
}

/// Memoizes one mapping per axis; an entry is rebuilt only when its inputs
/// change by value.
#[derive(Debug, Default)]
pub struct ScaleCache {
    entries: Mutex<HashMap<AxisId, (ScaleKey, ChartScale)>>,
}

impl ScaleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &self,
        axis_id: &AxisId,
        domain: DomainRange,
        range: (f64, f64),
        scale_type: ScaleType,
    ) -> Result<ChartScale> {
        let key = ScaleKey::new(domain, range, scale_type);
        let mut entries = self.entries.lock();
        if let Some((cached_key, scale)) = entries.get(axis_id) {
            if *cached_key == key {
                return Ok(scale.clone());
            }
        }
        let scale = ChartScale::new(axis_id.clone(), domain, range, scale_type)?;
        entries.insert(axis_id.clone(), (key, scale.clone()));
        Ok(scale)
    }

    pub fn invalidate(&self, axis_id: &AxisId) {
        self.entries.lock().remove(axis_id);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
