//! Authoritative domain of every axis.
//!
//! An axis domain is either explicit (pinned through `set_explicit`) or
//! derived from the [`ExtentAggregator`]. An axis with neither is not ready
//! and has no domain.

use crate::config::AxisConfig;
use crate::data_types::{
    AxisDomain, AxisId, AxisOrientation, AxisRole, DomainRange, PlotGeometry, ScaleType,
    SeriesExtent, ValueKind,
};
use crate::error::{ConfigError, PlotError, Result};
use crate::extent::ExtentAggregator;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisEntry {
    pub orientation: AxisOrientation,
    pub scale_type: ScaleType,
    pub flip: bool,
    pub label: Option<String>,
    /// Declared through `register_axis` rather than created by a series.
    pub declared: bool,
    pub declared_kind: Option<ValueKind>,
    pub explicit: Option<DomainRange>,
}

impl AxisEntry {
    fn implicit(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            scale_type: ScaleType::Linear,
            flip: false,
            label: None,
            declared: false,
            declared_kind: None,
            explicit: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisDomainStore {
    axes: BTreeMap<AxisId, AxisEntry>,
    extents: ExtentAggregator,
}

fn check_log(axis: &AxisId, scale_type: ScaleType, range: &DomainRange) -> Result<()> {
    if scale_type == ScaleType::Log && range.min <= 0.0 {
        return Err(ConfigError::NonPositiveLogDomain {
            axis: axis.to_string(),
            min: range.min,
            max: range.max,
        }
        .into());
    }
    Ok(())
}

impl AxisDomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, axis_id: &AxisId) -> bool {
        self.axes.contains_key(axis_id)
    }

    pub fn entry(&self, axis_id: &AxisId) -> Option<&AxisEntry> {
        self.axes.get(axis_id)
    }

    pub fn axis_ids(&self) -> impl Iterator<Item = &AxisId> {
        self.axes.keys()
    }

    pub fn extents(&self) -> &ExtentAggregator {
        &self.extents
    }

    /// Declares an axis, or upgrades an axis a series already created.
    pub fn declare(&mut self, config: &AxisConfig) -> Result<()> {
        let explicit = config.explicit_domain()?;
        if let Some(range) = &explicit {
            check_log(&config.id, config.scale_type, range)?;
        }
        if let (Some(declared), Some(seen)) = (config.kind(), self.extents.kind(&config.id)) {
            if declared != seen {
                return Err(ConfigError::MixedValueKinds {
                    axis: config.id.to_string(),
                }
                .into());
            }
        }
        self.axes.insert(
            config.id.clone(),
            AxisEntry {
                orientation: config.orientation,
                scale_type: config.scale_type,
                flip: config.flip,
                label: config.label.clone(),
                declared: true,
                declared_kind: config.kind(),
                explicit,
            },
        );
        self.check_resolved(&config.id)
    }

    /// Withdraws a declaration. An axis still used by series lives on as implicit.
    pub fn undeclare(&mut self, axis_id: &AxisId) -> Result<()> {
        let entry = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| PlotError::UnknownAxis(axis_id.to_string()))?;
        entry.declared = false;
        entry.declared_kind = None;
        entry.explicit = None;
        self.prune(axis_id);
        self.check_resolved(axis_id)
    }

    /// Adds the extent of a series, creating its axis on first reference.
    pub fn add_extent(&mut self, extent: SeriesExtent) -> Result<()> {
        if let Some(declared) = self.axes.get(&extent.axis_id).and_then(|e| e.declared_kind) {
            if declared != extent.kind {
                return Err(ConfigError::MixedValueKinds {
                    axis: extent.axis_id.to_string(),
                }
                .into());
            }
        }
        let orientation = match extent.role {
            AxisRole::X => AxisOrientation::Horizontal,
            AxisRole::Y => AxisOrientation::Vertical,
        };
        let axis_id = extent.axis_id.clone();
        self.extents.register(extent)?;
        self.axes
            .entry(axis_id.clone())
            .or_insert_with(|| AxisEntry::implicit(orientation));
        self.check_resolved(&axis_id)
    }

    pub fn remove_extent(&mut self, series_id: &str, axis_id: &AxisId, role: AxisRole) -> bool {
        let removed = self.extents.unregister(series_id, axis_id, role);
        self.prune(axis_id);
        removed
    }

    /// Pins the domain of an axis until [`reset`](Self::reset) is called.
    pub fn set_explicit(&mut self, axis_id: &AxisId, range: DomainRange) -> Result<()> {
        let entry = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| PlotError::UnknownAxis(axis_id.to_string()))?;
        let range = DomainRange::checked(axis_id, range.min, range.max)?;
        check_log(axis_id, entry.scale_type, &range)?;
        entry.explicit = Some(range);
        Ok(())
    }

    pub fn reset(&mut self, axis_id: &AxisId) -> Result<()> {
        let entry = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| PlotError::UnknownAxis(axis_id.to_string()))?;
        entry.explicit = None;
        self.check_resolved(axis_id)
    }

    /// A log axis must resolve to a strictly positive domain, whichever side
    /// the domain comes from.
    fn check_resolved(&self, axis_id: &AxisId) -> Result<()> {
        match self.domain(axis_id) {
            Some(domain) => check_log(axis_id, domain.scale_type, &domain.range()),
            None => Ok(()),
        }
    }

    /// Current domain, `None` while the axis is not ready.
    pub fn domain(&self, axis_id: &AxisId) -> Option<AxisDomain> {
        let entry = self.axes.get(axis_id)?;
        let (range, explicit) = match entry.explicit {
            Some(range) => (range, true),
            None => {
                let aggregate = self.extents.aggregate(axis_id)?;
                (aggregate.expand_degenerate(entry.scale_type), false)
            }
        };
        let kind = entry
            .declared_kind
            .or_else(|| self.extents.kind(axis_id))
            .unwrap_or_default();
        Some(AxisDomain {
            axis_id: axis_id.clone(),
            min: range.min,
            max: range.max,
            kind,
            scale_type: entry.scale_type,
            explicit,
        })
    }

    pub fn pixel_range(&self, axis_id: &AxisId, geometry: &PlotGeometry) -> Option<(f64, f64)> {
        self.axes
            .get(axis_id)
            .map(|e| geometry.pixel_range(e.orientation, e.flip))
    }

    /// Drops implicit axes nothing refers to any more.
    fn prune(&mut self, axis_id: &AxisId) {
        let unused = self.axes.get(axis_id).is_some_and(|e| {
            !e.declared && e.explicit.is_none() && self.extents.contributor_count(axis_id) == 0
        });
        if unused {
            self.axes.remove(axis_id);
        }
    }
}
