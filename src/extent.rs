//! Auto-fit domains built from the extents of mounted series.
//!
//! Each axis keeps its contributions and a running union. Adding an extent
//! widens the union in place; removing one recomputes the union from what is
//! left, since a running min/max cannot forget an extreme.

use crate::data_types::{AxisId, AxisRole, DomainRange, SeriesExtent, ValueKind};
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Clone, Debug, Default, PartialEq)]
struct AxisExtents {
    contributions: BTreeMap<(String, AxisRole), SeriesExtent>,
    aggregate: Option<DomainRange>,
}

impl AxisExtents {
    fn kind(&self) -> Option<ValueKind> {
        self.contributions.values().next().map(|e| e.kind)
    }

    fn recompute(&mut self) {
        self.aggregate = self
            .contributions
            .values()
            .filter_map(|e| e.range)
            .reduce(|acc, r| acc.union(&r));
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtentAggregator {
    axes: BTreeMap<AxisId, AxisExtents>,
}

impl ExtentAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the extent of one series on one axis.
    pub fn register(&mut self, extent: SeriesExtent) -> Result<()> {
        let axis = self.axes.entry(extent.axis_id.clone()).or_default();
        let key = (extent.series_id.clone(), extent.role);

        let others_kind = axis
            .contributions
            .iter()
            .find(|(k, _)| **k != key)
            .map(|(_, e)| e.kind);
        if others_kind.is_some_and(|k| k != extent.kind) {
            return Err(ConfigError::MixedValueKinds {
                axis: extent.axis_id.to_string(),
            }
            .into());
        }

        let replaced = axis.contributions.insert(key, extent.clone()).is_some();
        if replaced {
            axis.recompute();
        } else if let Some(range) = extent.range {
            axis.aggregate = Some(match axis.aggregate {
                Some(current) => current.union(&range),
                None => range,
            });
        }
        trace!(axis = %extent.axis_id, aggregate = ?axis.aggregate, "extent registered");
        Ok(())
    }

    /// Removes the extent of a series on an axis. Returns `false` if there was none.
    pub fn unregister(&mut self, series_id: &str, axis_id: &AxisId, role: AxisRole) -> bool {
        let Some(axis) = self.axes.get_mut(axis_id) else {
            return false;
        };
        let removed = axis
            .contributions
            .remove(&(series_id.to_string(), role))
            .is_some();
        if removed {
            axis.recompute();
            trace!(axis = %axis_id, aggregate = ?axis.aggregate, "extent removed");
        }
        if axis.contributions.is_empty() {
            self.axes.remove(axis_id);
        }
        removed
    }

    /// Union of all contributed extents, `None` while nothing finite was contributed.
    pub fn aggregate(&self, axis_id: &AxisId) -> Option<DomainRange> {
        self.axes.get(axis_id).and_then(|a| a.aggregate)
    }

    pub fn kind(&self, axis_id: &AxisId) -> Option<ValueKind> {
        self.axes.get(axis_id).and_then(AxisExtents::kind)
    }

    pub fn contributor_count(&self, axis_id: &AxisId) -> usize {
        self.axes.get(axis_id).map_or(0, |a| a.contributions.len())
    }
}
