use crate::axis_store::AxisDomainStore;
use crate::data_types::{
    AxisDomain, AxisId, LegendEntry, PlotGeometry, SeriesColor, SeriesSpec, ShapeDescriptor,
};
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// A mounted series with the colour it was assigned.
#[derive(Clone, Debug)]
pub struct SeriesRecord {
    pub spec: SeriesSpec,
    pub ordinal: usize,
    pub color: SeriesColor,
}

impl SeriesRecord {
    pub fn label(&self) -> &str {
        self.spec.label.as_deref().unwrap_or(&self.spec.id)
    }

    /// Legend row of the series, `None` while it is hidden.
    pub fn legend_entry(&self) -> Option<LegendEntry> {
        if self.spec.hidden {
            return None;
        }
        Some(LegendEntry {
            id: self.spec.id.clone(),
            label: self.label().to_string(),
            color: self.color,
            shape: ShapeDescriptor {
                figure: self.spec.shape,
                color: self.color,
                hidden: false,
            },
            hidden: false,
        })
    }
}

/// Immutable state of one plot at one point in time.
///
/// Every dispatched action produces a new snapshot; a reader holding an older
/// one keeps seeing a complete, consistent state.
#[derive(Clone, Debug)]
pub struct PlotSnapshot {
    pub(crate) revision: u64,
    pub(crate) geometry: PlotGeometry,
    pub(crate) axes: AxisDomainStore,
    pub(crate) series: BTreeMap<String, SeriesRecord>,
    pub(crate) legend: Vec<LegendEntry>,
    pub(crate) next_ordinal: usize,
    pub(crate) time_zone: Tz,
}

impl Default for PlotSnapshot {
    fn default() -> Self {
        Self {
            revision: 0,
            geometry: PlotGeometry::default(),
            axes: AxisDomainStore::default(),
            series: BTreeMap::new(),
            legend: Vec::new(),
            next_ordinal: 0,
            time_zone: Tz::UTC,
        }
    }
}

impl PlotSnapshot {
    /// Incremented by every applied action.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn geometry(&self) -> &PlotGeometry {
        &self.geometry
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn axes(&self) -> &AxisDomainStore {
        &self.axes
    }

    pub fn axis_ids(&self) -> impl Iterator<Item = &AxisId> {
        self.axes.axis_ids()
    }

    pub fn has_axis(&self, axis_id: &AxisId) -> bool {
        self.axes.contains(axis_id)
    }

    pub fn domain(&self, axis_id: &AxisId) -> Option<AxisDomain> {
        self.axes.domain(axis_id)
    }

    pub fn pixel_range(&self, axis_id: &AxisId) -> Option<(f64, f64)> {
        self.axes.pixel_range(axis_id, &self.geometry)
    }

    pub fn series(&self, id: &str) -> Option<&SeriesRecord> {
        self.series.get(id)
    }

    /// Series in mount order.
    pub fn series_in_order(&self) -> Vec<&SeriesRecord> {
        let mut records: Vec<_> = self.series.values().collect();
        records.sort_by_key(|r| r.ordinal);
        records
    }

    pub fn color_of(&self, series_id: &str) -> Option<SeriesColor> {
        self.series.get(series_id).map(|r| r.color)
    }

    pub fn legend_entries(&self) -> &[LegendEntry] {
        &self.legend
    }
}
