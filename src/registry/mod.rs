//! Plot State Registry
//!
//! This module defines `PlotRegistry`, the single source of truth for the
//! state of one plot: axis domains, mounted series and legend entries. All
//! mutations go through [`PlotRegistry::dispatch`], which runs the reducer on
//! the current snapshot, swaps the result in wholesale and notifies every
//! observer before returning.
//!
//! A registry is scoped to one chart instance and shared by explicit
//! reference (`Arc<PlotRegistry>`); there is no global state.

pub mod actions;
pub mod snapshot;

pub use actions::{reduce, PlotAction};
pub use snapshot::{PlotSnapshot, SeriesRecord};

use crate::config::{AxisConfig, PlotConfig};
use crate::data_types::{
    AxisDomain, AxisId, AxisMap, DomainRange, LegendEntry, PlotGeometry, SeriesSpec,
};
use crate::error::Result;
use crate::scales::{ChartScale, ScaleCache};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, warn};

/// Control surface used by gesture controllers and external callers.
pub trait PlotControls {
    fn snapshot(&self) -> Arc<PlotSnapshot>;
    fn set_axis(&self, axis: &AxisId, range: DomainRange) -> Result<()>;
    fn set_axes(&self, domains: AxisMap<DomainRange>) -> Result<()>;
    fn reset_axis(&self, axis: &AxisId) -> Result<()>;
    fn reset_axes(&self, axes: &[AxisId]) -> Result<()>;
}

type Observer = Arc<dyn Fn(&PlotSnapshot) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Observers {
    next_id: u64,
    list: Vec<(ObserverId, Observer)>,
}

pub struct PlotRegistry {
    snapshot: RwLock<Arc<PlotSnapshot>>,
    observers: Mutex<Observers>,
    scales: ScaleCache,
}

impl Default for PlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotRegistry")
            .field("snapshot", &*self.snapshot.read())
            .finish_non_exhaustive()
    }
}

impl PlotRegistry {
    pub fn new() -> Self {
        Self::with_snapshot(PlotSnapshot::default())
    }

    fn with_snapshot(snapshot: PlotSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            observers: Mutex::new(Observers::default()),
            scales: ScaleCache::new(),
        }
    }

    /// Builds a registry with the axes, geometry and time zone of `config`.
    pub fn from_config(config: &PlotConfig) -> Result<Self> {
        let registry = Self::with_snapshot(PlotSnapshot {
            geometry: config.geometry,
            time_zone: config.time_zone,
            ..PlotSnapshot::default()
        });
        for axis in &config.axes {
            registry.register_axis(axis.clone())?;
        }
        Ok(registry)
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> Arc<PlotSnapshot> {
        self.snapshot.read().clone()
    }

    /// Applies `action` and notifies observers. A rejected action leaves the
    /// current snapshot untouched.
    pub fn dispatch(&self, action: PlotAction) -> Result<()> {
        let name = action.name();
        let next = {
            let mut guard = self.snapshot.write();
            match reduce(&guard, action) {
                Ok(next) => {
                    let next = Arc::new(next);
                    *guard = next.clone();
                    next
                }
                Err(err) => {
                    warn!(action = name, %err, "plot action rejected");
                    return Err(err);
                }
            }
        };
        debug!(action = name, revision = next.revision(), "plot action applied");
        self.notify(&next);
        Ok(())
    }

    fn notify(&self, snapshot: &PlotSnapshot) {
        // Observers may dispatch again, so they run without the lock held.
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .list
            .iter()
            .map(|(_, o)| o.clone())
            .collect();
        for observer in observers {
            observer(snapshot);
        }
    }

    pub fn observe(&self, observer: impl Fn(&PlotSnapshot) + Send + Sync + 'static) -> ObserverId {
        let mut observers = self.observers.lock();
        let id = ObserverId(observers.next_id);
        observers.next_id += 1;
        observers.list.push((id, Arc::new(observer)));
        id
    }

    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.list.len();
        observers.list.retain(|(i, _)| *i != id);
        observers.list.len() != before
    }

    // Registration

    /// Mounts a series: its extents join the aggregation and, unless hidden,
    /// it gets a legend entry. Both land in one snapshot.
    pub fn register_series(&self, spec: SeriesSpec) -> Result<()> {
        self.dispatch(PlotAction::AddSeriesData(spec))
    }

    pub fn unregister_series(&self, id: &str) -> Result<()> {
        self.dispatch(PlotAction::RemoveSeriesData(id.to_string()))
    }

    pub fn register_axis(&self, config: AxisConfig) -> Result<()> {
        self.dispatch(PlotAction::RegisterAxis(config))
    }

    pub fn unregister_axis(&self, axis: &AxisId) -> Result<()> {
        self.dispatch(PlotAction::UnregisterAxis(axis.clone()))?;
        if !self.snapshot().has_axis(axis) {
            self.scales.invalidate(axis);
        }
        Ok(())
    }

    pub fn set_geometry(&self, geometry: PlotGeometry) -> Result<()> {
        if self.snapshot().geometry() == &geometry {
            return Ok(());
        }
        self.dispatch(PlotAction::SetGeometry(geometry))
    }

    // Queries

    pub fn domain(&self, axis: &AxisId) -> Option<AxisDomain> {
        self.snapshot().domain(axis)
    }

    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.snapshot().legend_entries().to_vec()
    }

    /// Mapping of `axis`, `None` while the axis is not ready.
    pub fn scale(&self, axis: &AxisId) -> Option<ChartScale> {
        match self.try_scale(axis) {
            Ok(scale) => scale,
            Err(err) => {
                warn!(%axis, %err, "no scale for axis");
                None
            }
        }
    }

    /// Like [`scale`](Self::scale) but reports why a domain cannot be mapped.
    pub fn try_scale(&self, axis: &AxisId) -> Result<Option<ChartScale>> {
        scale_in(&self.scales, &self.snapshot(), axis)
    }

    /// Mappings of every ready axis of `snapshot`.
    pub fn scales_for(&self, snapshot: &PlotSnapshot) -> AxisMap<ChartScale> {
        snapshot
            .axis_ids()
            .filter_map(|axis| match scale_in(&self.scales, snapshot, axis) {
                Ok(Some(scale)) => Some((axis.clone(), scale)),
                Ok(None) => None,
                Err(err) => {
                    warn!(%axis, %err, "no scale for axis");
                    None
                }
            })
            .collect()
    }

    /// Number of cached mappings.
    pub fn cached_scales(&self) -> usize {
        self.scales.len()
    }
}

fn scale_in(cache: &ScaleCache, snapshot: &PlotSnapshot, axis: &AxisId) -> Result<Option<ChartScale>> {
    let (Some(domain), Some(range)) = (snapshot.domain(axis), snapshot.pixel_range(axis)) else {
        return Ok(None);
    };
    if (range.1 - range.0).abs() < f64::EPSILON {
        return Ok(None);
    }
    cache
        .get_or_build(axis, domain.range(), range, domain.scale_type)
        .map(Some)
}

impl PlotControls for PlotRegistry {
    fn snapshot(&self) -> Arc<PlotSnapshot> {
        PlotRegistry::snapshot(self)
    }

    fn set_axis(&self, axis: &AxisId, range: DomainRange) -> Result<()> {
        self.dispatch(PlotAction::SetAxis(axis.clone(), range))
    }

    fn set_axes(&self, domains: AxisMap<DomainRange>) -> Result<()> {
        self.dispatch(PlotAction::SetAxes(domains.into_iter().collect()))
    }

    fn reset_axis(&self, axis: &AxisId) -> Result<()> {
        self.dispatch(PlotAction::ResetAxis(axis.clone()))
    }

    fn reset_axes(&self, axes: &[AxisId]) -> Result<()> {
        self.dispatch(PlotAction::ResetAxes(axes.to_vec()))
    }
}
