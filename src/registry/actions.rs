use super::snapshot::{PlotSnapshot, SeriesRecord};
use crate::config::AxisConfig;
use crate::data_types::{AxisId, DomainRange, LegendEntry, PlotGeometry, SeriesColor, SeriesSpec};
use crate::error::{ConfigError, PlotError, Result};

/// Transitions of the plot state.
#[derive(Clone, Debug)]
pub enum PlotAction {
    /// Mounts a series, or replaces the data of a mounted one. The legend
    /// entry of the series is updated in the same transition.
    AddSeriesData(SeriesSpec),
    /// Unmounts a series together with its legend entry.
    RemoveSeriesData(String),
    SetAxis(AxisId, DomainRange),
    /// Applied atomically: one invalid domain rejects all of them.
    SetAxes(Vec<(AxisId, DomainRange)>),
    ResetAxis(AxisId),
    ResetAxes(Vec<AxisId>),
    AddLegendEntry(LegendEntry),
    RemoveLegendEntry(String),
    RegisterAxis(AxisConfig),
    UnregisterAxis(AxisId),
    SetGeometry(PlotGeometry),
}

impl PlotAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSeriesData(_) => "ADD_SERIES_DATA",
            Self::RemoveSeriesData(_) => "REMOVE_SERIES_DATA",
            Self::SetAxis(..) => "SET_AXIS",
            Self::SetAxes(_) => "SET_AXES",
            Self::ResetAxis(_) => "RESET_AXIS",
            Self::ResetAxes(_) => "RESET_AXES",
            Self::AddLegendEntry(_) => "ADD_LEGEND_ENTRY",
            Self::RemoveLegendEntry(_) => "REMOVE_LEGEND_ENTRY",
            Self::RegisterAxis(_) => "REGISTER_AXIS",
            Self::UnregisterAxis(_) => "UNREGISTER_AXIS",
            Self::SetGeometry(_) => "SET_GEOMETRY",
        }
    }
}

/// Applies `action` to a copy of `state`. `state` itself is never touched.
pub fn reduce(state: &PlotSnapshot, action: PlotAction) -> Result<PlotSnapshot> {
    let mut next = state.clone();
    match action {
        PlotAction::AddSeriesData(spec) => add_series(&mut next, spec)?,
        PlotAction::RemoveSeriesData(id) => {
            let record = next
                .series
                .remove(&id)
                .ok_or_else(|| PlotError::UnknownSeries(id.clone()))?;
            remove_extents(&mut next, &record.spec);
            next.legend.retain(|e| e.id != id);
        }
        PlotAction::SetAxis(axis, range) => next.axes.set_explicit(&axis, range)?,
        PlotAction::SetAxes(domains) => {
            for (axis, range) in &domains {
                next.axes.set_explicit(axis, *range)?;
            }
        }
        PlotAction::ResetAxis(axis) => next.axes.reset(&axis)?,
        PlotAction::ResetAxes(axes) => {
            for axis in &axes {
                next.axes.reset(axis)?;
            }
        }
        PlotAction::AddLegendEntry(entry) => upsert_legend(&mut next, entry),
        PlotAction::RemoveLegendEntry(id) => next.legend.retain(|e| e.id != id),
        PlotAction::RegisterAxis(config) => next.axes.declare(&config)?,
        PlotAction::UnregisterAxis(axis) => next.axes.undeclare(&axis)?,
        PlotAction::SetGeometry(geometry) => next.geometry = geometry,
    }
    next.revision += 1;
    Ok(next)
}

fn add_series(state: &mut PlotSnapshot, spec: SeriesSpec) -> Result<()> {
    if spec.has_mixed_range() {
        let axis = if spec.x_range.is_some_and(|(a, b)| a.kind() != b.kind()) {
            &spec.x_axis
        } else {
            &spec.y_axis
        };
        return Err(ConfigError::MixedValueKinds {
            axis: axis.to_string(),
        }
        .into());
    }

    let (ordinal, previous) = match state.series.remove(&spec.id) {
        Some(previous) => (previous.ordinal, Some(previous)),
        None => {
            let ordinal = state.next_ordinal;
            state.next_ordinal += 1;
            (ordinal, None)
        }
    };
    if let Some(previous) = &previous {
        remove_extents(state, &previous.spec);
    }
    for extent in spec.extents() {
        state.axes.add_extent(extent)?;
    }

    let color = spec.color.unwrap_or_else(|| SeriesColor::from_ordinal(ordinal));
    let record = SeriesRecord {
        spec,
        ordinal,
        color,
    };
    match record.legend_entry() {
        Some(entry) => upsert_legend(state, entry),
        None => state.legend.retain(|e| e.id != record.spec.id),
    }
    state.series.insert(record.spec.id.clone(), record);
    Ok(())
}

fn upsert_legend(state: &mut PlotSnapshot, entry: LegendEntry) {
    match state.legend.iter_mut().find(|e| e.id == entry.id) {
        Some(existing) => *existing = entry,
        None => state.legend.push(entry),
    }
}

fn remove_extents(state: &mut PlotSnapshot, spec: &SeriesSpec) {
    for extent in spec.extents() {
        state
            .axes
            .remove_extent(&extent.series_id, &extent.axis_id, extent.role);
    }
}
