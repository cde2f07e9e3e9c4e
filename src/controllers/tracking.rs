use super::{distinct_axes, AxisBound};
use crate::data_types::{AxisId, AxisMap};
use crate::error::Result;
use crate::events::{NormalizedPointerEvent, PlotEventHandler};
use crate::registry::PlotControls;
use crate::utils::value_formatter::format_axis_value;

/// Values under the pointer, ready for the hover overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverPoint {
    pub coordinates: AxisMap<f64>,
    /// One `(axis, text)` line per ready axis.
    pub labels: Vec<(AxisId, String)>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TrackingState {
    #[default]
    Idle,
    Hovering(HoverPoint),
}

/// Follows the pointer and exposes the value of every axis at its position.
#[derive(Clone, Debug, PartialEq)]
pub struct Tracking {
    horizontal_axis: AxisId,
    vertical_axis: AxisId,
    state: TrackingState,
}

impl Default for Tracking {
    fn default() -> Self {
        Self {
            horizontal_axis: AxisId::x(),
            vertical_axis: AxisId::y(),
            state: TrackingState::Idle,
        }
    }
}

impl Tracking {
    pub fn new(horizontal_axis: AxisId, vertical_axis: AxisId) -> Result<Self> {
        distinct_axes(&horizontal_axis, &vertical_axis)?;
        Ok(Self {
            horizontal_axis,
            vertical_axis,
            state: TrackingState::Idle,
        })
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn hover(&self) -> Option<&HoverPoint> {
        match &self.state {
            TrackingState::Idle => None,
            TrackingState::Hovering(point) => Some(point),
        }
    }

    /// Where the overlay is anchored, in data units of the two tracked axes.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        let point = self.hover()?;
        Some((
            *point.coordinates.get(&self.horizontal_axis)?,
            *point.coordinates.get(&self.vertical_axis)?,
        ))
    }
}

impl AxisBound for Tracking {
    fn bound_axes(&self) -> Vec<&AxisId> {
        vec![&self.horizontal_axis, &self.vertical_axis]
    }
}

impl PlotEventHandler for Tracking {
    fn on_mouse_move(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        let snapshot = controls.snapshot();
        let labels = event
            .coordinates
            .iter()
            .map(|(axis, value)| {
                let (kind, span) = snapshot
                    .domain(axis)
                    .map(|d| (d.kind, d.max - d.min))
                    .unwrap_or_default();
                let text = format_axis_value(*value, kind, span, snapshot.time_zone());
                (axis.clone(), text)
            })
            .collect();
        self.state = TrackingState::Hovering(HoverPoint {
            coordinates: event.coordinates.clone(),
            labels,
        });
    }

    fn on_mouse_leave(&mut self, _: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.state = TrackingState::Idle;
    }
}
