use super::AxisBound;
use crate::data_types::{AxisId, DomainRange};
use crate::events::{NormalizedPointerEvent, PlotEventHandler, PointerButton};
use crate::registry::PlotControls;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BoxZoomState {
    #[default]
    Idle,
    /// Edges of the selection along the zoomed axis, in data units.
    Selecting { start: f64, current: f64 },
}

/// Marquee zoom: drag out a band along one axis and release to zoom onto it.
///
/// The band is only an overlay until release; the domain is committed on
/// mouse up when both edges differ.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxZoom {
    axis: AxisId,
    button: PointerButton,
    state: BoxZoomState,
}

impl Default for BoxZoom {
    fn default() -> Self {
        Self::new(AxisId::x())
    }
}

impl BoxZoom {
    pub fn new(axis: AxisId) -> Self {
        Self {
            axis,
            button: PointerButton::Primary,
            state: BoxZoomState::Idle,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn state(&self) -> BoxZoomState {
        self.state
    }

    /// Current selection as `(min, max)`, for drawing the overlay.
    pub fn selection(&self) -> Option<(f64, f64)> {
        match self.state {
            BoxZoomState::Idle => None,
            BoxZoomState::Selecting { start, current } => {
                Some((start.min(current), start.max(current)))
            }
        }
    }
}

impl AxisBound for BoxZoom {
    fn bound_axes(&self) -> Vec<&AxisId> {
        vec![&self.axis]
    }
}

impl PlotEventHandler for BoxZoom {
    fn on_mouse_down(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        if event.raw.button.is_some_and(|b| b != self.button) {
            return;
        }
        if let Some(x) = event.coordinate(&self.axis) {
            self.state = BoxZoomState::Selecting { start: x, current: x };
        }
    }

    fn on_mouse_move(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        if let (BoxZoomState::Selecting { current, .. }, Some(x)) =
            (&mut self.state, event.coordinate(&self.axis))
        {
            *current = x;
        }
    }

    fn on_mouse_up(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        let BoxZoomState::Selecting { start, mut current } = self.state else {
            return;
        };
        self.state = BoxZoomState::Idle;
        if let Some(x) = event.coordinate(&self.axis) {
            current = x;
        }
        if start == current {
            return;
        }
        let range = DomainRange::new(start.min(current), start.max(current));
        match controls.set_axis(&self.axis, range) {
            Ok(()) => debug!(axis = %self.axis, ?range, "box zoom"),
            Err(err) => warn!(axis = %self.axis, %err, "box zoom rejected"),
        }
    }

    fn on_mouse_leave(&mut self, _: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.state = BoxZoomState::Idle;
    }

    fn on_double_click(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        if !event.is_primary() {
            return;
        }
        if let Err(err) = controls.reset_axis(&self.axis) {
            warn!(axis = %self.axis, %err, "axis reset rejected");
        }
    }
}
