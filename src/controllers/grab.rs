use super::{distinct_axes, AxisBound};
use crate::data_types::{AxisId, AxisMap};
use crate::error::Result;
use crate::events::{Modifier, NormalizedPointerEvent, PlotEventHandler};
use crate::registry::PlotControls;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabOptions {
    pub horizontal_axis: AxisId,
    pub vertical_axis: AxisId,
    /// Key that must be held for the plot to follow the pointer.
    pub modifier: Modifier,
}

impl Default for GrabOptions {
    fn default() -> Self {
        Self {
            horizontal_axis: AxisId::x(),
            vertical_axis: AxisId::y(),
            modifier: Modifier::Alt,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrabState {
    #[default]
    Idle,
    Dragging,
}

/// Pans two axes by dragging the plot while a modifier is held.
#[derive(Clone, Debug, PartialEq)]
pub struct Grab {
    options: GrabOptions,
    state: GrabState,
}

impl Grab {
    pub fn new(options: GrabOptions) -> Result<Self> {
        distinct_axes(&options.horizontal_axis, &options.vertical_axis)?;
        Ok(Self {
            options,
            state: GrabState::Idle,
        })
    }

    pub fn state(&self) -> GrabState {
        self.state
    }
}

impl AxisBound for Grab {
    fn bound_axes(&self) -> Vec<&AxisId> {
        vec![&self.options.horizontal_axis, &self.options.vertical_axis]
    }
}

impl PlotEventHandler for Grab {
    fn on_mouse_down(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        if self.options.modifier.is_held(&event.raw.modifiers) {
            self.state = GrabState::Dragging;
        }
    }

    fn on_mouse_move(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        if self.state != GrabState::Dragging
            || !self.options.modifier.is_held(&event.raw.modifiers)
        {
            return;
        }
        let mut domains = AxisMap::new();
        for axis in [&self.options.horizontal_axis, &self.options.vertical_axis] {
            let (Some(domain), Some(movement)) = (event.domain(axis), event.movement(axis)) else {
                continue;
            };
            domains.insert(axis.clone(), domain.pan(-movement));
        }
        if domains.is_empty() {
            return;
        }
        trace!(?domains, "grab pan");
        if let Err(err) = controls.set_axes(domains) {
            warn!(%err, "grab pan rejected");
        }
    }

    fn on_mouse_up(&mut self, _: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.state = GrabState::Idle;
    }

    fn on_mouse_leave(&mut self, _: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.state = GrabState::Idle;
    }

    fn on_double_click(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        if !event.is_primary() {
            return;
        }
        let axes = [
            self.options.horizontal_axis.clone(),
            self.options.vertical_axis.clone(),
        ];
        if let Err(err) = controls.reset_axes(&axes) {
            warn!(%err, "axes reset rejected");
        }
    }
}
