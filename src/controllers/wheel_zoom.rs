use super::AxisBound;
use crate::data_types::{AxisId, DomainRange};
use crate::events::{NormalizedPointerEvent, PlotEventHandler};
use crate::registry::PlotControls;
use tracing::{debug, warn};

/// Zooms one axis around the cursor with the wheel; a primary double-click
/// gives the axis back to auto-fit.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelZoom {
    axis: AxisId,
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self::vertical()
    }
}

impl WheelZoom {
    pub fn new(axis: AxisId) -> Self {
        Self { axis }
    }

    pub fn horizontal() -> Self {
        Self::new(AxisId::x())
    }

    pub fn vertical() -> Self {
        Self::new(AxisId::y())
    }

    pub fn axis(&self) -> &AxisId {
        &self.axis
    }
}

impl AxisBound for WheelZoom {
    fn bound_axes(&self) -> Vec<&AxisId> {
        vec![&self.axis]
    }
}

impl PlotEventHandler for WheelZoom {
    fn on_wheel(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        let Some((y1, y2)) = event.wheel_domain(&self.axis) else {
            return;
        };
        let range = DomainRange::new(y1.min(y2), y1.max(y2));
        match controls.set_axis(&self.axis, range) {
            Ok(()) => debug!(axis = %self.axis, ?range, "wheel zoom"),
            Err(err) => warn!(axis = %self.axis, %err, "wheel zoom rejected"),
        }
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
