//! Gesture controllers.
//!
//! Each controller is a small state machine over the normalized event stream.
//! They are independent of each other: several can be subscribed to the same
//! translator and each only ever touches its own state and the control
//! surface it is handed.

pub mod box_zoom;
pub mod closest_point;
pub mod draw_path;
pub mod grab;
pub mod tracking;
pub mod wheel_zoom;

pub use box_zoom::{BoxZoom, BoxZoomState};
pub use closest_point::{ClosestInfo, ClosestMetric, ClosestPoint};
pub use draw_path::{DrawPath, DrawPathOptions, DrawState, PathShape};
pub use grab::{Grab, GrabOptions, GrabState};
pub use tracking::{HoverPoint, Tracking, TrackingState};
pub use wheel_zoom::WheelZoom;

use crate::data_types::AxisId;
use crate::error::{ConfigError, PlotError, Result};
use crate::registry::PlotSnapshot;

/// A controller bound to named axes.
pub trait AxisBound {
    fn bound_axes(&self) -> Vec<&AxisId>;

    /// Fails with `UnknownAxis` on the first bound axis `snapshot` doesn't have.
    fn validate(&self, snapshot: &PlotSnapshot) -> Result<()> {
        match self.bound_axes().into_iter().find(|a| !snapshot.has_axis(a)) {
            Some(axis) => Err(PlotError::UnknownAxis(axis.to_string())),
            None => Ok(()),
        }
    }
}

/// Rejects a controller configured with the same axis twice.
pub(crate) fn distinct_axes(horizontal: &AxisId, vertical: &AxisId) -> Result<()> {
    if horizontal == vertical {
        return Err(ConfigError::SameAxis(horizontal.to_string()).into());
    }
    Ok(())
}
