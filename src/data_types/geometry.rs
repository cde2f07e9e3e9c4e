use super::axis::AxisOrientation;
use serde::{Deserialize, Serialize};

/// Space between the surface edges and the plotted area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 10.0,
            left: 10.0,
        }
    }
}

/// Size of the drawing surface and the margins around the plotted area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: PlotMargins,
}

impl Default for PlotGeometry {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margins: PlotMargins::default(),
        }
    }
}

impl PlotGeometry {
    pub fn new(width: f64, height: f64, margins: PlotMargins) -> Self {
        Self {
            width,
            height,
            margins,
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Pixel range `[p0, p1]` the domain `[min, max]` of an axis maps onto.
    ///
    /// Vertical axes grow upwards, so their `p0` is the bottom edge.
    pub fn pixel_range(&self, orientation: AxisOrientation, flip: bool) -> (f64, f64) {
        let range = match orientation {
            AxisOrientation::Horizontal => (self.margins.left, self.width - self.margins.right),
            AxisOrientation::Vertical => (self.height - self.margins.bottom, self.margins.top),
        };
        if flip {
            (range.1, range.0)
        } else {
            range
        }
    }
}
