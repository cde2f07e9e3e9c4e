//! Legend anchoring.
//!
//! The legend block is translated to an anchor computed from the surface size,
//! the plot margins and optional per-position margins. Opposite margins of the
//! same pair (`top`/`bottom`, `left`/`right`) are mutually exclusive for a
//! given position and setting both is a configuration error.

use crate::data_types::PlotMargins;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Embedded,
    Top,
    Bottom,
    Left,
    Right,
}

impl LegendPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegendPosition {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "embedded" => Ok(Self::Embedded),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ConfigError::UnknownLegendPosition(other.to_string())),
        }
    }
}

/// Optional margin overrides, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendMargins {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub position: LegendPosition,
    pub margins: LegendMargins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

/// Picks which member of an exclusive margin pair is set.
fn exclusive(
    start: Option<f64>,
    end: Option<f64>,
    names: (&'static str, &'static str),
    position: LegendPosition,
) -> Result<Option<(Side, f64)>> {
    match (start, end) {
        (Some(_), Some(_)) => Err(ConfigError::ExclusiveMargins {
            a: names.0,
            b: names.1,
            position: position.to_string(),
        }
        .into()),
        (Some(v), None) => Ok(Some((Side::Start, v))),
        (None, Some(v)) => Ok(Some((Side::End, v))),
        (None, None) => Ok(None),
    }
}

/// Anchor `(x, y)` of the legend block on the surface.
pub fn place(
    position: LegendPosition,
    legend: &LegendMargins,
    plot: &PlotMargins,
    width: f64,
    height: f64,
) -> Result<(f64, f64)> {
    let plot_width = width - plot.left - plot.right;
    let plot_height = height - plot.top - plot.bottom;

    let vertical = |default: f64| -> Result<f64> {
        let (side, value) = exclusive(legend.top, legend.bottom, ("top", "bottom"), position)?
            .unwrap_or((Side::Start, default));
        Ok(match side {
            Side::Start => plot.top + value,
            Side::End => height - plot.bottom - value,
        })
    };

    match position {
        LegendPosition::Embedded => {
            let y = vertical(10.0)?;
            let (side, value) =
                exclusive(legend.left, legend.right, ("left", "right"), position)?
                    .unwrap_or((Side::Start, 10.0));
            let x = match side {
                Side::Start => plot.left + value,
                Side::End => width - plot.right - value,
            };
            Ok((x, y))
        }
        LegendPosition::Top | LegendPosition::Bottom => {
            let (side, value) =
                exclusive(legend.left, legend.right, ("left", "right"), position)?
                    .unwrap_or((Side::Start, plot_width / 2.0));
            let x = match side {
                Side::Start => plot.left + value,
                Side::End => width - plot.right + value,
            };
            let y = if position == LegendPosition::Top {
                plot.top - legend.bottom.unwrap_or(50.0)
            } else {
                height - plot.bottom + legend.top.unwrap_or(25.0)
            };
            Ok((x, y))
        }
        LegendPosition::Left => {
            let y = vertical(plot_height / 2.0)?;
            Ok((plot.left - legend.right.unwrap_or(100.0), y))
        }
        LegendPosition::Right => {
            let y = vertical(plot_height / 2.0)?;
            Ok((width - plot.right + legend.left.unwrap_or(40.0), y))
        }
    }
}

/// Offsets of one stacked legend row relative to the legend anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendRow {
    pub marker_center: (f64, f64),
    pub label_origin: (f64, f64),
}

/// Rows for `count` entries, one line of height `em` each.
pub fn legend_rows(count: usize, em: f64) -> Vec<LegendRow> {
    (0..count)
        .map(|i| {
            let i = i as f64;
            LegendRow {
                marker_center: (0.25 * em, (i + 0.7) * em),
                label_origin: (0.75 * em, (i + 1.0) * em),
            }
        })
        .collect()
}
