use super::axis::{AxisId, AxisValue, DomainRange, ValueKind};
use chrono::{DateTime, Utc};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 24-bit RGB colour, `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesColor(pub u32);

impl SeriesColor {
    /// Categorical palette series colours are drawn from, in assignment order.
    pub const PALETTE: [SeriesColor; 10] = [
        SeriesColor(0x1f77b4),
        SeriesColor(0xff7f0e),
        SeriesColor(0x2ca02c),
        SeriesColor(0xd62728),
        SeriesColor(0x9467bd),
        SeriesColor(0x8c564b),
        SeriesColor(0xe377c2),
        SeriesColor(0x7f7f7f),
        SeriesColor(0xbcbd22),
        SeriesColor(0x17becf),
    ];

    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::PALETTE[ordinal % Self::PALETTE.len()]
    }

    pub fn hex(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
    Cross,
}

/// How the legend draws the swatch of an entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub figure: MarkerShape,
    pub color: SeriesColor,
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub id: String,
    pub label: String,
    pub color: SeriesColor,
    pub shape: ShapeDescriptor,
    pub hidden: bool,
}

/// Which of the two axes of a series an extent belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AxisRole {
    X,
    Y,
}

/// Value range one series contributes to one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesExtent {
    pub series_id: String,
    pub axis_id: AxisId,
    pub role: AxisRole,
    pub kind: ValueKind,
    pub range: Option<DomainRange>,
}

/// Everything the view layer hands over when a series mounts.
#[derive(Clone, Debug)]
pub struct SeriesSpec {
    pub id: String,
    pub label: Option<String>,
    pub x_axis: AxisId,
    pub y_axis: AxisId,
    pub x_kind: ValueKind,
    pub y_kind: ValueKind,
    pub points: Option<Arc<[DVec2]>>,
    pub x_range: Option<(AxisValue, AxisValue)>,
    pub y_range: Option<(AxisValue, AxisValue)>,
    pub color: Option<SeriesColor>,
    pub shape: MarkerShape,
    pub hidden: bool,
}

impl SeriesSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            x_axis: AxisId::x(),
            y_axis: AxisId::y(),
            x_kind: ValueKind::Numeric,
            y_kind: ValueKind::Numeric,
            points: None,
            x_range: None,
            y_range: None,
            color: None,
            shape: MarkerShape::default(),
            hidden: false,
        }
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.points = Some(points.into_iter().map(|(x, y)| DVec2::new(x, y)).collect());
        self
    }

    /// Points whose x values are timestamps.
    pub fn with_time_points(
        mut self,
        points: impl IntoIterator<Item = (DateTime<Utc>, f64)>,
    ) -> Self {
        self.x_kind = ValueKind::Time;
        self.points = Some(
            points
                .into_iter()
                .map(|(t, y)| DVec2::new(AxisValue::Time(t).as_f64(), y))
                .collect(),
        );
        self
    }

    pub fn with_axes(mut self, x_axis: AxisId, y_axis: AxisId) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    pub fn with_x_range(mut self, min: impl Into<AxisValue>, max: impl Into<AxisValue>) -> Self {
        self.x_range = Some((min.into(), max.into()));
        self
    }

    pub fn with_y_range(mut self, min: impl Into<AxisValue>, max: impl Into<AxisValue>) -> Self {
        self.y_range = Some((min.into(), max.into()));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: SeriesColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_shape(mut self, shape: MarkerShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// One extent per axis role. Explicit ranges win over ranges scanned from points.
    pub fn extents(&self) -> Vec<SeriesExtent> {
        let x = self.role_extent(AxisRole::X, &self.x_axis, self.x_range, self.x_kind);
        let y = self.role_extent(AxisRole::Y, &self.y_axis, self.y_range, self.y_kind);
        vec![x, y]
    }

    fn role_extent(
        &self,
        role: AxisRole,
        axis_id: &AxisId,
        explicit: Option<(AxisValue, AxisValue)>,
        point_kind: ValueKind,
    ) -> SeriesExtent {
        let (kind, range) = match explicit {
            Some((a, b)) => {
                // A kind mismatch inside one range is caught by the aggregator.
                let kind = if a.kind() == b.kind() { a.kind() } else { ValueKind::Numeric };
                let (lo, hi) = (a.as_f64(), b.as_f64());
                (kind, finite_range(lo.min(hi), lo.max(hi)))
            }
            None => (point_kind, self.points.as_deref().and_then(|p| scan(p, role))),
        };
        SeriesExtent {
            series_id: self.id.clone(),
            axis_id: axis_id.clone(),
            role,
            kind,
            range,
        }
    }

    /// `true` when an explicit range mixes numbers and dates.
    pub fn has_mixed_range(&self) -> bool {
        [self.x_range, self.y_range]
            .iter()
            .flatten()
            .any(|(a, b)| a.kind() != b.kind())
    }
}

fn finite_range(min: f64, max: f64) -> Option<DomainRange> {
    (min.is_finite() && max.is_finite()).then(|| DomainRange::new(min, max))
}

fn scan(points: &[DVec2], role: AxisRole) -> Option<DomainRange> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        let v = match role {
            AxisRole::X => p.x,
            AxisRole::Y => p.y,
        };
        if v.is_nan() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    finite_range(min, max)
}
