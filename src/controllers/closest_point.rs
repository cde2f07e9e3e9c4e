use crate::events::{NormalizedPointerEvent, PlotEventHandler};
use crate::registry::{PlotControls, PlotSnapshot};
use glam::DVec2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Distance used to rank points against the click position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosestMetric {
    #[default]
    Euclidean,
    Manhattan,
    /// Distance along the horizontal axis only.
    Horizontal,
    /// Distance along the vertical axis only.
    Vertical,
}

impl ClosestMetric {
    pub fn distance(&self, a: DVec2, b: DVec2) -> f64 {
        let d = (a - b).abs();
        match self {
            Self::Euclidean => a.distance(b),
            Self::Manhattan => d.x + d.y,
            Self::Horizontal => d.x,
            Self::Vertical => d.y,
        }
    }
}

/// The point of one series nearest to a query position.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosestInfo {
    pub series_id: String,
    pub label: String,
    pub index: usize,
    pub point: DVec2,
    pub distance: f64,
}

/// Nearest point of every visible series with data, in mount order.
///
/// A series is skipped when the event has no coordinate on one of its axes.
pub fn closest_points(
    snapshot: &PlotSnapshot,
    event: &NormalizedPointerEvent,
    metric: ClosestMetric,
) -> Vec<ClosestInfo> {
    snapshot
        .series_in_order()
        .into_iter()
        .filter(|record| !record.spec.hidden)
        .filter_map(|record| {
            let spec = &record.spec;
            let target = event.point(&spec.x_axis, &spec.y_axis)?;
            let points = spec.points.as_deref()?;
            let (index, distance) = points
                .par_iter()
                .enumerate()
                .filter(|(_, p)| !p.is_nan())
                .map(|(i, p)| (i, metric.distance(*p, target)))
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))?;
            Some(ClosestInfo {
                series_id: spec.id.clone(),
                label: record.label().to_string(),
                index,
                point: points[index],
                distance,
            })
        })
        .collect()
}

/// Picks, on click, the nearest point of every series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClosestPoint {
    metric: ClosestMetric,
    result: Option<Vec<ClosestInfo>>,
}

impl ClosestPoint {
    pub fn new(metric: ClosestMetric) -> Self {
        Self {
            metric,
            result: None,
        }
    }

    /// Results of the last click, one per series.
    pub fn result(&self) -> Option<&[ClosestInfo]> {
        self.result.as_deref()
    }

    pub fn clear(&mut self) {
        self.result = None;
    }
}

impl PlotEventHandler for ClosestPoint {
    fn on_click(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        let found = closest_points(&controls.snapshot(), event, self.metric);
        debug!(count = found.len(), metric = ?self.metric, "closest points picked");
        self.result = Some(found);
    }
}
