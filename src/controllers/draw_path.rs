use super::{distinct_axes, AxisBound};
use crate::data_types::AxisId;
use crate::error::Result;
use crate::events::{NormalizedPointerEvent, PlotEventHandler, PointerButton};
use crate::registry::PlotControls;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawPathOptions {
    pub horizontal_axis: AxisId,
    pub vertical_axis: AxisId,
    /// Link the last point back to the first one.
    pub closed: bool,
    /// Button that starts a path.
    pub button: PointerButton,
}

impl Default for DrawPathOptions {
    fn default() -> Self {
        Self {
            horizontal_axis: AxisId::x(),
            vertical_axis: AxisId::y(),
            closed: false,
            button: PointerButton::Primary,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing(Vec<DVec2>),
}

/// Draft path to render while drawing.
#[derive(Clone, Debug, PartialEq)]
pub enum PathShape<'a> {
    Polyline(&'a [DVec2]),
    Polygon(&'a [DVec2]),
}

type PathCallback = Box<dyn FnMut(&[DVec2])>;

/// Free-hand path capture in data space.
pub struct DrawPath {
    options: DrawPathOptions,
    state: DrawState,
    on_draw: Option<PathCallback>,
    on_end: Option<PathCallback>,
}

impl std::fmt::Debug for DrawPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawPath")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl DrawPath {
    pub fn new(options: DrawPathOptions) -> Result<Self> {
        distinct_axes(&options.horizontal_axis, &options.vertical_axis)?;
        Ok(Self {
            options,
            state: DrawState::Idle,
            on_draw: None,
            on_end: None,
        })
    }

    /// Called with the draft after every accepted move.
    pub fn on_draw(mut self, callback: impl FnMut(&[DVec2]) + 'static) -> Self {
        self.on_draw = Some(Box::new(callback));
        self
    }

    /// Called with the whole path on release.
    pub fn on_end(mut self, callback: impl FnMut(&[DVec2]) + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn points(&self) -> &[DVec2] {
        match &self.state {
            DrawState::Idle => &[],
            DrawState::Drawing(points) => points,
        }
    }

    pub fn shape(&self) -> Option<PathShape<'_>> {
        let DrawState::Drawing(points) = &self.state else {
            return None;
        };
        Some(if self.options.closed {
            PathShape::Polygon(points)
        } else {
            PathShape::Polyline(points)
        })
    }

    fn point(&self, event: &NormalizedPointerEvent) -> Option<DVec2> {
        event.point(&self.options.horizontal_axis, &self.options.vertical_axis)
    }
}

impl AxisBound for DrawPath {
    fn bound_axes(&self) -> Vec<&AxisId> {
        vec![&self.options.horizontal_axis, &self.options.vertical_axis]
    }
}

impl PlotEventHandler for DrawPath {
    fn on_mouse_down(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        if event.raw.button.is_some_and(|b| b != self.options.button) {
            return;
        }
        if let Some(point) = self.point(event) {
            self.state = DrawState::Drawing(vec![point]);
        }
    }

    fn on_mouse_move(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        let Some(point) = self.point(event) else {
            return;
        };
        let DrawState::Drawing(points) = &mut self.state else {
            return;
        };
        if points.last() == Some(&point) {
            return;
        }
        points.push(point);
        if let Some(on_draw) = self.on_draw.as_mut() {
            on_draw(points);
        }
    }

    fn on_mouse_up(&mut self, _: &NormalizedPointerEvent, _: &dyn PlotControls) {
        let DrawState::Drawing(points) = std::mem::take(&mut self.state) else {
            return;
        };
        debug!(points = points.len(), closed = self.options.closed, "path drawn");
        if let Some(on_end) = self.on_end.as_mut() {
            on_end(&points);
        }
    }

    fn on_mouse_leave(&mut self, _: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.state = DrawState::Idle;
    }
}
