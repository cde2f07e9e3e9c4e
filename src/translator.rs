//! Event Translator
//!
//! Turns raw surface input into [`NormalizedPointerEvent`]s using the scales
//! in force when the event arrives, then hands them to every subscribed
//! handler. Translation and delivery finish before the next raw event is
//! accepted, so a handler never sees a mapping older than the previous
//! handler's writes.

use crate::controllers::AxisBound;
use crate::data_types::{AxisMap, AxisOrientation};
use crate::error::Result;
use crate::events::{
    NormalizedPointerEvent, PlotEventHandler, PlotEvents, PointerEventKind, RawPointerEvent,
    SharedHandler, Subscription,
};
use crate::registry::PlotRegistry;
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::trace;

/// Zoom speed of the wheel, per pixel of delta.
pub const WHEEL_ZOOM_RATE: f64 = 0.01;

/// Factor applied to the span of a domain by one wheel step.
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    (1.0 - delta_y * WHEEL_ZOOM_RATE).clamp(0.1, 10.0)
}

pub struct EventTranslator {
    registry: Arc<PlotRegistry>,
    events: PlotEvents,
    origin: DVec2,
    last_pixel: Option<DVec2>,
}

impl EventTranslator {
    pub fn new(registry: Arc<PlotRegistry>) -> Self {
        Self {
            registry,
            events: PlotEvents::new(),
            origin: DVec2::ZERO,
            last_pixel: None,
        }
    }

    pub fn registry(&self) -> &Arc<PlotRegistry> {
        &self.registry
    }

    pub fn events(&self) -> &PlotEvents {
        &self.events
    }

    pub fn subscribe(&self, handler: SharedHandler) -> Subscription {
        self.events.subscribe(handler)
    }

    /// Subscribes a controller after checking its axes exist on the plot.
    pub fn subscribe_checked<H>(&self, handler: Rc<RefCell<H>>) -> Result<Subscription>
    where
        H: PlotEventHandler + AxisBound + 'static,
    {
        handler.borrow().validate(&self.registry.snapshot())?;
        Ok(self.events.subscribe(handler))
    }

    /// Top-left corner of the drawing surface, in window pixels.
    pub fn set_origin(&mut self, origin: DVec2) {
        self.origin = origin;
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Translates `raw` against the current state without delivering it.
    pub fn translate(&mut self, raw: &RawPointerEvent) -> NormalizedPointerEvent {
        let snapshot = self.registry.snapshot();
        let scales = self.registry.scales_for(&snapshot);
        let pixel = raw.position - self.origin;
        let previous = match raw.kind {
            PointerEventKind::MouseMove => Some(self.last_pixel),
            _ => None,
        };

        let mut coordinates = AxisMap::new();
        let mut movement = AxisMap::new();
        let mut domains = AxisMap::new();
        let mut wheel_domains = AxisMap::new();

        for (axis, scale) in &scales {
            let Some(entry) = snapshot.axes().entry(axis) else {
                continue;
            };
            let along = |p: DVec2| match entry.orientation {
                AxisOrientation::Horizontal => p.x,
                AxisOrientation::Vertical => p.y,
            };
            let value = scale.to_data(scale.clamp_pixel(along(pixel)));
            coordinates.insert(axis.clone(), value);
            domains.insert(axis.clone(), scale.domain());

            if let Some(previous) = previous {
                let delta = previous
                    .map(|p| value - scale.to_data(scale.clamp_pixel(along(p))))
                    .unwrap_or(0.0);
                movement.insert(axis.clone(), delta);
            }
            if raw.kind == PointerEventKind::Wheel {
                let factor = wheel_zoom_factor(raw.wheel_delta.y);
                if let Some(window) = scale.zoom_window(value, factor) {
                    wheel_domains.insert(axis.clone(), window);
                }
            }
        }

        self.last_pixel = match raw.kind {
            PointerEventKind::MouseLeave => None,
            _ => Some(pixel),
        };

        trace!(kind = ?raw.kind, ?pixel, ?coordinates, "pointer event translated");
        NormalizedPointerEvent {
            kind: raw.kind,
            pixel,
            coordinates,
            movement,
            domains,
            wheel_domains,
            raw: *raw,
        }
    }

    /// Translates `raw` and delivers it to every handler in subscription order.
    pub fn handle(&mut self, raw: RawPointerEvent) -> NormalizedPointerEvent {
        let event = self.translate(&raw);
        self.events.deliver(&event, self.registry.as_ref());
        event
    }
}
