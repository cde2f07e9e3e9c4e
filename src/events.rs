//! Pointer events before and after translation into data space, and the hub
//! delivering translated events to subscribed handlers.

use crate::data_types::{AxisId, AxisMap, DomainRange};
use crate::registry::PlotControls;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    Wheel,
    Click,
    DoubleClick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub platform: bool,
}

/// A modifier key a controller can require.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    #[default]
    Alt,
    Shift,
    Control,
    Platform,
}

impl Modifier {
    pub fn is_held(&self, modifiers: &PointerModifiers) -> bool {
        match self {
            Self::Alt => modifiers.alt,
            Self::Shift => modifiers.shift,
            Self::Control => modifiers.control,
            Self::Platform => modifiers.platform,
        }
    }
}

/// Input as reported by the drawing surface, in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawPointerEvent {
    pub kind: PointerEventKind,
    pub position: DVec2,
    pub button: Option<PointerButton>,
    pub modifiers: PointerModifiers,
    /// Wheel movement in pixels; positive `y` zooms in.
    pub wheel_delta: DVec2,
}

impl RawPointerEvent {
    pub fn new(kind: PointerEventKind, position: DVec2) -> Self {
        Self {
            kind,
            position,
            button: None,
            modifiers: PointerModifiers::default(),
            wheel_delta: DVec2::ZERO,
        }
    }

    pub fn down(position: DVec2, button: PointerButton) -> Self {
        Self::new(PointerEventKind::MouseDown, position).with_button(button)
    }

    pub fn moved(position: DVec2) -> Self {
        Self::new(PointerEventKind::MouseMove, position)
    }

    pub fn up(position: DVec2, button: PointerButton) -> Self {
        Self::new(PointerEventKind::MouseUp, position).with_button(button)
    }

    pub fn leave(position: DVec2) -> Self {
        Self::new(PointerEventKind::MouseLeave, position)
    }

    pub fn click(position: DVec2, button: PointerButton) -> Self {
        Self::new(PointerEventKind::Click, position).with_button(button)
    }

    pub fn double_click(position: DVec2, button: PointerButton) -> Self {
        Self::new(PointerEventKind::DoubleClick, position).with_button(button)
    }

    pub fn wheel(position: DVec2, delta_y: f64) -> Self {
        let mut event = Self::new(PointerEventKind::Wheel, position);
        event.wheel_delta = DVec2::new(0.0, delta_y);
        event
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_modifiers(mut self, modifiers: PointerModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// An input event translated into the data space of every ready axis.
///
/// Axes without a domain are absent from every map.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedPointerEvent {
    pub kind: PointerEventKind,
    /// Position relative to the surface origin.
    pub pixel: DVec2,
    /// Data value under the pointer, clamped into the plotted area.
    pub coordinates: AxisMap<f64>,
    /// Data distance travelled since the previous event (move events only).
    pub movement: AxisMap<f64>,
    /// Domains in force when the event was translated.
    pub domains: AxisMap<DomainRange>,
    /// Candidate domain after a wheel step, bounds unsorted (wheel events only).
    pub wheel_domains: AxisMap<(f64, f64)>,
    pub raw: RawPointerEvent,
}

impl NormalizedPointerEvent {
    pub fn coordinate(&self, axis: &AxisId) -> Option<f64> {
        self.coordinates.get(axis).copied()
    }

    pub fn movement(&self, axis: &AxisId) -> Option<f64> {
        self.movement.get(axis).copied()
    }

    pub fn domain(&self, axis: &AxisId) -> Option<DomainRange> {
        self.domains.get(axis).copied()
    }

    pub fn wheel_domain(&self, axis: &AxisId) -> Option<(f64, f64)> {
        self.wheel_domains.get(axis).copied()
    }

    /// Coordinates on two axes as a point, if both are ready.
    pub fn point(&self, horizontal: &AxisId, vertical: &AxisId) -> Option<DVec2> {
        Some(DVec2::new(
            self.coordinate(horizontal)?,
            self.coordinate(vertical)?,
        ))
    }

    pub fn is_primary(&self) -> bool {
        self.raw.button == Some(PointerButton::Primary)
    }
}

/// Receives translated events. Every method is optional.
#[allow(unused_variables)]
pub trait PlotEventHandler {
    fn on_mouse_down(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {}
    fn on_mouse_move(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {}
    fn on_mouse_up(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {}
    fn on_mouse_leave(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {}
    fn on_wheel(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {}
    fn on_click(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {}
    fn on_double_click(&mut self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {}
}

pub type SharedHandler = Rc<RefCell<dyn PlotEventHandler>>;

type HandlerList = RefCell<Vec<(u64, SharedHandler)>>;

/// Ordered set of event handlers.
#[derive(Default)]
pub struct PlotEvents {
    handlers: Rc<HandlerList>,
    next_id: Cell<u64>,
}

impl PlotEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `handler` after every existing handler. It stays subscribed until
    /// the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, handler: SharedHandler) -> Subscription {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.handlers.borrow_mut().push((id, handler));
        Subscription {
            id,
            handlers: Rc::downgrade(&self.handlers),
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    /// Calls every handler in subscription order.
    pub fn deliver(&self, event: &NormalizedPointerEvent, controls: &dyn PlotControls) {
        // Cloned so a handler can unsubscribe while being called.
        let handlers: Vec<SharedHandler> =
            self.handlers.borrow().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            let Ok(mut handler) = handler.try_borrow_mut() else {
                warn!(kind = ?event.kind, "handler re-entered, event skipped");
                continue;
            };
            match event.kind {
                PointerEventKind::MouseDown => handler.on_mouse_down(event, controls),
                PointerEventKind::MouseMove => handler.on_mouse_move(event, controls),
                PointerEventKind::MouseUp => handler.on_mouse_up(event, controls),
                PointerEventKind::MouseLeave => handler.on_mouse_leave(event, controls),
                PointerEventKind::Wheel => handler.on_wheel(event, controls),
                PointerEventKind::Click => handler.on_click(event, controls),
                PointerEventKind::DoubleClick => handler.on_double_click(event, controls),
            }
        }
    }
}

/// Keeps a handler subscribed. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its handler"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    handlers: Weak<HandlerList>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    /// Keeps the handler subscribed for the lifetime of the hub.
    pub fn detach(mut self) {
        self.handlers = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            handlers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
