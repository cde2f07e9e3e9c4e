//! Bridge between GPUI input events and the event translator.

use crate::data_types::{PlotGeometry, SeriesColor};
use crate::error::Result;
use crate::events::{PointerButton, PointerEventKind, PointerModifiers, RawPointerEvent};
use crate::translator::EventTranslator;
use glam::DVec2;
use gpui::{
    Bounds, Hsla, Modifiers, MouseButton, MouseDownEvent, MouseExitEvent, MouseMoveEvent,
    MouseUpEvent, Pixels, Point, ScrollDelta, ScrollWheelEvent,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Pixels per scrolled line.
const LINE_HEIGHT: f32 = 20.0;

pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

fn to_dvec(point: Point<Pixels>) -> DVec2 {
    DVec2::new(point.x.as_f32() as f64, point.y.as_f32() as f64)
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::Primary,
            MouseButton::Right => Self::Secondary,
            MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

impl From<Modifiers> for PointerModifiers {
    fn from(m: Modifiers) -> Self {
        Self {
            shift: m.shift,
            control: m.control,
            alt: m.alt,
            platform: m.platform,
        }
    }
}

impl From<&MouseDownEvent> for RawPointerEvent {
    fn from(event: &MouseDownEvent) -> Self {
        RawPointerEvent::down(to_dvec(event.position), event.button.into())
            .with_modifiers(event.modifiers.into())
    }
}

impl From<&MouseUpEvent> for RawPointerEvent {
    fn from(event: &MouseUpEvent) -> Self {
        RawPointerEvent::up(to_dvec(event.position), event.button.into())
            .with_modifiers(event.modifiers.into())
    }
}

impl From<&MouseMoveEvent> for RawPointerEvent {
    fn from(event: &MouseMoveEvent) -> Self {
        let mut raw = RawPointerEvent::moved(to_dvec(event.position))
            .with_modifiers(event.modifiers.into());
        raw.button = event.pressed_button.map(PointerButton::from);
        raw
    }
}

impl From<&MouseExitEvent> for RawPointerEvent {
    fn from(event: &MouseExitEvent) -> Self {
        RawPointerEvent::leave(to_dvec(event.position)).with_modifiers(event.modifiers.into())
    }
}

impl From<&ScrollWheelEvent> for RawPointerEvent {
    fn from(event: &ScrollWheelEvent) -> Self {
        let delta_y = match event.delta {
            ScrollDelta::Pixels(p) => p.y.as_f32(),
            ScrollDelta::Lines(p) => p.y * LINE_HEIGHT,
        };
        RawPointerEvent::wheel(to_dvec(event.position), delta_y as f64)
            .with_modifiers(event.modifiers.into())
    }
}

impl From<SeriesColor> for Hsla {
    fn from(color: SeriesColor) -> Self {
        gpui::rgb(color.0).into()
    }
}

/// Forwards the mouse listeners of a plot element to its translator.
#[derive(Clone)]
pub struct PlotInputHandler {
    pub translator: Rc<RefCell<EventTranslator>>,
}

impl PlotInputHandler {
    pub fn new(translator: Rc<RefCell<EventTranslator>>) -> Self {
        Self { translator }
    }

    /// Records where the surface was laid out; resizes the plot if needed.
    pub fn set_bounds(&self, bounds: Bounds<Pixels>) -> Result<()> {
        let mut translator = self.translator.borrow_mut();
        translator.set_origin(to_dvec(bounds.origin));
        let registry = translator.registry().clone();
        let current = *registry.snapshot().geometry();
        registry.set_geometry(PlotGeometry {
            width: bounds.size.width.as_f32() as f64,
            height: bounds.size.height.as_f32() as f64,
            ..current
        })
    }

    fn handle(&self, raw: RawPointerEvent) {
        self.translator.borrow_mut().handle(raw);
    }

    pub fn handle_mouse_down(&self, event: &MouseDownEvent) {
        self.handle(event.into());
    }

    pub fn handle_mouse_move(&self, event: &MouseMoveEvent) {
        self.handle(event.into());
    }

    /// Emits the release, then a click, then a double click on the second
    /// click of a sequence.
    pub fn handle_mouse_up(&self, event: &MouseUpEvent) {
        let up = RawPointerEvent::from(event);
        self.handle(up);
        self.handle(RawPointerEvent {
            kind: PointerEventKind::Click,
            ..up
        });
        if event.click_count == 2 {
            self.handle(RawPointerEvent {
                kind: PointerEventKind::DoubleClick,
                ..up
            });
        }
    }

    pub fn handle_mouse_exit(&self, event: &MouseExitEvent) {
        self.handle(event.into());
    }

    pub fn handle_scroll_wheel(&self, event: &ScrollWheelEvent) {
        self.handle(event.into());
    }
}
