use glam::DVec2;
use gpui_plot::config::{AxisConfig, PlotConfig};
use gpui_plot::data_types::{AxisId, DomainRange, PlotGeometry, PlotMargins};
use gpui_plot::events::{
    NormalizedPointerEvent, PlotEventHandler, PointerButton, PointerEventKind, RawPointerEvent,
};
use gpui_plot::registry::{PlotControls, PlotRegistry};
use gpui_plot::translator::{wheel_zoom_factor, EventTranslator};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

// 120x120 surface, 10px margins, both axes pinned to [0, 10]:
// data x maps to 10 + 10x, data y maps to 110 - 10y.
fn plot() -> (Arc<PlotRegistry>, EventTranslator) {
    let config = PlotConfig {
        geometry: PlotGeometry::new(120.0, 120.0, PlotMargins::default()),
        axes: vec![
            AxisConfig::horizontal(AxisId::x()).with_domain(0.0, 10.0),
            AxisConfig::vertical(AxisId::y()).with_domain(0.0, 10.0),
        ],
        ..PlotConfig::default()
    };
    let registry = Arc::new(PlotRegistry::from_config(&config).unwrap());
    let translator = EventTranslator::new(registry.clone());
    (registry, translator)
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[derive(Default)]
struct Recorder {
    kinds: Vec<PointerEventKind>,
}

impl PlotEventHandler for Recorder {
    fn on_mouse_down(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.kinds.push(event.kind);
    }

    fn on_mouse_move(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.kinds.push(event.kind);
    }

    fn on_click(&mut self, event: &NormalizedPointerEvent, _: &dyn PlotControls) {
        self.kinds.push(event.kind);
    }
}

#[test]
fn test_coordinates_follow_axis_orientation() {
    let (_registry, mut translator) = plot();
    let event = translator.translate(&RawPointerEvent::moved(DVec2::new(30.0, 60.0)));

    assert_close(event.coordinate(&AxisId::x()).unwrap(), 2.0);
    assert_close(event.coordinate(&AxisId::y()).unwrap(), 5.0);
    assert_eq!(event.domain(&AxisId::x()), Some(DomainRange::new(0.0, 10.0)));
    assert_eq!(event.pixel, DVec2::new(30.0, 60.0));
}

#[test]
fn test_positions_outside_plot_area_are_clamped() {
    let (_registry, mut translator) = plot();
    let event = translator.translate(&RawPointerEvent::moved(DVec2::new(-40.0, 500.0)));

    assert_close(event.coordinate(&AxisId::x()).unwrap(), 0.0);
    assert_close(event.coordinate(&AxisId::y()).unwrap(), 0.0);

    let event = translator.translate(&RawPointerEvent::moved(DVec2::new(115.0, 2.0)));
    assert_close(event.coordinate(&AxisId::x()).unwrap(), 10.0);
    assert_close(event.coordinate(&AxisId::y()).unwrap(), 10.0);
}

#[test]
fn test_origin_is_subtracted() {
    let (_registry, mut translator) = plot();
    translator.set_origin(DVec2::new(100.0, 200.0));
    let event = translator.translate(&RawPointerEvent::moved(DVec2::new(130.0, 260.0)));

    assert_eq!(event.pixel, DVec2::new(30.0, 60.0));
    assert_close(event.coordinate(&AxisId::x()).unwrap(), 2.0);
}

#[test]
fn test_movement_is_data_distance_since_previous_event() {
    let (_registry, mut translator) = plot();

    let first = translator.translate(&RawPointerEvent::moved(DVec2::new(30.0, 60.0)));
    assert_eq!(first.movement(&AxisId::x()), Some(0.0));
    assert_eq!(first.movement(&AxisId::y()), Some(0.0));

    let second = translator.translate(&RawPointerEvent::moved(DVec2::new(50.0, 40.0)));
    assert_close(second.movement(&AxisId::x()).unwrap(), 2.0);
    assert_close(second.movement(&AxisId::y()).unwrap(), 2.0);

    let down = translator.translate(&RawPointerEvent::down(
        DVec2::new(50.0, 40.0),
        PointerButton::Primary,
    ));
    assert!(down.movement.is_empty());

    translator.translate(&RawPointerEvent::leave(DVec2::new(200.0, 40.0)));
    let after_leave = translator.translate(&RawPointerEvent::moved(DVec2::new(90.0, 40.0)));
    assert_eq!(after_leave.movement(&AxisId::x()), Some(0.0));
}

#[test]
fn test_not_ready_axes_are_omitted() {
    let (registry, mut translator) = plot();
    let depth = AxisId::new("depth").unwrap();
    registry
        .register_axis(AxisConfig::vertical(depth.clone()))
        .unwrap();

    let event = translator.translate(&RawPointerEvent::moved(DVec2::new(30.0, 60.0)));
    assert!(event.coordinate(&depth).is_none());
    assert!(event.domain(&depth).is_none());
    assert_eq!(event.coordinates.len(), 2);
    assert!(event.point(&AxisId::x(), &depth).is_none());
}

#[test]
fn test_wheel_domain_follows_documented_formula() {
    let (_registry, mut translator) = plot();
    let event = translator.translate(&RawPointerEvent::wheel(DVec2::new(60.0, 60.0), 20.0));

    // f = 1 - 20 * 0.01 = 0.8 around y = 5: [5 - 5f, 5 + 5f].
    assert_close(wheel_zoom_factor(20.0), 0.8);
    let (a, b) = event.wheel_domain(&AxisId::y()).unwrap();
    assert_close(a, 1.0);
    assert_close(b, 9.0);

    let moved = translator.translate(&RawPointerEvent::moved(DVec2::new(60.0, 60.0)));
    assert!(moved.wheel_domains.is_empty());
}

#[test]
fn test_wheel_factor_is_bounded() {
    assert_eq!(wheel_zoom_factor(0.0), 1.0);
    assert_eq!(wheel_zoom_factor(5000.0), 0.1);
    assert_eq!(wheel_zoom_factor(-5000.0), 10.0);
    assert!(wheel_zoom_factor(-20.0) > 1.0);
}

#[test]
fn test_handle_delivers_to_subscribers_in_order() {
    let (_registry, mut translator) = plot();
    let first = Rc::new(RefCell::new(Recorder::default()));
    let second = Rc::new(RefCell::new(Recorder::default()));
    let _first_sub = translator.subscribe(first.clone());
    let second_sub = translator.subscribe(second.clone());
    assert_eq!(translator.events().len(), 2);

    translator.handle(RawPointerEvent::down(DVec2::new(30.0, 60.0), PointerButton::Primary));
    translator.handle(RawPointerEvent::moved(DVec2::new(40.0, 60.0)));
    translator.handle(RawPointerEvent::click(DVec2::new(40.0, 60.0), PointerButton::Primary));

    let expected = [
        PointerEventKind::MouseDown,
        PointerEventKind::MouseMove,
        PointerEventKind::Click,
    ];
    assert_eq!(first.borrow().kinds, expected);
    assert_eq!(second.borrow().kinds, expected);

    drop(second_sub);
    assert_eq!(translator.events().len(), 1);
    translator.handle(RawPointerEvent::moved(DVec2::new(50.0, 60.0)));
    assert_eq!(first.borrow().kinds.len(), 4);
    assert_eq!(second.borrow().kinds.len(), 3);
}

#[test]
fn test_events_use_domain_written_by_previous_event() {
    let (registry, mut translator) = plot();
    registry
        .set_axis(&AxisId::x(), DomainRange::new(100.0, 200.0))
        .unwrap();

    let event = translator.translate(&RawPointerEvent::moved(DVec2::new(60.0, 60.0)));
    assert_close(event.coordinate(&AxisId::x()).unwrap(), 150.0);
}
