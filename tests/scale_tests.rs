use gpui_plot::data_types::{AxisId, DomainRange, ScaleType};
use gpui_plot::error::{ConfigError, PlotError};
use gpui_plot::scales::{ChartScale, ScaleCache};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_close(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() <= tolerance,
        "{a} and {b} differ by more than {tolerance}"
    );
}

#[test]
fn test_linear_scale_endpoints() {
    let scale =
        ChartScale::new_linear(AxisId::x(), DomainRange::new(0.0, 100.0), (10.0, 510.0)).unwrap();

    assert_eq!(scale.to_pixel(0.0), Some(10.0));
    assert_eq!(scale.to_pixel(100.0), Some(510.0));
    assert_eq!(scale.to_pixel(50.0), Some(260.0));
    assert_eq!(scale.to_data(260.0), 50.0);
}

#[test]
fn test_vertical_range_grows_upwards() {
    let scale =
        ChartScale::new_linear(AxisId::y(), DomainRange::new(0.0, 10.0), (110.0, 10.0)).unwrap();

    assert_eq!(scale.to_pixel(0.0), Some(110.0));
    assert_eq!(scale.to_pixel(10.0), Some(10.0));
    assert_eq!(scale.clamp_pixel(150.0), 110.0);
    assert_eq!(scale.clamp_pixel(-3.0), 10.0);
}

#[test]
fn test_linear_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let min = rng.random_range(-1e4..1e4);
        let max = min + rng.random_range(1.0..1e5);
        let p0 = rng.random_range(0.0..500.0);
        let p1 = p0 + rng.random_range(10.0..2000.0);
        let scale =
            ChartScale::new_linear(AxisId::x(), DomainRange::new(min, max), (p0, p1)).unwrap();

        for _ in 0..20 {
            let v = rng.random_range(min..=max);
            let p = scale.to_pixel(v).unwrap();
            assert_close(scale.to_data(p), v, 1e-9 * (max - min));

            let p = rng.random_range(p0..=p1);
            assert_close(scale.to_pixel(scale.to_data(p)).unwrap(), p, 1e-6);
        }
    }
}

#[test]
fn test_log_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let min = 10f64.powf(rng.random_range(-3.0..3.0));
        let max = min * 10f64.powf(rng.random_range(0.1..6.0));
        let scale = ChartScale::new(
            AxisId::y(),
            DomainRange::new(min, max),
            (600.0, 20.0),
            ScaleType::Log,
        )
        .unwrap();

        for _ in 0..20 {
            let v = rng.random_range(min..=max);
            let p = scale.to_pixel(v).unwrap();
            assert_close(scale.to_data(p) / v, 1.0, 1e-9);

            let p = rng.random_range(20.0..=600.0);
            assert_close(scale.to_pixel(scale.to_data(p)).unwrap(), p, 1e-6);
        }
    }
}

#[test]
fn test_log_scale_decades_are_evenly_spaced() {
    let scale = ChartScale::new(
        AxisId::y(),
        DomainRange::new(1.0, 1000.0),
        (0.0, 300.0),
        ScaleType::Log,
    )
    .unwrap();

    assert_close(scale.to_pixel(10.0).unwrap(), 100.0, 1e-9);
    assert_close(scale.to_pixel(100.0).unwrap(), 200.0, 1e-9);
    assert_eq!(scale.to_pixel(0.0), None);
    assert_eq!(scale.to_pixel(-4.0), None);
    assert!(scale.linear_coeffs().is_none());
}

#[test]
fn test_log_scale_rejects_non_positive_domain() {
    let err = ChartScale::new(
        AxisId::y(),
        DomainRange::new(0.0, 10.0),
        (0.0, 100.0),
        ScaleType::Log,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PlotError::Configuration(ConfigError::NonPositiveLogDomain { .. })
    ));
}

#[test]
fn test_scale_rejects_degenerate_domain() {
    let err =
        ChartScale::new_linear(AxisId::x(), DomainRange::new(1.0, 1.0), (0.0, 100.0)).unwrap_err();
    assert!(matches!(err, PlotError::InvariantViolation { .. }));
}

#[test]
fn test_zoom_window_keeps_pivot_fixed() {
    let scale =
        ChartScale::new_linear(AxisId::x(), DomainRange::new(0.0, 10.0), (0.0, 100.0)).unwrap();
    let (a, b) = scale.zoom_window(5.0, 0.8).unwrap();
    assert_close(a, 1.0, 1e-12);
    assert_close(b, 9.0, 1e-12);

    let log = ChartScale::new(
        AxisId::y(),
        DomainRange::new(1.0, 10000.0),
        (0.0, 100.0),
        ScaleType::Log,
    )
    .unwrap();
    let (a, b) = log.zoom_window(100.0, 0.5).unwrap();
    assert_close(a, 10.0, 1e-9);
    assert_close(b, 1000.0, 1e-9);
}

#[test]
fn test_linear_coeffs_match_to_pixel() {
    let scale =
        ChartScale::new_linear(AxisId::x(), DomainRange::new(-20.0, 80.0), (40.0, 440.0)).unwrap();
    let (m, c) = scale.linear_coeffs().unwrap();
    for v in [-20.0, 0.0, 33.3, 80.0] {
        assert_close(v * m + c, scale.to_pixel(v).unwrap(), 1e-9);
    }
}

#[test]
fn test_cache_rebuilds_only_on_value_change() {
    let cache = ScaleCache::new();
    let axis = AxisId::x();
    let domain = DomainRange::new(0.0, 1.0);

    let first = cache
        .get_or_build(&axis, domain, (0.0, 100.0), ScaleType::Linear)
        .unwrap();
    let again = cache
        .get_or_build(&axis, DomainRange::new(0.0, 1.0), (0.0, 100.0), ScaleType::Linear)
        .unwrap();
    assert_eq!(first, again);
    assert_eq!(cache.len(), 1);

    let wider = cache
        .get_or_build(&axis, domain, (0.0, 200.0), ScaleType::Linear)
        .unwrap();
    assert_eq!(wider.range(), (0.0, 200.0));
    assert_eq!(cache.len(), 1);

    cache.invalidate(&axis);
    assert!(cache.is_empty());
}
