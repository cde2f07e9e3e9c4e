use chrono::DateTime;
use chrono_tz::Tz;
use gpui_plot::config::{AxisConfig, PlotConfig};
use gpui_plot::data_types::{AxisId, AxisOrientation, AxisValue, DomainRange, ScaleType, ValueKind};
use gpui_plot::error::{ConfigError, PlotError};
use gpui_plot::legend::LegendPosition;
use gpui_plot::registry::PlotRegistry;
use gpui_plot::utils::value_formatter::{determine_date_format, format_axis_value, SmartDateFormat};

#[test]
fn test_parse_full_config() {
    let json = r#"{
        "geometry": { "width": 640, "height": 480, "margins": { "left": 60 } },
        "axes": [
            { "id": "time", "orientation": "horizontal" },
            { "id": "price", "orientation": "vertical", "scale_type": "log", "min": 1, "max": 1000, "flip": true }
        ],
        "legend": { "position": "right", "margins": { "top": 12 } },
        "time_zone": "Europe/Paris"
    }"#;
    let config = PlotConfig::from_json_str(json).unwrap();

    assert_eq!(config.geometry.width, 640.0);
    assert_eq!(config.geometry.margins.left, 60.0);
    assert_eq!(config.geometry.margins.top, 10.0);
    assert_eq!(config.axes.len(), 2);
    assert_eq!(config.axes[1].scale_type, ScaleType::Log);
    assert_eq!(config.axes[1].min, Some(AxisValue::Number(1.0)));
    assert!(config.axes[1].flip);
    assert_eq!(config.legend.position, LegendPosition::Right);
    assert_eq!(config.legend.margins.top, Some(12.0));
    assert_eq!(config.time_zone, Tz::Europe__Paris);

    let registry = PlotRegistry::from_config(&config).unwrap();
    let price = AxisId::new("price").unwrap();
    let domain = registry.domain(&price).unwrap();
    assert!(domain.explicit);
    assert_eq!(domain.range(), DomainRange::new(1.0, 1000.0));
    // Flipped vertical axis grows downwards.
    assert_eq!(registry.scale(&price).unwrap().range(), (10.0, 470.0));
    assert!(registry.domain(&AxisId::new("time").unwrap()).is_none());
    assert_eq!(registry.snapshot().time_zone(), Tz::Europe__Paris);
}

#[test]
fn test_defaults_from_empty_object() {
    let config = PlotConfig::from_json_str("{}").unwrap();
    assert_eq!(config, PlotConfig::default());
    assert_eq!(config.axes[0].orientation, AxisOrientation::Horizontal);
    assert_eq!(config.axes[1].id, AxisId::y());
}

#[test]
fn test_json_round_trip_keeps_time_bounds() {
    let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let t1 = DateTime::from_timestamp(1_700_086_400, 0).unwrap();
    let config = PlotConfig {
        axes: vec![AxisConfig::horizontal(AxisId::x()).with_domain(t0, t1)],
        ..PlotConfig::default()
    };
    let json = config.to_json_string().unwrap();
    let parsed = PlotConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed, config);

    let registry = PlotRegistry::from_config(&parsed).unwrap();
    let domain = registry.domain(&AxisId::x()).unwrap();
    assert_eq!(domain.kind, ValueKind::Time);
    assert_eq!(domain.min_value(), Some(AxisValue::Time(t0)));
}

#[test]
fn test_malformed_json_reports_context() {
    let err = PlotConfig::from_json_str(r#"{ "axes": [ { "id": "bad id", "orientation": "horizontal" } ] }"#)
        .unwrap_err();
    assert!(err.to_string().contains("failed to parse plot configuration"));

    assert!(PlotConfig::from_json_str(r#"{ "legend": { "position": "middle" } }"#).is_err());
}

#[test]
fn test_axis_id_validation() {
    assert!(AxisId::new("x2").is_ok());
    assert_eq!(
        AxisId::new(""),
        Err(PlotError::Configuration(ConfigError::MalformedAxisId(String::new())))
    );
    assert!("has space".parse::<AxisId>().is_err());
}

#[test]
fn test_invalid_declared_domains_are_rejected() {
    let registry = PlotRegistry::new();

    let half = AxisConfig {
        max: Some(AxisValue::Number(4.0)),
        ..AxisConfig::horizontal(AxisId::x())
    };
    assert_eq!(
        registry.register_axis(half),
        Err(PlotError::Configuration(ConfigError::IncompleteDomain("x".to_string())))
    );

    let inverted = AxisConfig::horizontal(AxisId::x()).with_domain(5.0, 1.0);
    assert!(matches!(
        registry.register_axis(inverted),
        Err(PlotError::InvariantViolation { .. })
    ));

    let log = AxisConfig::vertical(AxisId::y())
        .with_scale(ScaleType::Log)
        .with_domain(0.0, 10.0);
    assert!(matches!(
        registry.register_axis(log),
        Err(PlotError::Configuration(ConfigError::NonPositiveLogDomain { .. }))
    ));

    let t1 = DateTime::from_timestamp(1_700_086_400, 0).unwrap();
    let mixed = AxisConfig::horizontal(AxisId::x()).with_domain(0.0, t1);
    assert!(matches!(
        registry.register_axis(mixed),
        Err(PlotError::Configuration(ConfigError::MixedValueKinds { .. }))
    ));

    assert_eq!(registry.snapshot().revision(), 0);
}

#[test]
fn test_date_format_follows_visible_span() {
    assert_eq!(determine_date_format(3.0 * 365.0 * 86400.0), SmartDateFormat::Year);
    assert_eq!(determine_date_format(90.0 * 86400.0), SmartDateFormat::MonthYear);
    assert_eq!(determine_date_format(3.0 * 86400.0), SmartDateFormat::DayMonth);
    assert_eq!(determine_date_format(3600.0), SmartDateFormat::HourMin);
    assert_eq!(determine_date_format(60.0), SmartDateFormat::HourMinSec);
}

#[test]
fn test_axis_values_format_in_time_zone() {
    // 2023-11-14T22:13:20Z
    let millis = 1_700_000_000_000.0;
    assert_eq!(format_axis_value(millis, ValueKind::Time, 3_600_000.0, Tz::UTC), "22:13");
    assert_eq!(
        format_axis_value(millis, ValueKind::Time, 3_600_000.0, Tz::Europe__Paris),
        "23:13"
    );
    assert_eq!(
        format_axis_value(millis, ValueKind::Time, 5.0 * 86_400_000.0, Tz::Europe__Paris),
        "14 Nov"
    );
    assert_eq!(format_axis_value(3.14159, ValueKind::Numeric, 10.0, Tz::UTC), "3.14");
}
