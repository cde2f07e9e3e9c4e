use crate::data_types::ValueKind;
use chrono::{DateTime, LocalResult, TimeZone, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
}

/// Determines the best date format based on the visible time range (in seconds).
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if visible_range_sec > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if visible_range_sec > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if visible_range_sec > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if visible_range_sec > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats a millisecond timestamp in `tz`.
pub fn format_timestamp(millis: f64, format: SmartDateFormat, tz: Tz) -> String {
    let dt: DateTime<Tz> = match Utc.timestamp_millis_opt(millis as i64) {
        LocalResult::Single(d) => d.with_timezone(&tz),
        LocalResult::Ambiguous(d, _) => d.with_timezone(&tz),
        LocalResult::None => return format!("{:.2}", millis),
    };

    match format {
        SmartDateFormat::Year => dt.format("%Y").to_string(),
        SmartDateFormat::MonthYear => dt.format("%b %Y").to_string(),
        SmartDateFormat::DayMonth => dt.format("%d %b").to_string(),
        SmartDateFormat::HourMin => dt.format("%H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
    }
}

/// Rounds to two decimals, the precision overlays display values with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Label of a value on an axis whose visible domain spans `span` units.
pub fn format_axis_value(value: f64, kind: ValueKind, span: f64, tz: Tz) -> String {
    match kind {
        ValueKind::Numeric => format!("{}", round2(value)),
        ValueKind::Time => format_timestamp(value, determine_date_format(span / 1000.0), tz),
    }
}
