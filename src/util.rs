/// Splits whole seconds into years, months, days, hours, minutes and seconds, using
/// 30-day months and 12-month years.
pub fn duration_parts(total_seconds: u64) -> [u64; 6] {
    let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    let (days, hours) = (hours / 24, hours % 24);
    let (months, days) = (days / 30, days % 30);
    let (years, months) = (months / 12, months % 12);
    [years, months, days, hours, minutes, seconds]
}

/// `"1y 2m 3d 4h 5m 6s"`, skipping zero components.
pub fn format_duration(seconds: f64) -> String {
    const UNITS: [&str; 6] = ["y", "m", "d", "h", "m", "s"];

    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let parts = duration_parts(whole)
        .iter()
        .zip(UNITS)
        .filter(|(value, _)| **value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect::<Vec<_>>();

    if parts.is_empty() {
        "0s".to_owned()
    } else {
        parts.join(" ")
    }
}

pub fn format_kilo(value: f64) -> String {
    format!("{:.2}k", value / 1000.0)
}

pub fn format_speed_kms(meters_per_second: f64) -> String {
    format!("{:.2} km/s", meters_per_second * 0.001)
}
