//! Human-readable formatting of weather values.

use chrono::{DateTime, FixedOffset, Utc};

/// `22.5` → `"23°C"`.
pub fn temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

/// Bare rounded degrees, for min/max pairs: `"20°"`.
pub fn degrees(celsius: f64) -> String {
    format!("{}°", celsius.round() as i64)
}

/// Metres per second to `"15 km/h"`.
pub fn wind_speed(mps: f64) -> String {
    format!("{} km/h", (mps * 3.6).round() as i64)
}

/// Metres to `"10.0 km"`.
pub fn visibility(metres: u32) -> String {
    format!("{:.1} km", f64::from(metres) / 1000.0)
}

pub fn pressure(hpa: u32) -> String {
    format!("{hpa} hPa")
}

pub fn percent(value: u8) -> String {
    format!("{value}%")
}

/// Probability in `[0, 1]` to `"40%"`.
pub fn probability(p: f64) -> String {
    format!("{}%", (p * 100.0).round() as i64)
}

/// Forecast day label, e.g. `"Mon, 15 Jan"`.
pub fn forecast_date(ts: DateTime<Utc>) -> String {
    ts.format("%a, %-d %b").to_string()
}

/// Wall-clock `HH:MM` at the location, given its offset from UTC.
pub fn local_time(ts: DateTime<Utc>, offset_s: i32) -> String {
    match FixedOffset::east_opt(offset_s) {
        Some(offset) => ts.with_timezone(&offset).format("%H:%M").to_string(),
        None => ts.format("%H:%M UTC").to_string(),
    }
}

/// Capitalize every word: `"light rain"` → `"Light Rain"`.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
