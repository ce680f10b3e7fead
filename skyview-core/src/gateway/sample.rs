use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    error::GatewayError,
    forecast::daily_forecast,
    model::{
        Coordinates, CurrentConditions, DailyForecastEntry, Temperatures, WeatherCategory, Wind,
    },
};

use super::{WeatherGateway, require_location};

/// Placeholder data for running without a provider credential.
#[derive(Debug, Clone, Default)]
pub struct SampleGateway;

impl SampleGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WeatherGateway for SampleGateway {
    fn name(&self) -> &'static str {
        "sample"
    }

    async fn current_conditions(&self, location: &str) -> Result<CurrentConditions, GatewayError> {
        let location = require_location(location)?;
        tracing::debug!(location, "serving sample current conditions");
        Ok(sample_current(location))
    }

    async fn forecast(&self, location: &str) -> Result<Vec<DailyForecastEntry>, GatewayError> {
        let location = require_location(location)?;
        tracing::debug!(location, "serving sample forecast");
        Ok(daily_forecast(sample_forecast(Utc::now())))
    }
}

fn category(id: u16, group: &str, description: &str, icon: &str) -> WeatherCategory {
    WeatherCategory {
        id,
        group: group.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

fn at(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

/// A fixed New York observation relabelled with `location`.
///
/// The sky alternates between clear and few clouds depending on the name, so the
/// same city always looks the same.
pub fn sample_current(location: &str) -> CurrentConditions {
    let condition = if location.chars().count() % 2 == 0 {
        category(800, "Clear", "clear sky", "01d")
    } else {
        category(801, "Clouds", "few clouds", "02d")
    };

    CurrentConditions {
        location_name: location.to_string(),
        country: "US".to_string(),
        coordinates: Coordinates { lat: 40.7143, lon: -74.006 },
        conditions: vec![condition],
        temperature: Temperatures { current_c: 22.5, feels_like_c: 21.8, min_c: 20.3, max_c: 24.7 },
        humidity_pct: 53,
        pressure_hpa: 1015,
        visibility_m: 10_000,
        wind: Wind { speed_mps: 4.12, direction_deg: 240, gust_mps: None },
        cloud_cover_pct: 0,
        observed_at: at(1_627_040_400),
        sunrise: at(1_627_029_063),
        sunset: at(1_627_081_880),
        timezone_offset_s: -14_400,
    }
}

struct SampleDay {
    /// current, feels-like, min, max
    temps: [f64; 4],
    pressure_hpa: u32,
    humidity_pct: u8,
    /// id, group, description, icon
    condition: (u16, &'static str, &'static str, &'static str),
    wind_mps: f64,
    wind_deg: u16,
    visibility_m: u32,
    pop: f64,
}

const SAMPLE_DAYS: [SampleDay; 5] = [
    SampleDay {
        temps: [23.2, 22.8, 21.1, 25.6],
        pressure_hpa: 1014,
        humidity_pct: 55,
        condition: (800, "Clear", "clear sky", "01d"),
        wind_mps: 3.5,
        wind_deg: 230,
        visibility_m: 10_000,
        pop: 0.0,
    },
    SampleDay {
        temps: [25.8, 25.4, 23.2, 27.9],
        pressure_hpa: 1012,
        humidity_pct: 48,
        condition: (801, "Clouds", "few clouds", "02d"),
        wind_mps: 4.2,
        wind_deg: 245,
        visibility_m: 10_000,
        pop: 0.1,
    },
    SampleDay {
        temps: [24.3, 24.1, 22.5, 26.2],
        pressure_hpa: 1010,
        humidity_pct: 60,
        condition: (500, "Rain", "light rain", "10d"),
        wind_mps: 5.1,
        wind_deg: 260,
        visibility_m: 8_000,
        pop: 0.4,
    },
    SampleDay {
        temps: [22.1, 21.8, 20.5, 23.7],
        pressure_hpa: 1013,
        humidity_pct: 65,
        condition: (501, "Rain", "moderate rain", "10d"),
        wind_mps: 4.8,
        wind_deg: 270,
        visibility_m: 6_000,
        pop: 0.6,
    },
    SampleDay {
        temps: [21.5, 21.2, 19.8, 23.1],
        pressure_hpa: 1015,
        humidity_pct: 68,
        condition: (802, "Clouds", "scattered clouds", "03d"),
        wind_mps: 3.9,
        wind_deg: 250,
        visibility_m: 9_000,
        pop: 0.2,
    },
];

/// Five daily entries at `now` + 1..=5 days.
pub fn sample_forecast(now: DateTime<Utc>) -> Vec<DailyForecastEntry> {
    SAMPLE_DAYS
        .iter()
        .zip(1..)
        .map(|(day, offset)| {
            let [current_c, feels_like_c, min_c, max_c] = day.temps;
            let (id, group, description, icon) = day.condition;

            DailyForecastEntry {
                timestamp: now + Duration::days(offset),
                conditions: vec![category(id, group, description, icon)],
                temperature: Temperatures { current_c, feels_like_c, min_c, max_c },
                humidity_pct: day.humidity_pct,
                pressure_hpa: day.pressure_hpa,
                visibility_m: day.visibility_m,
                wind: Wind { speed_mps: day.wind_mps, direction_deg: day.wind_deg, gust_mps: None },
                cloud_cover_pct: 0,
                precipitation_probability: day.pop,
            }
        })
        .collect()
}
