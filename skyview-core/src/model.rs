use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Lowest and highest temperature (°C) accepted from the provider.
pub const MIN_PLAUSIBLE_C: f64 = -100.0;
pub const MAX_PLAUSIBLE_C: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One provider weather category, e.g. `800 / Clear / clear sky / 01d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCategory {
    pub id: u16,
    pub group: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub current_c: f64,
    pub feels_like_c: f64,
    pub min_c: f64,
    pub max_c: f64,
}

impl Temperatures {
    fn validate(&self) -> Result<(), GatewayError> {
        let values = [
            ("temperature", self.current_c),
            ("feels-like temperature", self.feels_like_c),
            ("minimum temperature", self.min_c),
            ("maximum temperature", self.max_c),
        ];

        for (what, value) in values {
            if !value.is_finite() || !(MIN_PLAUSIBLE_C..=MAX_PLAUSIBLE_C).contains(&value) {
                return Err(GatewayError::InvalidData(format!(
                    "{what} {value} °C is outside the plausible range"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed_mps: f64,
    pub direction_deg: u16,
    pub gust_mps: Option<f64>,
}

/// Latest observation for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    pub coordinates: Coordinates,
    /// Never empty; the first entry is the primary condition.
    pub conditions: Vec<WeatherCategory>,
    pub temperature: Temperatures,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub wind: Wind,
    pub cloud_cover_pct: u8,
    pub observed_at: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// Shift from UTC in seconds.
    pub timezone_offset_s: i32,
}

impl CurrentConditions {
    /// Primary condition; always present once `validate` has passed.
    pub fn primary(&self) -> Option<&WeatherCategory> {
        self.conditions.first()
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        validate_conditions(&self.conditions)?;
        self.temperature.validate()
    }
}

/// One forecast interval, picked as the representative of its calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub conditions: Vec<WeatherCategory>,
    pub temperature: Temperatures,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub wind: Wind,
    pub cloud_cover_pct: u8,
    /// Probability of precipitation in `[0, 1]`.
    pub precipitation_probability: f64,
}

impl DailyForecastEntry {
    pub fn primary(&self) -> Option<&WeatherCategory> {
        self.conditions.first()
    }

    /// UTC calendar date the entry belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        validate_conditions(&self.conditions)?;
        self.temperature.validate()?;

        if !(0.0..=1.0).contains(&self.precipitation_probability) {
            return Err(GatewayError::InvalidData(format!(
                "precipitation probability {} is outside [0, 1]",
                self.precipitation_probability
            )));
        }

        Ok(())
    }
}

fn validate_conditions(conditions: &[WeatherCategory]) -> Result<(), GatewayError> {
    if conditions.is_empty() {
        return Err(GatewayError::InvalidData("weather category list is empty".into()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn category(id: u16, group: &str, description: &str) -> WeatherCategory {
        WeatherCategory {
            id,
            group: group.into(),
            description: description.into(),
            icon: "01d".into(),
        }
    }

    pub fn temperatures(current_c: f64) -> Temperatures {
        Temperatures {
            current_c,
            feels_like_c: current_c - 0.5,
            min_c: current_c - 2.0,
            max_c: current_c + 2.0,
        }
    }

    pub fn entry_at(timestamp: DateTime<Utc>) -> DailyForecastEntry {
        DailyForecastEntry {
            timestamp,
            conditions: vec![category(800, "Clear", "clear sky")],
            temperature: temperatures(20.0),
            humidity_pct: 50,
            pressure_hpa: 1013,
            visibility_m: 10_000,
            wind: Wind { speed_mps: 3.0, direction_deg: 180, gust_mps: None },
            cloud_cover_pct: 0,
            precipitation_probability: 0.0,
        }
    }

    pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().expect("valid test timestamp")
    }
}
