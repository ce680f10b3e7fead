//! Transient display state for one city at a time.
//!
//! Each search is tagged with the location it targets and a sequence number. Responses
//! for anything but the latest search are dropped instead of overwriting the display,
//! including late responses from an earlier search for the same city.

use crate::{
    error::GatewayError,
    model::{CurrentConditions, DailyForecastEntry},
};

pub const CURRENT_ERROR_MESSAGE: &str = "Failed to fetch weather data. Please try again.";
pub const FORECAST_ERROR_MESSAGE: &str = "Failed to fetch forecast data.";

/// Identifies the search a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub seq: u64,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Idle
    }
}

impl<T> Section<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Section::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// User-facing message of a failed section.
    pub fn failed(&self) -> Option<&str> {
        match self {
            Section::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// Response was for an older search and was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct DisplaySession {
    next_seq: u64,
    latest: Option<RequestTag>,
    current: Section<CurrentConditions>,
    forecast: Section<Vec<DailyForecastEntry>>,
}

impl DisplaySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search for `location`; both sections go to loading.
    pub fn begin(&mut self, location: &str) -> RequestTag {
        self.next_seq += 1;
        let tag = RequestTag { seq: self.next_seq, location: location.trim().to_string() };

        tracing::debug!(seq = tag.seq, location = %tag.location, "search started");
        self.latest = Some(tag.clone());
        self.current = Section::Loading;
        self.forecast = Section::Loading;

        tag
    }

    pub fn latest(&self) -> Option<&RequestTag> {
        self.latest.as_ref()
    }

    /// Location of the most recent search.
    pub fn location(&self) -> Option<&str> {
        self.latest.as_ref().map(|t| t.location.as_str())
    }

    pub fn current(&self) -> &Section<CurrentConditions> {
        &self.current
    }

    pub fn forecast(&self) -> &Section<Vec<DailyForecastEntry>> {
        &self.forecast
    }

    pub fn apply_current(
        &mut self,
        tag: &RequestTag,
        result: Result<CurrentConditions, GatewayError>,
    ) -> Applied {
        if !self.is_latest(tag) {
            return Applied::Stale;
        }

        self.current = match result {
            Ok(current) => Section::Ready(current),
            Err(err) => {
                tracing::warn!(location = %tag.location, error = %err, "current conditions failed");
                Section::Failed(CURRENT_ERROR_MESSAGE.to_string())
            }
        };
        Applied::Applied
    }

    pub fn apply_forecast(
        &mut self,
        tag: &RequestTag,
        result: Result<Vec<DailyForecastEntry>, GatewayError>,
    ) -> Applied {
        if !self.is_latest(tag) {
            return Applied::Stale;
        }

        self.forecast = match result {
            Ok(days) => Section::Ready(days),
            Err(err) => {
                tracing::warn!(location = %tag.location, error = %err, "forecast failed");
                Section::Failed(FORECAST_ERROR_MESSAGE.to_string())
            }
        };
        Applied::Applied
    }

    fn is_latest(&self, tag: &RequestTag) -> bool {
        let latest = self.latest.as_ref() == Some(tag);
        if !latest {
            tracing::warn!(
                seq = tag.seq,
                location = %tag.location,
                "discarding response for a superseded search"
            );
        }
        latest
    }
}
