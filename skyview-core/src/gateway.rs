use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::{Config, ResolvedSource},
    error::GatewayError,
    gateway::{openweather::OpenWeatherGateway, sample::SampleGateway},
    model::{CurrentConditions, DailyForecastEntry},
};

pub mod openweather;
pub mod sample;

/// Source of current conditions and daily forecasts for a named location.
///
/// Every call is a single request/normalize/respond cycle: no caching, no retries.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn current_conditions(&self, location: &str) -> Result<CurrentConditions, GatewayError>;

    /// Up to five entries, one per UTC calendar date, ascending.
    async fn forecast(&self, location: &str) -> Result<Vec<DailyForecastEntry>, GatewayError>;
}

/// Construct the gateway selected by the config's data source.
pub fn gateway_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherGateway>> {
    let boxed: Box<dyn WeatherGateway> = match config.resolve_source()? {
        ResolvedSource::Live { api_key } => match &config.base_url {
            Some(base_url) => Box::new(OpenWeatherGateway::with_base_url(api_key, base_url)),
            None => Box::new(OpenWeatherGateway::new(api_key)),
        },
        ResolvedSource::Sample => Box::new(SampleGateway::new()),
    };

    tracing::info!(gateway = boxed.name(), "weather gateway selected");
    Ok(boxed)
}

/// Trimmed location, or `EmptyLocation` for blank input.
pub(crate) fn require_location(location: &str) -> Result<&str, GatewayError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(GatewayError::EmptyLocation);
    }
    Ok(location)
}
