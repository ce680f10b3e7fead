//! Core library for the `skyview` weather display.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather gateway (live OpenWeatherMap data or placeholder data)
//! - Normalization of interval forecasts into one entry per day
//! - Presentation logic: category treatments, color schemes, theme and display state
//!
//! It is used by `skyview-cli`, but has no terminal dependencies of its own.

pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod gateway;
pub mod model;
pub mod session;
pub mod suggest;
pub mod theme;
pub mod treatment;

pub use config::{Config, DataSource, ResolvedSource};
pub use error::GatewayError;
pub use forecast::{FORECAST_DAYS, daily_forecast};
pub use gateway::{WeatherGateway, gateway_from_config};
pub use model::{CurrentConditions, DailyForecastEntry, WeatherCategory};
pub use session::{Applied, DisplaySession, RequestTag, Section};
pub use theme::{Palette, Scheme, ThemeContext, ThemeMode};
pub use treatment::{Icon, Treatment};
