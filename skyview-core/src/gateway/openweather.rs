use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::GatewayError,
    forecast::daily_forecast,
    model::{
        Coordinates, CurrentConditions, DailyForecastEntry, Temperatures, WeatherCategory, Wind,
    },
};

use super::{WeatherGateway, require_location};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Live gateway backed by the OpenWeatherMap 2.5 API, metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherGateway {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherGateway {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// GET `{base}/{endpoint}` for a location and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &str,
    ) -> Result<T, GatewayError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, location, "requesting OpenWeather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", location),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(GatewayError::Network)?;

        let status = res.status();

        if !status.is_success() {
            // the status alone decides; an unreadable error body is reported as empty
            let body = res.text().await.unwrap_or_default();
            tracing::debug!(%status, endpoint, location, "OpenWeather request failed");
            return Err(GatewayError::Provider { status, body: truncate_body(&body) });
        }

        let body = res.text().await.map_err(GatewayError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn current_conditions(&self, location: &str) -> Result<CurrentConditions, GatewayError> {
        let location = require_location(location)?;
        let parsed: OwCurrentResponse = self.fetch("weather", location).await?;

        let current = parsed.into_current()?;
        current.validate()?;

        Ok(current)
    }

    async fn forecast(&self, location: &str) -> Result<Vec<DailyForecastEntry>, GatewayError> {
        let location = require_location(location)?;
        let parsed: OwForecastResponse = self.fetch("forecast", location).await?;

        let intervals = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        let interval_count = intervals.len();

        let daily = daily_forecast(intervals);
        for entry in &daily {
            entry.validate()?;
        }

        tracing::debug!(
            location,
            intervals = interval_count,
            days = daily.len(),
            "forecast normalized"
        );
        Ok(daily)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lon: f64,
    lat: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
    gust: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    weather: Vec<OwWeather>,
    main: OwMain,
    #[serde(default)]
    visibility: u32,
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    dt: i64,
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    #[serde(default)]
    visibility: u32,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwWeather> for WeatherCategory {
    fn from(w: OwWeather) -> Self {
        WeatherCategory { id: w.id, group: w.main, description: w.description, icon: w.icon }
    }
}

impl From<&OwMain> for Temperatures {
    fn from(m: &OwMain) -> Self {
        Temperatures {
            current_c: m.temp,
            feels_like_c: m.feels_like,
            min_c: m.temp_min,
            max_c: m.temp_max,
        }
    }
}

impl From<OwWind> for Wind {
    fn from(w: OwWind) -> Self {
        Wind { speed_mps: w.speed, direction_deg: w.deg, gust_mps: w.gust }
    }
}

impl OwCurrentResponse {
    fn into_current(self) -> Result<CurrentConditions, GatewayError> {
        Ok(CurrentConditions {
            location_name: self.name,
            country: self.sys.country,
            coordinates: Coordinates { lat: self.coord.lat, lon: self.coord.lon },
            conditions: self.weather.into_iter().map(WeatherCategory::from).collect(),
            temperature: Temperatures::from(&self.main),
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            wind: self.wind.into(),
            cloud_cover_pct: self.clouds.all,
            observed_at: unix_to_utc(self.dt)?,
            sunrise: unix_to_utc(self.sys.sunrise)?,
            sunset: unix_to_utc(self.sys.sunset)?,
            timezone_offset_s: self.timezone,
        })
    }
}

impl OwForecastEntry {
    fn into_entry(self) -> Result<DailyForecastEntry, GatewayError> {
        Ok(DailyForecastEntry {
            timestamp: unix_to_utc(self.dt)?,
            conditions: self.weather.into_iter().map(WeatherCategory::from).collect(),
            temperature: Temperatures::from(&self.main),
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            wind: self.wind.into(),
            cloud_cover_pct: self.clouds.all,
            precipitation_probability: self.pop,
        })
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, GatewayError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| GatewayError::InvalidData(format!("timestamp {ts} is out of range")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::utc;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_body() -> Value {
        json!({
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "base": "stations",
            "main": {
                "temp": 12.3, "feels_like": 11.6, "temp_min": 10.9, "temp_max": 13.4,
                "pressure": 1008, "humidity": 81
            },
            "visibility": 9000,
            "wind": {"speed": 5.66, "deg": 230, "gust": 9.3},
            "clouds": {"all": 75},
            "dt": 1704110400,
            "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1704096350, "sunset": 1704124745},
            "timezone": 0,
            "id": 2643743,
            "name": "London",
            "cod": 200
        })
    }

    fn interval(dt: i64, id: u16, main: &str) -> Value {
        json!({
            "dt": dt,
            "main": {
                "temp": 8.0, "feels_like": 6.5, "temp_min": 7.1, "temp_max": 8.4,
                "pressure": 1011, "humidity": 77
            },
            "weather": [{"id": id, "main": main, "description": main.to_lowercase(), "icon": "04d"}],
            "clouds": {"all": 90},
            "wind": {"speed": 4.1, "deg": 250},
            "visibility": 10000,
            "pop": 0.32,
            "sys": {"pod": "d"},
            "dt_txt": "ignored"
        })
    }

    fn forecast_body(list: Vec<Value>) -> Value {
        json!({
            "cod": "200",
            "message": 0,
            "cnt": list.len(),
            "list": list,
            "city": {"id": 2643743, "name": "London", "country": "GB", "timezone": 0}
        })
    }

    fn gateway_for(server: &MockServer) -> OpenWeatherGateway {
        OpenWeatherGateway::with_base_url("TEST_KEY".into(), &server.uri())
    }

    #[tokio::test]
    async fn current_conditions_are_decoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "TEST_KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let current = gateway_for(&server).current_conditions("London").await.unwrap();

        assert_eq!(current.location_name, "London");
        assert_eq!(current.country, "GB");
        assert_eq!(current.primary().map(|c| c.id), Some(500));
        assert_eq!(current.temperature.current_c, 12.3);
        assert_eq!(current.humidity_pct, 81);
        assert_eq!(current.visibility_m, 9000);
        assert_eq!(current.wind.gust_mps, Some(9.3));
        assert_eq!(current.observed_at, utc(2024, 1, 1, 12, 0));
    }

    #[tokio::test]
    async fn non_success_status_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let err = gateway_for(&server).current_conditions("Atlantis").await.unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("city not found"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_network_error() {
        // port 1 is reserved and nothing listens on it
        let gateway = OpenWeatherGateway::with_base_url("KEY".into(), "http://127.0.0.1:1");

        let err = gateway.forecast("London").await.unwrap_err();
        assert!(err.is_network(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn blank_location_never_hits_the_provider() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = gateway_for(&server).current_conditions("  ").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyLocation));
    }

    #[tokio::test]
    async fn empty_weather_list_is_invalid_data() {
        let server = MockServer::start().await;
        let mut body = current_body();
        body["weather"] = json!([]);

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = gateway_for(&server).current_conditions("London").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidData(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).current_conditions("London").await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn forecast_keeps_first_interval_per_day() {
        let server = MockServer::start().await;

        // 2024-01-01T00:00, 03:00, 2024-01-02T00:00, 03:00, 2024-01-03T12:00
        let list = vec![
            interval(1704067200, 800, "Clear"),
            interval(1704078000, 500, "Rain"),
            interval(1704153600, 801, "Clouds"),
            interval(1704164400, 500, "Rain"),
            interval(1704283200, 600, "Snow"),
        ];

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(list)))
            .mount(&server)
            .await;

        let daily = gateway_for(&server).forecast("London").await.unwrap();

        let stamps: Vec<_> = daily.iter().map(|d| d.timestamp).collect();
        assert_eq!(
            stamps,
            vec![utc(2024, 1, 1, 0, 0), utc(2024, 1, 2, 0, 0), utc(2024, 1, 3, 12, 0)]
        );
        let ids: Vec<_> = daily.iter().filter_map(|d| d.primary()).map(|c| c.id).collect();
        assert_eq!(ids, vec![800, 801, 600]);
        assert_eq!(daily[0].precipitation_probability, 0.32);
    }

    #[tokio::test]
    async fn empty_forecast_list_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(Vec::new())))
            .mount(&server)
            .await;

        let daily = gateway_for(&server).forecast("London").await.unwrap();
        assert!(daily.is_empty());
    }

    #[tokio::test]
    async fn forecast_provider_error_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).forecast("London").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn non_success_status_without_body_is_still_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = gateway_for(&server).current_conditions("London").await.unwrap_err();

        assert!(!err.is_network());
        assert!(matches!(
            err,
            GatewayError::Provider { status, ref body }
                if status == reqwest::StatusCode::SERVICE_UNAVAILABLE && body.is_empty()
        ));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
