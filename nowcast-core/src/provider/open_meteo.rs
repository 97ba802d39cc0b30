use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    Coordinate, WeatherObservation,
    error::{Stage, WeatherError},
    provider::{ForecastProvider, fetch_json},
};

pub const DEFAULT_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Current-conditions lookup against the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { url: url.into(), http }
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    weathercode: i64,
    windspeed: f64,
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn current(&self, coord: Coordinate) -> Result<WeatherObservation, WeatherError> {
        debug!(latitude = coord.latitude, longitude = coord.longitude, "fetching current weather");

        let request = self.http.get(&self.url).query(&[
            ("latitude", coord.latitude.to_string()),
            ("longitude", coord.longitude.to_string()),
            ("current_weather", "true".to_string()),
        ]);

        let parsed: OmResponse = fetch_json(request, Stage::Forecast).await?;
        let current = parsed.current_weather;

        Ok(WeatherObservation {
            temperature_c: current.temperature,
            weather_code: current.weathercode,
            wind_speed: current.windspeed,
            observed_at: current.time.as_deref().and_then(parse_time),
        })
    }
}

/// Open-Meteo reports `2024-01-01T12:00`, without seconds or offset.
fn parse_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .inspect_err(|e| warn!(raw, error = %e, "ignoring unparseable observation time"))
        .ok()
}
