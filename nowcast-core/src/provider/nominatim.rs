use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    Coordinate,
    error::{Stage, WeatherError},
    provider::{Geocoder, fetch_json},
};

pub const DEFAULT_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Forward geocoding against a Nominatim `search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { url: url.into(), http }
    }
}

// Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, place: &str) -> Result<Coordinate, WeatherError> {
        debug!(place, url = %self.url, "geocoding place");

        let request =
            self.http.get(&self.url).query(&[("city", place), ("format", "json"), ("limit", "1")]);

        let places: Vec<NmPlace> = fetch_json(request, Stage::Geocode).await?;

        let first = places
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound { query: place.to_string() })?;

        let latitude = parse_degrees(&first.lat, "lat")?;
        let longitude = parse_degrees(&first.lon, "lon")?;

        debug!(place, latitude, longitude, "resolved place");
        Ok(Coordinate { latitude, longitude })
    }
}

fn parse_degrees(raw: &str, field: &str) -> Result<f64, WeatherError> {
    raw.trim().parse::<f64>().map_err(|e| {
        WeatherError::malformed(Stage::Geocode, format!("field '{field}' is not a number ({raw:?}): {e}"))
    })
}
