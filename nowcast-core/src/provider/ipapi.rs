use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    Coordinate,
    error::{Stage, WeatherError},
    provider::{Geolocator, fetch_json},
};

pub const DEFAULT_URL: &str = "https://ipapi.co/json/";

/// Approximate location from the public IP address.
#[derive(Debug, Clone)]
pub struct IpApiGeolocator {
    url: String,
    http: Client,
}

impl IpApiGeolocator {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { url: url.into(), http }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
}

#[async_trait]
impl Geolocator for IpApiGeolocator {
    async fn locate(&self) -> Result<Coordinate, WeatherError> {
        let parsed: IpApiResponse = fetch_json(self.http.get(&self.url), Stage::Geolocate).await?;

        match (parsed.latitude, parsed.longitude) {
            (Some(latitude), Some(longitude)) => {
                debug!(latitude, longitude, city = ?parsed.city, "located by ip address");
                Ok(Coordinate { latitude, longitude })
            }
            _ => Err(WeatherError::malformed(Stage::Geolocate, "response has no latitude/longitude")),
        }
    }
}
