use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::{
    Coordinate, WeatherObservation,
    error::{Stage, WeatherError, truncate_body},
};

pub mod ipapi;
pub mod nominatim;
pub mod open_meteo;

/// Resolves a free-text place name to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, place: &str) -> Result<Coordinate, WeatherError>;
}

/// Fetches current conditions at a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn current(&self, coord: Coordinate) -> Result<WeatherObservation, WeatherError>;
}

/// Determines where this machine is.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinate, WeatherError>;
}

/// Send a prepared GET and decode its JSON body.
///
/// The body is read as text first so a transport failure, a non-2xx status and
/// an undecodable payload each map to their own error variant.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    stage: Stage,
) -> Result<T, WeatherError> {
    let res = request.send().await.map_err(|e| WeatherError::network(stage, e))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| WeatherError::network(stage, e))?;

    if !status.is_success() {
        return Err(WeatherError::Status { stage, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::malformed(stage, e))
}
