use tracing::debug;

use crate::{
    Coordinate, DisplayRequest, WeatherObservation,
    error::WeatherError,
    provider::{ForecastProvider, Geocoder},
};

/// Resolver and fetcher composed into one lookup chain.
///
/// Holds no state between calls; every method issues fresh requests.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    forecast: Box<dyn ForecastProvider>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn Geocoder>, forecast: Box<dyn ForecastProvider>) -> Self {
        Self { geocoder, forecast }
    }

    pub async fn resolve(&self, place: &str) -> Result<Coordinate, WeatherError> {
        self.geocoder.resolve(place).await
    }

    pub async fn current(&self, coord: Coordinate) -> Result<WeatherObservation, WeatherError> {
        self.forecast.current(coord).await
    }

    /// Geocode `place`, then fetch the weather there. No forecast request is
    /// made when geocoding fails.
    pub async fn for_place(&self, place: &str) -> Result<DisplayRequest, WeatherError> {
        let coord = self.resolve(place).await?;
        debug!(place, %coord, "place resolved, fetching forecast");
        let observation = self.current(coord).await?;
        Ok(DisplayRequest::for_place(observation, place))
    }

    pub async fn for_coordinate(&self, coord: Coordinate) -> Result<DisplayRequest, WeatherError> {
        let observation = self.current(coord).await?;
        Ok(DisplayRequest::for_coordinate(observation, coord))
    }
}
