use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::codes::{Condition, describe};

/// A point in decimal degrees. Values are passed to providers unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Latitude: {}, Longitude: {}", self.latitude, self.longitude)
    }
}

/// Current conditions at a single point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub weather_code: i64,
    pub wind_speed: f64,
    /// Provider timestamp of the observation, when it reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<NaiveDateTime>,
}

/// Everything a presenter needs to show one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRequest {
    pub observation: WeatherObservation,
    pub label: String,
}

impl DisplayRequest {
    /// Result for a place the user typed; the label is the place name as given.
    pub fn for_place(observation: WeatherObservation, place: &str) -> Self {
        Self { observation, label: place.to_string() }
    }

    /// Result for a raw coordinate; the label spells out latitude and longitude.
    pub fn for_coordinate(observation: WeatherObservation, coord: Coordinate) -> Self {
        Self { observation, label: coord.to_string() }
    }

    pub fn condition(&self) -> Condition {
        describe(self.observation.weather_code)
    }
}
