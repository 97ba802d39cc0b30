//! Core library for the `nowcast` CLI.
//!
//! This crate defines:
//! - Place-name geocoding and current-weather lookup (Nominatim, Open-Meteo)
//! - The static weather-code → description/icon/animation table
//! - Trigger entry points that end in a [`trigger::Presenter`] call
//! - Configuration handling
//!
//! Rendering is left to the caller; nothing here writes to the terminal.

pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod trigger;

pub use codes::{Animation, Condition, Icon, describe};
pub use config::{Config, Endpoints, geolocator_from_config, service_from_config};
pub use error::{ErrorKind, Stage, WeatherError};
pub use model::{Coordinate, DisplayRequest, WeatherObservation};
pub use provider::{ForecastProvider, Geocoder, Geolocator};
pub use service::WeatherService;
pub use trigger::{Notice, Outcome, Presenter, Retry, TriggerOptions};
