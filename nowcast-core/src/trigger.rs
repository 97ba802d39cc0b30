//! Entry points that start a lookup and report its result.
//!
//! Each entry point ends in exactly one call on the [`Presenter`]: either a
//! render of a complete result or a single [`Notice`]. Nothing is partially
//! rendered.

use std::fmt;

use tracing::warn;

use crate::{
    Coordinate, DisplayRequest, WeatherService,
    error::WeatherError,
    provider::Geolocator,
};

/// Output boundary. Owns everything the user sees.
pub trait Presenter {
    fn render(&mut self, request: &DisplayRequest);
    fn notify(&mut self, notice: &Notice);
}

/// What the user should do after a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    AnotherPlace,
    TryAgain,
}

#[derive(Debug)]
pub enum Notice {
    EmptyInput,
    GeolocationUnsupported,
    GeolocationFailed(WeatherError),
    /// The lookup failed. `detailed` asks for the cause to be included.
    Unavailable { retry: Retry, error: WeatherError, detailed: bool },
}

impl Notice {
    pub fn error(&self) -> Option<&WeatherError> {
        match self {
            Notice::GeolocationFailed(error) | Notice::Unavailable { error, .. } => Some(error),
            Notice::EmptyInput | Notice::GeolocationUnsupported => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyInput => {
                f.write_str("Please enter a city name or allow location access for auto-location.")
            }
            Notice::GeolocationUnsupported => {
                f.write_str("Geolocation is not supported in this environment.")
            }
            Notice::GeolocationFailed(_) => {
                f.write_str("Unable to retrieve your location. Please enter a city manually.")
            }
            Notice::Unavailable { retry, error, detailed } => {
                f.write_str("Weather information not available.")?;
                if *detailed {
                    write!(f, " ({error})")?;
                }
                match retry {
                    Retry::AnotherPlace => f.write_str(" Please try another city."),
                    Retry::TryAgain => f.write_str(" Please try again."),
                }
            }
        }
    }
}

/// How an entry point finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    Notified,
}

/// Behaviour knobs for the entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerOptions {
    pub detailed_errors: bool,
}

/// Manual entry: look up the weather for a typed place name.
pub async fn submit(
    service: &WeatherService,
    input: &str,
    options: TriggerOptions,
    presenter: &mut dyn Presenter,
) -> Outcome {
    let place = input.trim();
    if place.is_empty() {
        presenter.notify(&Notice::EmptyInput);
        return Outcome::Notified;
    }

    let result = service.for_place(place).await;
    finish(result, Retry::AnotherPlace, options, presenter)
}

/// Automatic entry: locate this machine, then look up its weather.
///
/// `None` means no geolocation is available at all.
pub async fn locate(
    service: &WeatherService,
    geolocator: Option<&dyn Geolocator>,
    options: TriggerOptions,
    presenter: &mut dyn Presenter,
) -> Outcome {
    let Some(geolocator) = geolocator else {
        presenter.notify(&Notice::GeolocationUnsupported);
        return Outcome::Notified;
    };

    match geolocator.locate().await {
        Ok(coord) => at_coordinate(service, coord, options, presenter).await,
        Err(err) => {
            warn!(error = %err, "geolocation failed");
            presenter.notify(&Notice::GeolocationFailed(err));
            Outcome::Notified
        }
    }
}

/// Look up the weather at a known coordinate, skipping geocoding.
pub async fn at_coordinate(
    service: &WeatherService,
    coord: Coordinate,
    options: TriggerOptions,
    presenter: &mut dyn Presenter,
) -> Outcome {
    let result = service.for_coordinate(coord).await;
    finish(result, Retry::TryAgain, options, presenter)
}

fn finish(
    result: Result<DisplayRequest, WeatherError>,
    retry: Retry,
    options: TriggerOptions,
    presenter: &mut dyn Presenter,
) -> Outcome {
    match result {
        Ok(request) => {
            presenter.render(&request);
            Outcome::Rendered
        }
        Err(error) => {
            warn!(error = %error, stage = %error.stage(), kind = ?error.kind(), "weather lookup failed");
            presenter.notify(&Notice::Unavailable { retry, error, detailed: options.detailed_errors });
            Outcome::Notified
        }
    }
}
