use std::fmt;

use reqwest::StatusCode;

/// Which outbound request a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocode,
    Forecast,
    Geolocate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocode => "geocoding",
            Stage::Forecast => "forecast",
            Stage::Geolocate => "geolocation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse failure category shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Network,
    MalformedResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No match found for '{query}'")]
    NotFound { query: String },

    #[error("{stage} request could not complete: {source}")]
    Network {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} request failed with status {status}: {body}")]
    Status { stage: Stage, status: StatusCode, body: String },

    #[error("{stage} response was malformed: {reason}")]
    Malformed { stage: Stage, reason: String },
}

impl WeatherError {
    pub fn network(stage: Stage, source: reqwest::Error) -> Self {
        WeatherError::Network { stage, source }
    }

    pub fn malformed(stage: Stage, reason: impl fmt::Display) -> Self {
        WeatherError::Malformed { stage, reason: reason.to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::NotFound { .. } => ErrorKind::NotFound,
            WeatherError::Network { .. } | WeatherError::Status { .. } => ErrorKind::Network,
            WeatherError::Malformed { .. } => ErrorKind::MalformedResponse,
        }
    }

    /// Stage the failure happened in; a failed lookup is always a geocoding failure.
    pub fn stage(&self) -> Stage {
        match self {
            WeatherError::NotFound { .. } => Stage::Geocode,
            WeatherError::Network { stage, .. }
            | WeatherError::Status { stage, .. }
            | WeatherError::Malformed { stage, .. } => *stage,
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
