use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    WeatherService,
    provider::{
        Geolocator,
        ipapi::{self, IpApiGeolocator},
        nominatim::{self, NominatimGeocoder},
        open_meteo::{self, OpenMeteoProvider},
    },
    trigger::TriggerOptions,
};

pub const DEFAULT_USER_AGENT: &str =
    concat!("nowcast/", env!("CARGO_PKG_VERSION"), " (+https://github.com/nowcast/nowcast)");

/// Base URLs of the services nowcast talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocode: String,
    pub forecast: String,
    pub geolocate: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode: nominatim::DEFAULT_URL.to_string(),
            forecast: open_meteo::DEFAULT_URL.to_string(),
            geolocate: ipapi::DEFAULT_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// detailed_errors = true
/// timeout_secs = 10
///
/// [endpoints]
/// forecast = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sent with every request; Nominatim refuses clients without one.
    pub user_agent: String,

    /// Per-request timeout. Unset means the HTTP client default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Include the failure cause in "not available" messages.
    pub detailed_errors: bool,

    /// Allow IP-based geolocation for `nowcast here`.
    pub geolocation: bool,

    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            detailed_errors: false,
            geolocation: true,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nowcast", "nowcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn trigger_options(&self) -> TriggerOptions {
        TriggerOptions { detailed_errors: self.detailed_errors }
    }

    /// Build the shared HTTP client all providers use.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().context("Failed to build HTTP client")
    }
}

/// Construct the geocode → forecast service from config.
pub fn service_from_config(config: &Config, http: &Client) -> WeatherService {
    WeatherService::new(
        Box::new(NominatimGeocoder::new(http.clone(), &config.endpoints.geocode)),
        Box::new(OpenMeteoProvider::new(http.clone(), &config.endpoints.forecast)),
    )
}

/// Construct the geolocator, or `None` when geolocation is disabled.
pub fn geolocator_from_config(config: &Config, http: &Client) -> Option<Box<dyn Geolocator>> {
    if !config.geolocation {
        return None;
    }
    Some(Box::new(IpApiGeolocator::new(http.clone(), &config.endpoints.geolocate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml("").expect("empty config parses");
        assert_eq!(cfg, Config::default());
        assert!(cfg.geolocation);
        assert!(!cfg.detailed_errors);
        assert_eq!(cfg.endpoints.geocode, nominatim::DEFAULT_URL);
    }

    #[test]
    fn partial_endpoints_keep_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            detailed_errors = true
            timeout_secs = 5

            [endpoints]
            forecast = "http://localhost:8080/v1/forecast"
            "#,
        )
        .expect("config parses");

        assert!(cfg.detailed_errors);
        assert_eq!(cfg.timeout_secs, Some(5));
        assert_eq!(cfg.endpoints.forecast, "http://localhost:8080/v1/forecast");
        assert_eq!(cfg.endpoints.geocode, nominatim::DEFAULT_URL);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn unknown_types_are_rejected() {
        let err = Config::from_toml("geolocation = \"sometimes\"").unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn geolocator_absent_when_disabled() {
        let cfg = Config { geolocation: false, ..Config::default() };
        let http = cfg.http_client().expect("client builds");
        assert!(geolocator_from_config(&cfg, &http).is_none());

        let enabled = Config::default();
        assert!(geolocator_from_config(&enabled, &http).is_some());
    }

    #[test]
    fn trigger_options_follow_detailed_errors() {
        let cfg = Config { detailed_errors: true, ..Config::default() };
        assert!(cfg.trigger_options().detailed_errors);
    }
}
