use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use nowcast_core::{
    Config, Coordinate, Geolocator, Outcome, TriggerOptions, WeatherService,
    geolocator_from_config, service_from_config, trigger,
};
use tracing::debug;

use crate::{configure, render::TerminalPresenter};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nowcast", version, about = "Current weather for a place or your location")]
pub struct Cli {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging for nowcast itself (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name; several words are joined with spaces.
        place: Vec<String>,
    },

    /// Show current weather where you are.
    Here {
        /// Latitude in decimal degrees; skips IP geolocation.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Interactively edit the configuration file.
    Configure,

    /// Print the configuration file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure::run()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { place } => {
                let session = Session::new(self.json)?;
                let outcome = session.show(&place.join(" ")).await?;
                Ok(exit_code(outcome))
            }
            Command::Here { lat, lon } => {
                let session = Session::new(self.json)?;
                let outcome = match lat.zip(lon) {
                    Some((latitude, longitude)) => {
                        session.at(Coordinate::new(latitude, longitude)).await?
                    }
                    None => session.here().await?,
                };
                Ok(exit_code(outcome))
            }
        }
    }
}

/// Per-invocation wiring: config, providers and output.
struct Session {
    config: Config,
    service: WeatherService,
    geolocator: Option<Box<dyn Geolocator>>,
    json: bool,
}

impl Session {
    fn new(json: bool) -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        let http = config.http_client()?;
        let service = service_from_config(&config, &http);
        let geolocator = geolocator_from_config(&config, &http);
        debug!(?config, "loaded configuration");
        Ok(Self { config, service, geolocator, json })
    }

    fn options(&self) -> TriggerOptions {
        self.config.trigger_options()
    }

    fn presenter(&self) -> TerminalPresenter<io::Stdout, io::Stderr> {
        TerminalPresenter::new(io::stdout(), io::stderr(), self.json)
    }

    async fn show(&self, place: &str) -> anyhow::Result<Outcome> {
        let mut presenter = self.presenter();
        let outcome = trigger::submit(&self.service, place, self.options(), &mut presenter).await;
        presenter.finish()?;
        Ok(outcome)
    }

    async fn at(&self, coord: Coordinate) -> anyhow::Result<Outcome> {
        let mut presenter = self.presenter();
        let outcome = trigger::at_coordinate(&self.service, coord, self.options(), &mut presenter).await;
        presenter.finish()?;
        Ok(outcome)
    }

    /// Geolocate, falling back to asking for a city on an interactive terminal.
    async fn here(&self) -> anyhow::Result<Outcome> {
        let mut presenter = self.presenter();
        let outcome =
            trigger::locate(&self.service, self.geolocator.as_deref(), self.options(), &mut presenter)
                .await;
        let wants_city = presenter.asked_for_city();
        presenter.finish()?;

        if outcome == Outcome::Rendered || !wants_city || !io::stdin().is_terminal() {
            return Ok(outcome);
        }

        let place = inquire::Text::new("City:").prompt().context("Failed to read city name")?;
        self.show(&place).await
    }
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Rendered => ExitCode::SUCCESS,
        Outcome::Notified => ExitCode::FAILURE,
    }
}
