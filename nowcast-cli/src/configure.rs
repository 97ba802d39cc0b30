use anyhow::{Context, Result};
use inquire::{Confirm, Text, validator::Validation};
use nowcast_core::Config;

/// Walk through the config file interactively and save it.
pub fn run() -> Result<()> {
    let mut cfg = Config::load()?;

    cfg.user_agent = Text::new("User-Agent sent with requests:")
        .with_default(&cfg.user_agent)
        .with_help_message("Nominatim asks for an identifying agent, ideally with contact details")
        .prompt()
        .context("Failed to read user agent")?;

    let timeout = Text::new("Request timeout in seconds (empty for none):")
        .with_initial_value(&cfg.timeout_secs.map(|s| s.to_string()).unwrap_or_default())
        .with_validator(|input: &str| {
            Ok(match parse_timeout(input) {
                Ok(_) => Validation::Valid,
                Err(msg) => Validation::Invalid(msg.into()),
            })
        })
        .prompt()
        .context("Failed to read timeout")?;
    cfg.timeout_secs = parse_timeout(&timeout).map_err(anyhow::Error::msg)?;

    cfg.detailed_errors = Confirm::new("Show the cause when weather is not available?")
        .with_default(cfg.detailed_errors)
        .prompt()
        .context("Failed to read detailed_errors")?;

    cfg.geolocation = Confirm::new("Allow IP-based geolocation for `nowcast here`?")
        .with_default(cfg.geolocation)
        .prompt()
        .context("Failed to read geolocation")?;

    cfg.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

fn parse_timeout(input: &str) -> Result<Option<u64>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<u64>() {
        Ok(0) => Err("Timeout must be at least one second".to_string()),
        Ok(secs) => Ok(Some(secs)),
        Err(_) => Err(format!("'{input}' is not a whole number of seconds")),
    }
}
