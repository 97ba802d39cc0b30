use std::io::{self, Write};

use nowcast_core::{DisplayRequest, Notice, Presenter};
use serde_json::json;

/// Writes results to `out` and notices to `err`.
///
/// Write failures are kept and reported by [`TerminalPresenter::finish`]
/// since the [`Presenter`] methods cannot return them.
pub struct TerminalPresenter<O: Write, E: Write> {
    out: O,
    err: E,
    json: bool,
    asked_for_city: bool,
    io_error: Option<io::Error>,
}

impl<O: Write, E: Write> TerminalPresenter<O, E> {
    pub fn new(out: O, err: E, json: bool) -> Self {
        Self { out, err, json, asked_for_city: false, io_error: None }
    }

    /// Whether a notice told the user to type a city instead.
    pub fn asked_for_city(&self) -> bool {
        self.asked_for_city
    }

    pub fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.io_error.take() {
            return Err(e);
        }
        self.out.flush()?;
        self.err.flush()
    }

    fn write_text(&mut self, request: &DisplayRequest) -> io::Result<()> {
        let condition = request.condition();
        let obs = &request.observation;

        writeln!(self.out, "Current Weather for {}", request.label)?;
        writeln!(self.out, "Description: {}", condition.description)?;
        writeln!(self.out, "Temperature: {} °C", obs.temperature_c)?;
        writeln!(self.out, "Wind Speed: {} m/s", obs.wind_speed)?;
        writeln!(self.out, "Icon: {}", condition.icon)?;
        writeln!(self.out, "Animation: {}", condition.animation)?;
        if let Some(at) = obs.observed_at {
            writeln!(self.out, "Observed: {}", at.format("%Y-%m-%d %H:%M"))?;
        }
        Ok(())
    }

    fn write_json(&mut self, request: &DisplayRequest) -> io::Result<()> {
        let view = json!({
            "label": request.label,
            "observation": request.observation,
            "condition": request.condition(),
        });
        serde_json::to_writer_pretty(&mut self.out, &view)?;
        writeln!(self.out)
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.io_error.get_or_insert(e);
        }
    }
}

impl<O: Write, E: Write> Presenter for TerminalPresenter<O, E> {
    fn render(&mut self, request: &DisplayRequest) {
        let result = if self.json { self.write_json(request) } else { self.write_text(request) };
        self.keep(result);
    }

    fn notify(&mut self, notice: &Notice) {
        if matches!(notice, Notice::GeolocationFailed(_) | Notice::GeolocationUnsupported) {
            self.asked_for_city = true;
        }
        let result = writeln!(self.err, "{notice}");
        self.keep(result);
    }
}
