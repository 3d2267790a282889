//! Display surfaces.
//!
//! The pipeline talks to the screen only through [`Renderer`], so it can run
//! against the terminal or against a recording stub in tests.

use std::io::Write;

use parking_lot::Mutex;

use crate::clock::ClockReading;
use crate::models::{PipelineState, WeatherView};

/// A surface the weather pipeline draws on.
pub trait Renderer: Send + Sync {
    /// Show or hide the loading indicator.
    fn set_loading(&self, loading: bool);

    /// Replace the displayed forecast.
    fn render(&self, view: &WeatherView);

    /// Show the error banner.
    fn show_error(&self, message: &str);

    /// Hide the error banner.
    fn hide_error(&self);

    /// Update the clock display.
    fn show_time(&self, _reading: &ClockReading) {}

    /// Observe pipeline state transitions.
    fn state_changed(&self, _state: PipelineState) {}
}

struct TerminalState<W> {
    out: W,
    clock: Option<ClockReading>,
    error: Option<String>,
}

/// Plain-text renderer writing to a terminal (or any `Write`).
///
/// The clock is a header snapshot: ticks only record the latest reading,
/// which is printed above the next rendered forecast. Nothing is redrawn
/// per tick, so typed input is never interleaved with clock output.
pub struct TerminalRenderer<W: Write + Send> {
    state: Mutex<TerminalState<W>>,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                out,
                clock: None,
                error: None,
            }),
        }
    }

    /// Currently displayed error banner, if any.
    pub fn current_error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Consume the renderer and return its writer.
    pub fn into_inner(self) -> W {
        self.state.into_inner().out
    }

    fn write_with<F>(&self, f: F)
    where
        F: FnOnce(&mut TerminalState<W>) -> std::io::Result<()>,
    {
        let mut state = self.state.lock();
        if let Err(e) = f(&mut *state).and_then(|_| state.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn set_loading(&self, loading: bool) {
        if loading {
            self.write_with(|state| writeln!(state.out, "Loading..."));
        }
    }

    fn render(&self, view: &WeatherView) {
        self.write_with(|state| write_view(&mut state.out, view, state.clock.as_ref()));
    }

    fn show_error(&self, message: &str) {
        self.write_with(|state| {
            state.error = Some(message.to_string());
            writeln!(state.out, "! {}", message)
        });
    }

    fn hide_error(&self) {
        self.state.lock().error = None;
    }

    /// Record the reading for the next forecast header; writes nothing.
    fn show_time(&self, reading: &ClockReading) {
        self.state.lock().clock = Some(reading.clone());
    }
}

fn write_view<W: Write>(
    out: &mut W,
    view: &WeatherView,
    clock: Option<&ClockReading>,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", view.location_name)?;
    if let Some(clock) = clock {
        writeln!(out, "{}  {}", clock.date, clock.time)?;
    }

    let current = &view.current;
    writeln!(
        out,
        "{}  {}  {}",
        current.condition_icon, current.temperature, current.condition
    )?;
    writeln!(
        out,
        "Humidity {}  Wind {}  Feels like {}  Pressure {}",
        current.humidity, current.wind_speed, current.feels_like, current.pressure
    )?;

    if !view.hourly.is_empty() {
        writeln!(out)?;
        writeln!(out, "Next hours")?;
        for hour in &view.hourly {
            writeln!(out, "  {}  {}  {}", hour.time, hour.icon, hour.temperature)?;
        }
    }

    if !view.daily.is_empty() {
        writeln!(out)?;
        writeln!(out, "Next days")?;
        for day in &view.daily {
            writeln!(out, "  {}  {}  {} / {}", day.day, day.icon, day.high, day.low)?;
        }
    }

    Ok(())
}
