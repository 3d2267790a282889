//! Local clock display.
//!
//! Runs as its own task on the shared runtime and never touches the network,
//! so it keeps ticking while a weather pipeline run is in flight.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::render::Renderer;

/// Default clock refresh period.
pub const TICK: Duration = Duration::from_secs(1);

/// A formatted local date and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// e.g. "Friday, March 1, 2024"
    pub date: String,
    /// e.g. "03:04:05 PM"
    pub time: String,
}

impl ClockReading {
    pub fn now() -> Self {
        format_clock(Local::now().naive_local())
    }
}

pub fn format_clock(at: NaiveDateTime) -> ClockReading {
    ClockReading {
        date: at.format("%A, %B %-d, %Y").to_string(),
        time: at.format("%I:%M:%S %p").to_string(),
    }
}

/// Push a fresh reading to `renderer` every `period` until the task is aborted.
pub fn spawn_clock(renderer: Arc<dyn Renderer>, period: Duration) -> JoinHandle<()> {
    let period = if period.is_zero() { TICK } else { period };
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            renderer.show_time(&ClockReading::now());
        }
    })
}
