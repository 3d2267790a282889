//! SkyCast front end: the weather pipeline orchestrator and the terminal
//! surfaces it drives.

pub mod banner;
pub mod clock;
pub mod commands;
pub mod models;
pub mod render;
pub mod services;
pub mod terminal;

pub use banner::ErrorBanner;
pub use clock::{spawn_clock, ClockReading};
pub use commands::Command;
pub use models::{PipelineState, WeatherView};
pub use render::{Renderer, TerminalRenderer};
pub use services::{PipelineOutcome, WeatherService};
pub use terminal::{run_commands, LoopExit};
