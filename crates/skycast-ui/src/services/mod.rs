pub mod weather_service;

pub use weather_service::{PipelineOutcome, WeatherService, DEFAULT_CITY};
