pub mod weather_model;

pub use weather_model::{CurrentView, DailyView, HourlyView, PipelineState, WeatherView};
