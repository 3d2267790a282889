//! Weather data for SkyCast
//!
//! Resolves places to coordinates and fetches forecasts from the Open-Meteo
//! APIs, plus the WMO weather code table used to describe conditions.

pub mod codes;
pub mod error;
pub mod geocode;
pub mod location;
pub mod provider;
pub mod types;

pub use codes::{lookup, WeatherCodeInfo};
pub use error::{LocationError, WeatherError};
pub use geocode::GeocodingClient;
pub use location::{ConfiguredPosition, PositionProvider};
pub use provider::WeatherProvider;
pub use types::*;
