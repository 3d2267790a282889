use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::codes::{self, WeatherCodeInfo};

/// Hourly samples kept per forecast.
pub const HOURLY_LIMIT: usize = 24;

/// Daily samples kept per forecast.
pub const DAILY_LIMIT: usize = 5;

/// Days of forecast requested from the provider.
pub const FORECAST_DAYS: u8 = 5;

/// Name used when a device position has no reverse-geocoded name.
pub const FALLBACK_LOCATION_NAME: &str = "Your Location";

/// A raw latitude/longitude pair, as reported by a position provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// How a location was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    NamedSearch,
    DeviceGeolocation,
}

/// Geographic location resolved for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Provider place name, or the fallback name for an unnamed device position
    pub name: String,
    /// Country reported by forward geocoding, when present
    pub country: Option<String>,
    pub source: LocationSource,
}

impl Location {
    /// Name for display: "place, country" for searches, the bare name otherwise.
    pub fn display_name(&self) -> String {
        match self.country.as_deref().filter(|c| !c.is_empty()) {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Mean sea level pressure in hPa
    pub pressure: f64,
    pub weather_code: i32,
}

impl CurrentConditions {
    pub fn condition(&self) -> WeatherCodeInfo {
        codes::lookup(self.weather_code)
    }
}

/// Hourly forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Start of the hour, in the location's own UTC offset
    pub time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub weather_code: i32,
}

impl HourlySample {
    pub fn condition(&self) -> WeatherCodeInfo {
        codes::lookup(self.weather_code)
    }
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    pub weather_code: i32,
}

impl DailySample {
    pub fn condition(&self) -> WeatherCodeInfo {
        codes::lookup(self.weather_code)
    }
}

/// Complete forecast for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub current: CurrentConditions,
    /// Chronological, at most [`HOURLY_LIMIT`] entries
    pub hourly: Vec<HourlySample>,
    /// Chronological, at most [`DAILY_LIMIT`] entries
    pub daily: Vec<DailySample>,
}
