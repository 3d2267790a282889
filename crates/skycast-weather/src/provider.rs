//! Forecast retrieval from the Open-Meteo forecast API.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use skycast_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{
    CurrentConditions, DailySample, ForecastBundle, HourlySample, Location, DAILY_LIMIT,
    FORECAST_DAYS, HOURLY_LIMIT,
};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,pressure_msl";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    current: CurrentData,
    hourly: HourlyData,
    daily: DailyData,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    wind_speed_10m: f64,
    pressure_msl: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<String>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

/// Fetches forecasts for resolved locations.
///
/// Every call issues a fresh request; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::with_base_url(&config.forecast_url, config.request_timeout())
    }

    /// Build a provider against an explicit base URL (e.g. a mock server).
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current, hourly and daily conditions for `location`.
    ///
    /// Hourly and daily series are cut to the first [`HOURLY_LIMIT`] and
    /// [`DAILY_LIMIT`] entries, or fewer when the provider sends less.
    #[instrument(skip(self, location), fields(place = %location.name), level = "info")]
    pub async fn fetch(&self, location: &Location) -> Result<ForecastBundle, WeatherError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone=auto&forecast_days={}&wind_speed_unit=ms",
            self.base_url,
            location.latitude,
            location.longitude,
            CURRENT_FIELDS,
            HOURLY_FIELDS,
            DAILY_FIELDS,
            FORECAST_DAYS,
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("Forecast request failed: {}", e);
            e.into_network_error()
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!("Forecast returned status {}", status);
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            }
            .into());
        }

        let text = response.text().await.map_err(|e| e.into_network_error())?;
        let raw: ForecastResponse = serde_json::from_str(&text)
            .map_err(|e| WeatherError::Parse(format!("forecast body: {}", e)))?;

        let bundle = raw.into_bundle()?;
        tracing::debug!(
            "Forecast parsed: {} hourly, {} daily",
            bundle.hourly.len(),
            bundle.daily.len()
        );
        Ok(bundle)
    }
}

impl ForecastResponse {
    fn into_bundle(self) -> Result<ForecastBundle, WeatherError> {
        let offset = FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            WeatherError::Parse(format!("invalid utc offset {}", self.utc_offset_seconds))
        })?;

        let current = CurrentConditions {
            temperature: self.current.temperature_2m,
            feels_like: self.current.apparent_temperature,
            humidity: self.current.relative_humidity_2m.round().clamp(0.0, 100.0) as u8,
            wind_speed: self.current.wind_speed_10m,
            pressure: self.current.pressure_msl,
            weather_code: self.current.weather_code,
        };

        let hourly = self
            .hourly
            .time
            .iter()
            .zip(&self.hourly.temperature_2m)
            .zip(&self.hourly.weather_code)
            .take(HOURLY_LIMIT)
            .map(|((time, &temperature), &weather_code)| {
                Ok(HourlySample {
                    time: parse_local_time(time, offset)?,
                    temperature,
                    weather_code,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        let daily = self
            .daily
            .time
            .iter()
            .zip(&self.daily.weather_code)
            .zip(&self.daily.temperature_2m_max)
            .zip(&self.daily.temperature_2m_min)
            .take(DAILY_LIMIT)
            .map(|(((date, &weather_code), &high), &low)| {
                Ok(DailySample {
                    date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                        .map_err(|e| WeatherError::Parse(format!("daily date {date:?}: {e}")))?,
                    high,
                    low,
                    weather_code,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        Ok(ForecastBundle {
            current,
            hourly,
            daily,
        })
    }
}

/// Parse an Open-Meteo local timestamp ("2024-01-01T15:00") in `offset`.
fn parse_local_time(value: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>, WeatherError> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map_err(|e| WeatherError::Parse(format!("hourly time {value:?}: {e}")))?;
    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| WeatherError::Parse(format!("ambiguous hourly time {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    fn response(hours: usize, days: usize) -> serde_json::Value {
        let time: Vec<String> = (0..hours)
            .map(|h| format!("2024-03-{:02}T{:02}:00", 1 + h / 24, h % 24))
            .collect();
        let dates: Vec<String> = (0..days).map(|d| format!("2024-03-{:02}", d + 1)).collect();
        json!({
            "latitude": 51.5,
            "longitude": -0.12,
            "utc_offset_seconds": 3600,
            "current": {
                "time": "2024-03-01T12:00",
                "temperature_2m": 12.4,
                "relative_humidity_2m": 81,
                "apparent_temperature": 10.6,
                "weather_code": 3,
                "wind_speed_10m": 4.17,
                "pressure_msl": 1012.6
            },
            "hourly": {
                "time": time,
                "temperature_2m": vec![11.0; hours],
                "weather_code": vec![61; hours],
                "wind_speed_10m": vec![3.0; hours]
            },
            "daily": {
                "time": dates,
                "weather_code": vec![2; days],
                "temperature_2m_max": vec![14.0; days],
                "temperature_2m_min": vec![6.0; days]
            }
        })
    }

    fn bundle(value: serde_json::Value) -> Result<ForecastBundle, WeatherError> {
        serde_json::from_value::<ForecastResponse>(value)
            .unwrap()
            .into_bundle()
    }

    #[test]
    fn test_current_conditions_mapped() {
        let bundle = bundle(response(24, 5)).unwrap();
        assert_eq!(bundle.current.temperature, 12.4);
        assert_eq!(bundle.current.feels_like, 10.6);
        assert_eq!(bundle.current.humidity, 81);
        assert_eq!(bundle.current.wind_speed, 4.17);
        assert_eq!(bundle.current.pressure, 1012.6);
        assert_eq!(bundle.current.weather_code, 3);
    }

    #[test]
    fn test_series_truncated_to_limits() {
        let bundle = bundle(response(120, 7)).unwrap();
        assert_eq!(bundle.hourly.len(), HOURLY_LIMIT);
        assert_eq!(bundle.daily.len(), DAILY_LIMIT);
    }

    #[test]
    fn test_short_series_kept_whole() {
        let bundle = bundle(response(6, 2)).unwrap();
        assert_eq!(bundle.hourly.len(), 6);
        assert_eq!(bundle.daily.len(), 2);
    }

    #[test]
    fn test_mismatched_series_lengths_use_shortest() {
        let mut value = response(24, 5);
        value["hourly"]["temperature_2m"] = json!([1.0, 2.0, 3.0]);
        value["daily"]["temperature_2m_min"] = json!([0.0]);
        let bundle = bundle(value).unwrap();
        assert_eq!(bundle.hourly.len(), 3);
        assert_eq!(bundle.daily.len(), 1);
    }

    #[test]
    fn test_hourly_time_carries_location_offset() {
        let bundle = bundle(response(24, 5)).unwrap();
        let first = &bundle.hourly[0];
        assert_eq!(first.time.offset().local_minus_utc(), 3600);
        assert_eq!(first.time.hour(), 0);
        assert_eq!(bundle.hourly[15].time.hour(), 15);
        assert_eq!(
            bundle.daily[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_missing_offset_defaults_to_utc() {
        let mut value = response(2, 1);
        value.as_object_mut().unwrap().remove("utc_offset_seconds");
        let bundle = bundle(value).unwrap();
        assert_eq!(bundle.hourly[0].time.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let mut value = response(2, 1);
        value["hourly"]["time"] = json!(["yesterday", "today"]);
        let err = bundle(value).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn test_missing_section_fails_to_deserialize() {
        let mut value = response(2, 1);
        value.as_object_mut().unwrap().remove("current");
        assert!(serde_json::from_value::<ForecastResponse>(value).is_err());
    }
}
