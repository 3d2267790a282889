//! Display-ready view of a forecast.
//!
//! Everything a renderer shows is formatted here, so renderers only lay
//! strings out and never touch raw forecast numbers.

use skycast_weather::{CurrentConditions, DailySample, ForecastBundle, HourlySample};

/// UI state of the weather pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub location_name: String,
    pub current: CurrentView,
    pub hourly: Vec<HourlyView>,
    pub daily: Vec<DailyView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
    pub condition: String,
    pub condition_icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyView {
    pub time: String,
    pub icon: String,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyView {
    pub day: String,
    pub icon: String,
    pub high: String,
    pub low: String,
}

impl WeatherView {
    pub fn from_bundle(location_name: &str, bundle: &ForecastBundle) -> Self {
        Self {
            location_name: location_name.to_string(),
            current: CurrentView::from(&bundle.current),
            hourly: bundle.hourly.iter().map(HourlyView::from).collect(),
            daily: bundle.daily.iter().map(DailyView::from).collect(),
        }
    }
}

impl From<&CurrentConditions> for CurrentView {
    fn from(current: &CurrentConditions) -> Self {
        let info = current.condition();
        Self {
            temperature: format_celsius(current.temperature),
            feels_like: format_celsius(current.feels_like),
            humidity: format!("{}%", current.humidity),
            wind_speed: format!("{:.1} m/s", current.wind_speed),
            pressure: format!("{} hPa", round_half_up(current.pressure)),
            condition: info.description.to_string(),
            condition_icon: info.icon.to_string(),
        }
    }
}

impl From<&HourlySample> for HourlyView {
    fn from(sample: &HourlySample) -> Self {
        Self {
            time: sample.time.format("%I:%M %p").to_string(),
            icon: sample.condition().icon.to_string(),
            temperature: format_celsius(sample.temperature),
        }
    }
}

impl From<&DailySample> for DailyView {
    fn from(sample: &DailySample) -> Self {
        Self {
            day: sample.date.format("%a").to_string(),
            icon: sample.condition().icon.to_string(),
            high: format_degrees(sample.high),
            low: format_degrees(sample.low),
        }
    }
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_celsius(value: f64) -> String {
    format!("{}°C", round_half_up(value))
}

pub fn format_degrees(value: f64) -> String {
    format!("{}°", round_half_up(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn bundle() -> ForecastBundle {
        let offset = FixedOffset::east_opt(0).unwrap();
        ForecastBundle {
            current: CurrentConditions {
                temperature: 12.4,
                feels_like: 10.6,
                humidity: 81,
                wind_speed: 4.17,
                pressure: 1012.6,
                weather_code: 3,
            },
            hourly: vec![
                HourlySample {
                    time: offset.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                    temperature: -0.4,
                    weather_code: 0,
                },
                HourlySample {
                    time: offset.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap(),
                    temperature: 7.5,
                    weather_code: 61,
                },
            ],
            daily: vec![DailySample {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                high: 14.2,
                low: 5.5,
                weather_code: 1234,
            }],
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(12.4), 12);
        assert_eq!(round_half_up(12.5), 13);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(-0.4), 0);
    }

    #[test]
    fn test_current_view() {
        let view = WeatherView::from_bundle("London, United Kingdom", &bundle());
        assert_eq!(view.location_name, "London, United Kingdom");
        assert_eq!(view.current.temperature, "12°C");
        assert_eq!(view.current.feels_like, "11°C");
        assert_eq!(view.current.humidity, "81%");
        assert_eq!(view.current.wind_speed, "4.2 m/s");
        assert_eq!(view.current.pressure, "1013 hPa");
        assert_eq!(view.current.condition, "Overcast");
        assert_eq!(view.current.condition_icon, "☁️");
    }

    #[test]
    fn test_hourly_view() {
        let view = WeatherView::from_bundle("London", &bundle());
        assert_eq!(view.hourly.len(), 2);
        assert_eq!(view.hourly[0].time, "12:00 AM");
        assert_eq!(view.hourly[0].temperature, "0°C");
        assert_eq!(view.hourly[0].icon, "☀️");
        assert_eq!(view.hourly[1].time, "03:00 PM");
        assert_eq!(view.hourly[1].temperature, "8°C");
    }

    #[test]
    fn test_daily_view_unknown_code() {
        let view = WeatherView::from_bundle("London", &bundle());
        let day = &view.daily[0];
        assert_eq!(day.day, "Fri");
        assert_eq!(day.high, "14°");
        assert_eq!(day.low, "6°");
        assert_eq!(day.icon, skycast_weather::codes::DEFAULT_ICON);
    }
}
