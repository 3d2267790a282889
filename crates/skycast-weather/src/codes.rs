//! WMO weather code table.
//!
//! The forecast service reports sky and precipitation conditions as WMO
//! integer codes. This module maps them to a display glyph and a short
//! description. New upstream codes are added as rows in [`WEATHER_CODES`];
//! no lookup logic changes.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

/// Glyph shown for codes missing from the table.
pub const DEFAULT_ICON: &str = "🌤️";

/// Description shown for codes missing from the table.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Icon and description for one weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeInfo {
    pub icon: &'static str,
    pub description: &'static str,
}

impl WeatherCodeInfo {
    const fn new(icon: &'static str, description: &'static str) -> Self {
        Self { icon, description }
    }

    /// Fallback for unmapped codes.
    pub const UNKNOWN: Self = Self::new(DEFAULT_ICON, UNKNOWN_DESCRIPTION);
}

/// Known codes, sorted ascending by code.
pub const WEATHER_CODES: &[(i32, WeatherCodeInfo)] = &[
    (0, WeatherCodeInfo::new("☀️", "Clear sky")),
    (1, WeatherCodeInfo::new("🌤️", "Mainly clear")),
    (2, WeatherCodeInfo::new("⛅", "Partly cloudy")),
    (3, WeatherCodeInfo::new("☁️", "Overcast")),
    (45, WeatherCodeInfo::new("🌫️", "Foggy")),
    (48, WeatherCodeInfo::new("🌫️", "Depositing rime fog")),
    (51, WeatherCodeInfo::new("🌧️", "Light drizzle")),
    (53, WeatherCodeInfo::new("🌧️", "Moderate drizzle")),
    (55, WeatherCodeInfo::new("🌧️", "Dense drizzle")),
    (61, WeatherCodeInfo::new("🌧️", "Slight rain")),
    (63, WeatherCodeInfo::new("🌧️", "Moderate rain")),
    (65, WeatherCodeInfo::new("⛈️", "Heavy rain")),
    (71, WeatherCodeInfo::new("❄️", "Slight snow")),
    (73, WeatherCodeInfo::new("❄️", "Moderate snow")),
    (75, WeatherCodeInfo::new("❄️", "Heavy snow")),
    (77, WeatherCodeInfo::new("❄️", "Snow grains")),
    (80, WeatherCodeInfo::new("🌧️", "Slight rain showers")),
    (81, WeatherCodeInfo::new("🌧️", "Moderate rain showers")),
    (82, WeatherCodeInfo::new("⛈️", "Violent rain showers")),
    (85, WeatherCodeInfo::new("❄️", "Slight snow showers")),
    (86, WeatherCodeInfo::new("❄️", "Heavy snow showers")),
    (95, WeatherCodeInfo::new("⛈️", "Thunderstorm")),
    (96, WeatherCodeInfo::new("⛈️", "Thunderstorm with slight hail")),
    (99, WeatherCodeInfo::new("⛈️", "Thunderstorm with heavy hail")),
];

/// Look up the icon and description for a weather code.
///
/// Total: codes absent from the table yield [`WeatherCodeInfo::UNKNOWN`].
pub fn lookup(code: i32) -> WeatherCodeInfo {
    WEATHER_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .map(|idx| WEATHER_CODES[idx].1)
        .unwrap_or(WeatherCodeInfo::UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(WEATHER_CODES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_known_codes_cover_observed_set() {
        let observed = [
            0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95,
            96, 99,
        ];
        let table: Vec<i32> = WEATHER_CODES.iter().map(|(c, _)| *c).collect();
        assert_eq!(table, observed);
    }

    #[test]
    fn test_lookup_clear() {
        let info = lookup(0);
        assert_eq!(info.icon, "☀️");
        assert_eq!(info.description, "Clear sky");
    }

    #[test]
    fn test_lookup_overcast() {
        assert_eq!(lookup(3), WeatherCodeInfo::new("☁️", "Overcast"));
    }

    #[test]
    fn test_lookup_fog() {
        assert_eq!(lookup(45).description, "Foggy");
        assert_eq!(lookup(48).description, "Depositing rime fog");
        assert_eq!(lookup(45).icon, lookup(48).icon);
    }

    #[test]
    fn test_lookup_heavy_precipitation_uses_storm_icon() {
        assert_eq!(lookup(65).icon, "⛈️");
        assert_eq!(lookup(82).icon, "⛈️");
        assert_eq!(lookup(99).description, "Thunderstorm with heavy hail");
    }

    #[test]
    fn test_lookup_snow() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(lookup(code).icon, "❄️", "code {code}");
        }
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        for code in [-1, 4, 56, 57, 66, 67, 100, 999, i32::MIN, i32::MAX] {
            assert_eq!(lookup(code), WeatherCodeInfo::UNKNOWN, "code {code}");
        }
        assert_eq!(WeatherCodeInfo::UNKNOWN.icon, DEFAULT_ICON);
        assert_eq!(WeatherCodeInfo::UNKNOWN.description, "Unknown");
    }

    #[test]
    fn test_lookup_is_pure() {
        assert_eq!(lookup(61), lookup(61));
        assert_eq!(lookup(1234), lookup(1234));
    }
}
