//! Integration tests for WeatherProvider using wiremock.

use skycast_weather::{Location, LocationSource, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn london() -> Location {
    Location {
        latitude: 51.5,
        longitude: -0.12,
        name: "London".to_string(),
        country: Some("United Kingdom".to_string()),
        source: LocationSource::NamedSearch,
    }
}

/// Helper to build a forecast body with `hours` hourly and `days` daily entries
fn forecast_body(hours: usize, days: usize) -> serde_json::Value {
    let time: Vec<String> = (0..hours)
        .map(|h| format!("2024-03-{:02}T{:02}:00", 1 + h / 24, h % 24))
        .collect();
    let temps: Vec<f64> = (0..hours).map(|h| 5.0 + h as f64 * 0.5).collect();
    let dates: Vec<String> = (0..days).map(|d| format!("2024-03-{:02}", d + 1)).collect();
    serde_json::json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "timezone": "Europe/London",
        "utc_offset_seconds": 0,
        "current": {
            "temperature_2m": 12.4,
            "relative_humidity_2m": 81,
            "apparent_temperature": 10.6,
            "weather_code": 3,
            "wind_speed_10m": 4.17,
            "pressure_msl": 1012.6
        },
        "hourly": {
            "time": time,
            "temperature_2m": temps,
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

#[tokio::test]
async fn test_fetch_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "51.5"))
        .and(query_param("longitude", "-0.12"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,pressure_msl",
        ))
        .and(query_param("hourly", "temperature_2m,weather_code,wind_speed_10m"))
        .and(query_param(
            "daily",
            "weather_code,temperature_2m_max,temperature_2m_min",
        ))
        .and(query_param("timezone", "auto"))
        .and(query_param("forecast_days", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(24, 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
    let bundle = provider.fetch(&london()).await.unwrap();

    assert_eq!(bundle.current.weather_code, 3);
    assert_eq!(bundle.current.condition().description, "Overcast");
    assert_eq!(bundle.hourly.len(), 24);
    assert_eq!(bundle.daily.len(), 5);
    assert_eq!(bundle.hourly[1].temperature, 5.5);
}

#[tokio::test]
async fn test_fetch_truncates_long_series() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(168, 7)))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
    let bundle = provider.fetch(&london()).await.unwrap();

    assert_eq!(bundle.hourly.len(), 24);
    assert_eq!(bundle.daily.len(), 5);
    assert!(bundle.hourly.windows(2).all(|w| w[0].time < w[1].time));
}

#[tokio::test]
async fn test_fetch_keeps_short_series() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(3, 1)))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
    let bundle = provider.fetch(&london()).await.unwrap();

    assert_eq!(bundle.hourly.len(), 3);
    assert_eq!(bundle.daily.len(), 1);
}

#[tokio::test]
async fn test_fetch_http_error_is_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
    let err = provider.fetch(&london()).await.unwrap_err();

    assert!(matches!(
        err,
        WeatherError::Network(skycast_core::NetworkError::ServerError { status: 500, .. })
    ));
    assert_eq!(err.user_message(), "Failed to fetch weather data");
}

#[tokio::test]
async fn test_fetch_unexpected_shape_is_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
    let err = provider.fetch(&london()).await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(24, 5)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::with_base_url(&mock_server.uri(), None).unwrap();
    let first = provider.fetch(&london()).await.unwrap();
    let second = provider.fetch(&london()).await.unwrap();

    assert_eq!(first, second);
}
