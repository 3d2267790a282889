//! Geocoding: place names to coordinates, and coordinates back to names.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use skycast_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{Location, LocationSource, FALLBACK_LOCATION_NAME};

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    latitude: f64,
    longitude: f64,
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    results: Option<Vec<ReverseResult>>,
}

#[derive(Debug, Deserialize)]
struct ReverseResult {
    name: Option<String>,
}

/// Client for forward and reverse geocoding.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    language: String,
}

impl GeocodingClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::with_base_url(
            &config.geocoding_url,
            &config.language,
            config.request_timeout(),
        )
    }

    /// Build a client against an explicit base URL (e.g. a mock server).
    pub fn with_base_url(
        base_url: &str,
        language: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    /// Resolve a free-text place name to the provider's best match.
    ///
    /// # Errors
    /// - `Validation` if the query is blank; no request is sent.
    /// - `NotFound` if the provider has no match.
    /// - `Network`/`Parse` if the request fails or the body is malformed.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve_by_name(&self, query: &str) -> Result<Location, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::Validation("empty city name".to_string()));
        }

        let url = format!(
            "{}/v1/search?name={}&count=1&language={}&format=json",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.language),
        );

        let body: SearchResponse = self.get_json(&url).await?;

        let result = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        if !result.latitude.is_finite() || !result.longitude.is_finite() {
            return Err(WeatherError::Parse(format!(
                "non-finite coordinates for {}",
                result.name
            )));
        }

        tracing::info!(
            "Geocoded '{}' to {} ({:.4}, {:.4})",
            query,
            result.name,
            result.latitude,
            result.longitude
        );

        Ok(Location {
            latitude: result.latitude,
            longitude: result.longitude,
            name: result.name,
            country: result.country,
            source: LocationSource::NamedSearch,
        })
    }

    /// Name a device position via reverse lookup.
    ///
    /// A missing name is not an error: the location falls back to
    /// [`FALLBACK_LOCATION_NAME`]. Only transport failures are reported.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve_by_device_position(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Location, WeatherError> {
        let url = format!(
            "{}/v1/reverse?latitude={}&longitude={}&language={}",
            self.base_url,
            latitude,
            longitude,
            urlencoding::encode(&self.language),
        );

        let body: ReverseResponse = self.get_json(&url).await?;

        let name = body
            .results
            .and_then(|results| results.into_iter().next())
            .and_then(|result| result.name)
            .filter(|name| !name.trim().is_empty());

        let name = match name {
            Some(name) => {
                tracing::info!("Reverse geocoded to: {}", name);
                name
            }
            None => {
                tracing::debug!("No reverse geocoding name, using fallback");
                FALLBACK_LOCATION_NAME.to_string()
            }
        };

        Ok(Location {
            latitude,
            longitude,
            name,
            country: None,
            source: LocationSource::DeviceGeolocation,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, WeatherError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Geocoding request failed: {}", e);
                e.into_network_error()
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("Geocoding returned status {}", status);
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            }
            .into());
        }

        let text = response.text().await.map_err(|e| e.into_network_error())?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::debug!("Geocoding parse error: {}", e);
            WeatherError::Parse(e.to_string())
        })
    }
}
