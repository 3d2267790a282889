//! Weather pipeline error types.

use skycast_core::NetworkError;
use thiserror::Error;

/// Device position errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location service unavailable")]
    Unsupported,
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Unable to access your location",
            Self::Unsupported => "Geolocation is not supported on this device",
        }
    }
}

/// Errors raised while resolving a location or fetching its forecast
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Rejected locally; never reaches the network.
    #[error("Invalid query: {0}")]
    Validation(String),

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

impl WeatherError {
    /// User-friendly error message for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please enter a city name",
            Self::NotFound(_) => "Could not find city. Please try again.",
            Self::Network(_) | Self::Parse(_) => "Failed to fetch weather data",
            Self::Location(e) => e.user_message(),
        }
    }

    /// Whether the failure came from the network call or its response body.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Parse(_))
    }
}
