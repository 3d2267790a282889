//! Device position sources.

use std::future::Future;

use skycast_core::LocationConfig;

use crate::error::LocationError;
use crate::types::Coordinates;

/// Supplies the device's current position.
pub trait PositionProvider: Send + Sync {
    /// Whether this provider can ever produce a position.
    fn is_available(&self) -> bool;

    /// Request the current position.
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Position taken from the `[location]` config section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfiguredPosition {
    Fixed(Coordinates),
    Denied,
    Unsupported,
}

impl ConfiguredPosition {
    pub fn from_config(config: &LocationConfig) -> Self {
        if !config.enabled {
            return Self::Denied;
        }
        match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Self::Fixed(Coordinates::new(lat, lon)),
            _ => Self::Unsupported,
        }
    }
}

impl PositionProvider for ConfiguredPosition {
    fn is_available(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match *self {
            Self::Fixed(coords) => Ok(coords),
            Self::Denied => Err(LocationError::PermissionDenied),
            Self::Unsupported => Err(LocationError::Unsupported),
        }
    }
}
