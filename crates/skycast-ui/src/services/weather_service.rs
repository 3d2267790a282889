//! Weather pipeline orchestration.
//!
//! A pipeline run resolves a location (by name or device position), fetches
//! its forecast and hands the result to the renderer. Runs may overlap; each
//! one takes a generation number and only the newest is allowed to touch the
//! display when it completes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use skycast_core::Config;
use skycast_weather::{
    ConfiguredPosition, ForecastBundle, GeocodingClient, Location, LocationError,
    PositionProvider, WeatherError, WeatherProvider,
};
use tokio::task::JoinHandle;

use crate::banner::ErrorBanner;
use crate::models::{PipelineState, WeatherView};
use crate::render::Renderer;

/// Place loaded at startup when none is configured.
pub const DEFAULT_CITY: &str = "London";

/// How a pipeline run ended.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The forecast was rendered.
    Success {
        location: Location,
        bundle: ForecastBundle,
        view: WeatherView,
    },
    /// A step failed; the error banner was shown.
    Failed(WeatherError),
    /// Rejected before loading started (empty input, no positioning).
    Rejected(WeatherError),
    /// A newer run started before this one finished; its result was dropped.
    Superseded,
    /// Nothing to run (no default city configured).
    Skipped,
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&WeatherError> {
        match self {
            Self::Failed(e) | Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

/// Drives geocoding and forecast retrieval and owns the loading/error UX.
pub struct WeatherService<P = ConfiguredPosition> {
    geocoder: GeocodingClient,
    provider: WeatherProvider,
    position: P,
    renderer: Arc<dyn Renderer>,
    banner: ErrorBanner,
    default_city: String,
    generation: AtomicU64,
    state: Mutex<PipelineState>,
}

impl WeatherService<ConfiguredPosition> {
    /// Build the service from configuration.
    pub fn from_config(config: &Config, renderer: Arc<dyn Renderer>) -> Result<Self, WeatherError> {
        let geocoder = GeocodingClient::new(&config.weather)?;
        let provider = WeatherProvider::new(&config.weather)?;
        let position = ConfiguredPosition::from_config(&config.location);

        let service = Self::new(
            geocoder,
            provider,
            position,
            renderer,
            config.ui.error_dismiss_after(),
        )
        .with_default_city(&config.weather.default_city);
        tracing::debug!(
            "Error banner dismisses after {:?}",
            service.banner.dismiss_after()
        );
        Ok(service)
    }
}

impl<P: PositionProvider> WeatherService<P> {
    pub fn new(
        geocoder: GeocodingClient,
        provider: WeatherProvider,
        position: P,
        renderer: Arc<dyn Renderer>,
        dismiss_after: Duration,
    ) -> Self {
        let banner = ErrorBanner::new(Arc::clone(&renderer), dismiss_after);
        Self {
            geocoder,
            provider,
            position,
            renderer,
            banner,
            default_city: DEFAULT_CITY.to_string(),
            generation: AtomicU64::new(0),
            state: Mutex::new(PipelineState::Idle),
        }
    }

    pub fn with_default_city(mut self, city: &str) -> Self {
        self.default_city = city.to_string();
        self
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Current pipeline state.
    pub fn state(&self) -> PipelineState {
        *self.state.lock()
    }

    /// Search for `query` and render its forecast.
    ///
    /// Blank input is rejected with the banner without entering `Loading`.
    pub async fn search(&self, query: &str) -> PipelineOutcome {
        if query.trim().is_empty() {
            return self.reject(WeatherError::Validation("empty city name".to_string()));
        }

        let generation = self.begin();
        let result = self.run_by_name(query).await;
        self.finish(generation, result)
    }

    /// Render the forecast for the device position.
    pub async fn locate(&self) -> PipelineOutcome {
        if !self.position.is_available() {
            return self.reject(LocationError::Unsupported.into());
        }

        let generation = self.begin();
        let result = self.run_by_position().await;
        self.finish(generation, result)
    }

    /// Run the startup search for the default city.
    ///
    /// A blank default city is skipped silently: the user never typed it,
    /// so it gets no empty-input banner.
    pub async fn load_default(&self) -> PipelineOutcome {
        if self.default_city.trim().is_empty() {
            tracing::debug!("No default city configured, skipping startup load");
            return PipelineOutcome::Skipped;
        }
        let city = self.default_city.clone();
        self.search(&city).await
    }

    async fn run_by_name(&self, query: &str) -> Result<(Location, ForecastBundle), WeatherError> {
        let location = self.geocoder.resolve_by_name(query).await?;
        let bundle = self.provider.fetch(&location).await?;
        Ok((location, bundle))
    }

    async fn run_by_position(&self) -> Result<(Location, ForecastBundle), WeatherError> {
        let coords = self.position.current_position().await?;
        let location = self
            .geocoder
            .resolve_by_device_position(coords.latitude, coords.longitude)
            .await?;
        let bundle = self.provider.fetch(&location).await?;
        Ok((location, bundle))
    }

    fn reject(&self, error: WeatherError) -> PipelineOutcome {
        tracing::info!("Weather request rejected: {}", error);
        self.banner.show(error.user_message());
        PipelineOutcome::Rejected(error)
    }

    fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(generation, "Starting weather pipeline run");
        self.transition(&mut state, PipelineState::Loading);
        self.renderer.set_loading(true);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn finish(
        &self,
        generation: u64,
        result: Result<(Location, ForecastBundle), WeatherError>,
    ) -> PipelineOutcome {
        let mut state = self.state.lock();
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding superseded weather pipeline run");
            return PipelineOutcome::Superseded;
        }

        self.renderer.set_loading(false);
        let outcome = match result {
            Ok((location, bundle)) => {
                let view = WeatherView::from_bundle(&location.display_name(), &bundle);
                self.renderer.render(&view);
                self.transition(&mut state, PipelineState::Success);
                PipelineOutcome::Success {
                    location,
                    bundle,
                    view,
                }
            }
            Err(e) => {
                tracing::warn!("Weather pipeline failed: {}", e);
                self.banner.show(e.user_message());
                self.transition(&mut state, PipelineState::Failed);
                PipelineOutcome::Failed(e)
            }
        };
        self.transition(&mut state, PipelineState::Idle);
        outcome
    }

    fn transition(&self, state: &mut PipelineState, next: PipelineState) {
        tracing::info!("Weather pipeline {:?} -> {:?}", *state, next);
        *state = next;
        self.renderer.state_changed(next);
    }
}

impl<P: PositionProvider + 'static> WeatherService<P> {
    /// Start a search as an independent task.
    pub fn spawn_search(self: &Arc<Self>, query: String) -> JoinHandle<PipelineOutcome> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.search(&query).await })
    }

    /// Start a device-location run as an independent task.
    pub fn spawn_locate(self: &Arc<Self>) -> JoinHandle<PipelineOutcome> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.locate().await })
    }

    pub fn spawn_load_default(self: &Arc<Self>) -> JoinHandle<PipelineOutcome> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.load_default().await })
    }
}
