//! Self-dismissing error banner.

use std::sync::Arc;
use std::time::Duration;

use crate::render::Renderer;

/// Default time an error stays on screen.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Shows an error message and hides it again after a fixed delay.
///
/// The dismissal timer is independent of the pipeline: it fires even if a
/// later run has already succeeded or shown another error.
#[derive(Clone)]
pub struct ErrorBanner {
    renderer: Arc<dyn Renderer>,
    dismiss_after: Duration,
}

impl ErrorBanner {
    pub fn new(renderer: Arc<dyn Renderer>, dismiss_after: Duration) -> Self {
        Self {
            renderer,
            dismiss_after,
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    /// Display `message` and schedule its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: &str) {
        tracing::debug!("Showing error banner: {}", message);
        self.renderer.show_error(message);

        let renderer = Arc::clone(&self.renderer);
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            renderer.hide_error();
        });
    }
}
