use std::sync::Arc;

use anyhow::Result;
use skycast_core::{AppError, Config};
use skycast_ui::{clock, run_commands, Renderer, TerminalRenderer, WeatherService};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(e) => {
            let err = AppError::classify(e);
            eprintln!("{}", err.user_message());
            return Err(err.into());
        }
    };
    tracing::info!("SkyCast started");
    tracing::debug!("Config directory: {}", config.config_dir.display());

    let renderer: Arc<dyn Renderer> = Arc::new(TerminalRenderer::stdout());
    let service = Arc::new(WeatherService::from_config(&config, Arc::clone(&renderer))?);

    let clock_task = config
        .ui
        .show_clock
        .then(|| clock::spawn_clock(Arc::clone(&renderer), clock::TICK));

    println!("SkyCast - type a city name, /here for your location, /help for commands");
    let startup = vec![service.spawn_load_default()];

    let exit = run_commands(&service, tokio::io::stdin(), &mut std::io::stdout(), startup).await?;

    if let Some(task) = clock_task {
        task.abort();
    }
    tracing::info!("SkyCast shutting down ({:?})", exit);

    Ok(())
}
