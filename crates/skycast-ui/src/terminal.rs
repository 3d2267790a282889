//! Interactive command loop.

use std::io::Write;
use std::sync::Arc;

use skycast_weather::PositionProvider;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

use crate::commands::{Command, HELP};
use crate::services::{PipelineOutcome, WeatherService};

/// Why the command loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The user typed `/quit`; in-flight runs are abandoned.
    Quit,
    /// Input ended; in-flight runs were awaited first.
    EndOfInput,
}

/// Read commands from `input` until `/quit` or end of input.
///
/// Each search or locate runs as its own task. `pending` holds runs started
/// before the loop (the startup load). At end of input every outstanding run
/// is awaited so piped input still gets its results rendered.
pub async fn run_commands<P, R, W>(
    service: &Arc<WeatherService<P>>,
    input: R,
    out: &mut W,
    mut pending: Vec<JoinHandle<PipelineOutcome>>,
) -> std::io::Result<LoopExit>
where
    P: PositionProvider + 'static,
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        pending.retain(|task| !task.is_finished());
        match Command::parse(&line) {
            Command::Search(query) => pending.push(service.spawn_search(query)),
            Command::Locate => pending.push(service.spawn_locate()),
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(LoopExit::Quit),
            Command::Unknown(text) => {
                writeln!(out, "Unknown command: {} (try /help)", text)?;
            }
        }
        out.flush()?;
    }

    tracing::debug!("Input closed, waiting for {} pending runs", pending.len());
    for task in pending {
        if let Err(e) = task.await {
            tracing::warn!("Weather pipeline task failed: {}", e);
        }
    }
    Ok(LoopExit::EndOfInput)
}
