//! services/player/src/session/event_loop.rs
//!
//! The main control loop of a terminal session. It multiplexes three sources:
//! lines typed by the learner, ticks of the playback clock, and cancellation.
//! Everything is handled on one task, one event at a time.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::PlayerError;
use crate::session::render;
use crate::session::state::{PlayerSession, PolledSurface, Reply};

/// Runs `session` until the input closes, `quit` is typed, or `shutdown` fires.
pub async fn run<S, R, W>(
    session: &mut PlayerSession<S>,
    input: R,
    mut output: W,
    tick: Duration,
    shutdown: CancellationToken,
) -> Result<(), PlayerError>
where
    S: PolledSurface,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    write_block(&mut output, &render::status(&session.view())).await?;
    write_block(&mut output, "Type 'help' for commands.").await?;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested. Closing session.");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed.");
                    break;
                };
                match session.handle_line(&line) {
                    Ok(Some(Reply::Text(text))) => write_block(&mut output, &text).await?,
                    Ok(Some(Reply::Quit)) => {
                        info!("Quit requested.");
                        break;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!("Command failed: {}", e);
                        write_block(&mut output, &format!("error: {}", e)).await?;
                    }
                }
            }
            now = ticker.tick() => {
                let elapsed = now.saturating_duration_since(last_tick);
                last_tick = now;
                for message in session.tick(elapsed) {
                    write_block(&mut output, &message).await?;
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}

async fn write_block<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<(), PlayerError> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
