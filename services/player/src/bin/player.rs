//! services/player/src/bin/player.rs

use std::sync::Arc;

use course_player_core::SnapshotStore;
use player_lib::{
    adapters::{JsonFileStore, MemoryStore, SimulatedSurface},
    config::{Config, StorageKind},
    error::PlayerError,
    session::{self, PlayerSession},
};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), PlayerError> {
    // --- 1. Load Configuration & Set Up Logging ---
    // Logs go to stderr so they never interleave with the player output on stdout.
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting player...");

    // --- 2. Open Snapshot Storage ---
    let store: Arc<dyn SnapshotStore> = match config.storage {
        StorageKind::File => {
            info!("Using snapshot files in {}", config.data_dir.display());
            Arc::new(JsonFileStore::open(&config.data_dir)?)
        }
        StorageKind::Memory => {
            info!("Using in-memory snapshots. Progress will not be kept.");
            Arc::new(MemoryStore::new())
        }
    };

    // --- 3. Build the Session ---
    let mut player = PlayerSession::new(store, SimulatedSurface::new());

    // --- 4. Wire Ctrl-C to Shutdown ---
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {:?}", e);
                return;
            }
            shutdown.cancel();
        });
    }

    // --- 5. Run Until Quit ---
    session::run(
        &mut player,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.tick_interval,
        shutdown,
    )
    .await?;

    info!("Player closed.");
    Ok(())
}
