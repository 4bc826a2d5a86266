//! Brain-training games client binary.
//!
//! Main entry point for the terminal client.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Content (presets, alphabets, question bank) via `ContentFactory`
//! 2. One engine hosted by a runtime `Session`
//! 3. A line-based terminal loop that drives the session
//!
//! # Examples
//!
//! ```bash
//! brain-games number-recall
//! BRAIN_GAMES_SEED=7 brain-games matching
//! ```

mod bootstrap;
mod config;
mod console;
mod logging;
mod play;

use anyhow::Result;

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env().with_args(std::env::args().skip(1))?;
    let _guard = logging::setup_logging(config.log_dir.as_deref(), &config.session_id)?;

    tracing::info!("Starting brain-games client");
    tracing::info!("Game: {}", config.game);

    bootstrap::run(config).await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
