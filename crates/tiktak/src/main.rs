//! TikTak - terminal tic-tac-toe.

#![warn(missing_docs)]

mod cli;
mod demo;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tiktak::GameConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (RUST_LOG and friends)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            board_size,
            ai_delay_ms,
        } => {
            let mut config = GameConfig::load_or_default(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;
            if let Some(size) = board_size {
                config = config.with_board_size(size);
            }
            if let Some(delay) = ai_delay_ms {
                config = config.with_ai_delay_ms(delay);
            }
            config.validate()?;
            tui::run_tui(config).await
        }
        Command::Demo {
            config,
            single_player,
            board_size,
            seed,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();

            let mut config = GameConfig::load_or_default(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;
            if let Some(size) = board_size {
                config = config.with_board_size(size);
            }
            if let Some(seed) = seed {
                config = config.with_ai_seed(seed);
            }
            config.validate()?;
            demo::run_demo(config, single_player, seed).await
        }
    }
}
