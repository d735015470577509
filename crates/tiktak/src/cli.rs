//! Command-line interface for tiktak.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TikTak - tic-tac-toe against a friend or a random AI
#[derive(Parser, Debug)]
#[command(name = "tiktak")]
#[command(about = "Turn-based tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to game config (defaults are used if it does not exist)
        #[arg(short, long, default_value = "tiktak.toml")]
        config: PathBuf,

        /// Override the board size
        #[arg(long)]
        board_size: Option<i32>,

        /// Override the AI thinking delay in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,
    },

    /// Play one headless match with random moves and print the events
    Demo {
        /// Path to game config (defaults are used if it does not exist)
        #[arg(short, long, default_value = "tiktak.toml")]
        config: PathBuf,

        /// Let the built-in AI play the second seat
        #[arg(long)]
        single_player: bool,

        /// Override the board size
        #[arg(long)]
        board_size: Option<i32>,

        /// Fix the random seed for reproducible matches
        #[arg(long)]
        seed: Option<u64>,
    },
}
