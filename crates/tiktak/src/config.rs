//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Largest board side that still fits a typical terminal.
pub const MAX_BOARD_SIZE: i32 = 12;

/// Tunables for a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board.
    #[serde(default = "default_board_size")]
    board_size: i32,

    /// How long the AI "thinks" before moving, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Display name of the first (always human) player.
    #[serde(default = "default_player_one_name")]
    player_one_name: String,

    /// Display name of the second player.
    #[serde(default = "default_player_two_name")]
    player_two_name: String,

    /// Seed for the AI's move picker. Random when absent.
    #[serde(default)]
    ai_seed: Option<u64>,
}

fn default_board_size() -> i32 {
    3
}

fn default_ai_delay_ms() -> u64 {
    1000
}

fn default_player_one_name() -> String {
    "Player 1".to_string()
}

fn default_player_two_name() -> String {
    "Player 2".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            ai_delay_ms: default_ai_delay_ms(),
            player_one_name: default_player_one_name(),
            player_two_name: default_player_two_name(),
            ai_seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Rejects settings no match could start with.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size <= 0 {
            return Err(ConfigError::new(format!(
                "Invalid board_size: must be positive, got {}",
                self.board_size
            )));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::new(format!(
                "Invalid board_size: at most {}, got {}",
                MAX_BOARD_SIZE, self.board_size
            )));
        }
        Ok(())
    }

    /// Overrides the board size.
    pub fn with_board_size(mut self, board_size: i32) -> Self {
        self.board_size = board_size;
        self
    }

    /// Overrides the AI thinking delay.
    pub fn with_ai_delay_ms(mut self, ai_delay_ms: u64) -> Self {
        self.ai_delay_ms = ai_delay_ms;
        self
    }

    /// Fixes the AI's random seed.
    pub fn with_ai_seed(mut self, seed: u64) -> Self {
        self.ai_seed = Some(seed);
        self
    }

    /// The AI thinking delay.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
