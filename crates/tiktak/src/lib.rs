//! TikTak - turn-based tic-tac-toe with a random AI opponent.
//!
//! # Architecture
//!
//! - **Board**: occupancy and line detection, in the `tiktak_board` crate
//! - **Controller**: roster, turn order and win/draw detection
//! - **Session**: single-writer task serializing input with the AI timer
//! - **Events**: notifications for rendering and UI layers
//!
//! # Example
//!
//! ```no_run
//! use tiktak::{Cell, GameConfig, MatchSession};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (handle, mut events) = MatchSession::spawn(&GameConfig::default())?;
//! handle.start_match(true).await?;
//! handle.submit_placement(Cell::new(1, 1)).await?;
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod config;
mod controller;
mod error;
mod events;
mod player;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, MAX_BOARD_SIZE};

// Crate-level exports - Match state machine
pub use controller::{AiTicket, MatchController, MatchSnapshot, MatchState, PLAYER_COUNT};

// Crate-level exports - Session
pub use error::{SessionError, SessionErrorKind};
pub use session::{MatchHandle, MatchSession, PlacementOutcome};

// Crate-level exports - Events and players
pub use ai::pick_random_cell;
pub use events::{EventSink, MatchEvent};
pub use player::Player;

// Crate-level exports - Board types
pub use tiktak_board::{BoardError, BoardErrorKind, BoardState, Cell, Symbol};
