//! Notifications emitted by a running match.
//!
//! Rendering, audio and UI layers consume these from the channel handed out
//! by [`MatchSession::spawn`](crate::MatchSession::spawn). The channel belongs
//! to the match instance; dropping the session closes it.

use crate::Player;
use tiktak_board::{Cell, Symbol};
use tokio::sync::mpsc;
use tracing::trace;

/// Something observable happened in the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// A new match began.
    MatchStarted,
    /// The board was rebuilt empty at the given size.
    BoardReset {
        /// Side length of the new board.
        size: i32,
    },
    /// The turn passed to another player.
    ActivePlayerChanged(Player),
    /// A piece landed. Fired before win and draw evaluation.
    PiecePlaced {
        /// Where the piece landed.
        cell: Cell,
        /// Which mark was placed.
        symbol: Symbol,
    },
    /// The AI started or stopped thinking. External input is refused while pending.
    AiTurnChanged {
        /// Whether an AI move is scheduled.
        pending: bool,
    },
    /// The match finished.
    MatchEnded {
        /// The winner, or `None` on a draw.
        winner: Option<Player>,
        /// Whether the board filled up with no line.
        is_draw: bool,
    },
}

/// Sending half of the match notification channel.
///
/// A closed receiver is not an error: the match keeps running with nobody
/// watching.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<MatchEvent>>,
}

impl EventSink {
    /// Creates a sink and the receiver that observes it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that drops every event.
    pub fn detached() -> Self {
        Self { tx: None }
    }

    /// Emits an event.
    pub fn emit(&self, event: MatchEvent) {
        trace!(?event, "Emitting match event");
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
