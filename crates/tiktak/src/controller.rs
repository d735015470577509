//! Turn-based match state machine.
//!
//! [`MatchController`] owns the roster, turn order and board for one match at
//! a time. It is synchronous and single-writer; the AI thinking delay lives in
//! [`MatchSession`](crate::MatchSession), which hands the controller an
//! [`AiTicket`] back once the delay elapses.

use crate::ai::pick_random_cell;
use crate::{EventSink, GameConfig, MatchEvent, Player};
use rand::Rng;
use tiktak_board::{BoardError, BoardState, Cell, Symbol};
use tracing::{debug, info, instrument, warn};

/// Number of players in every match.
pub const PLAYER_COUNT: usize = 2;

/// Lifecycle of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchState {
    /// No match has been started yet.
    NotStarted,
    /// Placements are being accepted.
    InProgress,
    /// The match finished.
    Ended {
        /// The winner, or `None` on a draw.
        winner: Option<Player>,
        /// Whether the board filled up with no line.
        is_draw: bool,
    },
}

/// Permission for one scheduled AI move.
///
/// Only honoured while the match that issued it is still running and the
/// same player is still to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AiTicket {
    generation: u64,
    player_index: usize,
}

/// Point-in-time copy of everything a front end may query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSnapshot {
    /// Match lifecycle.
    pub state: MatchState,
    /// Board contents.
    pub board: BoardState,
    /// Roster, empty before the first match.
    pub players: Vec<Player>,
    /// Whose turn it is, if a match has started.
    pub active_player: Option<Player>,
    /// Whether an AI move is scheduled. External input should wait.
    pub ai_turn_pending: bool,
}

impl MatchSnapshot {
    /// Cells nobody has marked yet.
    pub fn vacant_cells(&self) -> Vec<Cell> {
        self.board.vacant_cells()
    }

    /// Mark at `cell`; `None` for empty or off-board cells.
    pub fn symbol_at(&self, cell: Cell) -> Option<Symbol> {
        self.board.symbol_at(cell)
    }

    /// Whether placements are being accepted.
    pub fn is_running(&self) -> bool {
        self.state == MatchState::InProgress
    }
}

/// Match state machine.
#[derive(Debug)]
pub struct MatchController {
    board_size: i32,
    player_names: [String; PLAYER_COUNT],
    board: BoardState,
    players: Vec<Player>,
    active_index: usize,
    state: MatchState,
    ai_turn_pending: bool,
    pending_ai: Option<AiTicket>,
    generation: u64,
    events: EventSink,
}

impl MatchController {
    /// Creates a controller for matches described by `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configured board size is not positive.
    #[instrument(skip(config, events), fields(board_size = config.board_size()))]
    pub fn new(config: &GameConfig, events: EventSink) -> Result<Self, BoardError> {
        let board = BoardState::new(*config.board_size())?;
        Ok(Self {
            board_size: *config.board_size(),
            player_names: [
                config.player_one_name().clone(),
                config.player_two_name().clone(),
            ],
            board,
            players: Vec::new(),
            active_index: 0,
            state: MatchState::NotStarted,
            ai_turn_pending: false,
            pending_ai: None,
            generation: 0,
            events,
        })
    }

    /// Starts a fresh match, discarding whatever was in progress.
    ///
    /// Player 0 is human and plays `X`. Player 1 plays `O` and is AI-controlled
    /// when `single_player_vs_ai` is set. Against the AI the human always moves
    /// first; otherwise whoever holds `X` does. Any scheduled AI move from the
    /// previous match is invalidated.
    ///
    /// # Errors
    ///
    /// Fails before touching any state if the board size is invalid.
    #[instrument(skip(self))]
    pub fn start_match(&mut self, single_player_vs_ai: bool) -> Result<(), BoardError> {
        let board = BoardState::new(self.board_size)?;
        let [first_name, second_name] = self.player_names.clone();
        let players = vec![
            Player::new(0, first_name, Symbol::X, false),
            Player::new(1, second_name, Symbol::O, single_player_vs_ai),
        ];
        let active_index = if single_player_vs_ai {
            0
        } else {
            players
                .iter()
                .position(|p| p.symbol() == Symbol::FIRST)
                .unwrap_or(0)
        };

        let was_ai_pending = self.ai_turn_pending;
        self.generation += 1;
        self.board = board;
        self.players = players;
        self.active_index = active_index;
        self.ai_turn_pending = false;
        self.pending_ai = None;
        self.state = MatchState::InProgress;

        info!(generation = self.generation, "Match started");
        if was_ai_pending {
            self.events.emit(MatchEvent::AiTurnChanged { pending: false });
        }
        self.events.emit(MatchEvent::MatchStarted);
        self.events.emit(MatchEvent::BoardReset {
            size: self.board_size,
        });
        self.emit_active_player();
        Ok(())
    }

    /// Places the active player's mark at `cell`.
    ///
    /// Returns `false` with no effect if no match is running, or the cell is
    /// occupied or off the board. A successful placement either ends the match
    /// or passes the turn.
    #[instrument(skip(self))]
    pub fn submit_placement(&mut self, cell: Cell) -> bool {
        if !self.is_running() {
            debug!("Placement ignored, match not running");
            return false;
        }
        let Some(active) = self.players.get(self.active_index).cloned() else {
            return false;
        };
        if !self.board.try_place(cell, active.symbol()) {
            debug!("Placement rejected");
            return false;
        }

        debug!(player = %active, "Piece placed");
        self.events.emit(MatchEvent::PiecePlaced {
            cell,
            symbol: active.symbol(),
        });

        if self.board.has_line_for(active.symbol(), cell) {
            self.finish(Some(active), false);
        } else if self.board.vacant_cells().is_empty() {
            self.finish(None, true);
        } else {
            self.advance_turn();
        }
        true
    }

    /// Hands over the AI move that needs scheduling, if any.
    pub fn take_ai_request(&mut self) -> Option<AiTicket> {
        self.pending_ai.take()
    }

    /// Plays the AI move `ticket` was issued for.
    ///
    /// Stale tickets are dropped: the match must still be running, still be
    /// the one that issued the ticket, and still be waiting on that player.
    /// Returns the cell played, or `None` if nothing was placed.
    #[instrument(skip(self, rng))]
    pub fn play_ai_turn<R: Rng + ?Sized>(&mut self, ticket: AiTicket, rng: &mut R) -> Option<Cell> {
        if !self.is_ticket_current(ticket) {
            warn!(
                current_generation = self.generation,
                "Discarding stale AI move"
            );
            return None;
        }

        self.ai_turn_pending = false;
        self.events.emit(MatchEvent::AiTurnChanged { pending: false });

        let Some(cell) = pick_random_cell(&self.board.vacant_cells(), rng) else {
            warn!("AI found no vacant cell");
            return None;
        };
        debug!(%cell, "AI chose cell");
        self.submit_placement(cell).then_some(cell)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Whether placements are being accepted.
    pub fn is_running(&self) -> bool {
        self.state == MatchState::InProgress
    }

    /// Whether an AI move is scheduled.
    pub fn is_ai_turn_pending(&self) -> bool {
        self.ai_turn_pending
    }

    /// Player whose turn it is, once a match has started.
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_index)
    }

    /// Current roster.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Current board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Cells nobody has marked yet.
    pub fn vacant_cells(&self) -> Vec<Cell> {
        self.board.vacant_cells()
    }

    /// Mark at `cell`; `None` for empty or off-board cells.
    pub fn symbol_at(&self, cell: Cell) -> Option<Symbol> {
        self.board.symbol_at(cell)
    }

    /// Copies out the queryable state.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.state.clone(),
            board: self.board.clone(),
            players: self.players.clone(),
            active_player: self.active_player().cloned(),
            ai_turn_pending: self.ai_turn_pending,
        }
    }

    fn is_ticket_current(&self, ticket: AiTicket) -> bool {
        self.is_running()
            && self.ai_turn_pending
            && ticket.generation == self.generation
            && ticket.player_index == self.active_index
            && self.active_player().is_some_and(Player::is_ai)
    }

    fn advance_turn(&mut self) {
        self.active_index = (self.active_index + 1) % self.players.len();
        self.emit_active_player();

        if self.active_player().is_some_and(Player::is_ai) {
            self.ai_turn_pending = true;
            self.pending_ai = Some(AiTicket {
                generation: self.generation,
                player_index: self.active_index,
            });
            self.events.emit(MatchEvent::AiTurnChanged { pending: true });
        }
    }

    fn finish(&mut self, winner: Option<Player>, is_draw: bool) {
        match &winner {
            Some(player) => info!(winner = %player, "Match won"),
            None => info!("Match drawn"),
        }
        self.state = MatchState::Ended {
            winner: winner.clone(),
            is_draw,
        };
        self.events.emit(MatchEvent::MatchEnded { winner, is_draw });
    }

    fn emit_active_player(&self) {
        if let Some(player) = self.active_player() {
            self.events
                .emit(MatchEvent::ActivePlayerChanged(player.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn controller() -> (MatchController, UnboundedReceiver<MatchEvent>) {
        let (sink, rx) = EventSink::channel();
        let controller = MatchController::new(&GameConfig::default(), sink).unwrap();
        (controller, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<MatchEvent>) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_placement_before_start_is_ignored() {
        let (mut controller, mut rx) = controller();
        assert_eq!(controller.state(), &MatchState::NotStarted);
        assert!(!controller.submit_placement(Cell::new(0, 0)));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_start_emits_in_order() {
        let (mut controller, mut rx) = controller();
        controller.start_match(false).unwrap();
        let events = drain(&mut rx);
        assert_eq!(events[0], MatchEvent::MatchStarted);
        assert_eq!(events[1], MatchEvent::BoardReset { size: 3 });
        assert!(matches!(&events[2], MatchEvent::ActivePlayerChanged(p) if p.symbol() == Symbol::X));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_invalid_size_rejected_at_construction() {
        let config = GameConfig::default().with_board_size(0);
        assert!(MatchController::new(&config, EventSink::detached()).is_err());
    }

    #[test]
    fn test_stale_ticket_after_restart() {
        let (mut controller, _rx) = controller();
        controller.start_match(true).unwrap();
        assert!(controller.submit_placement(Cell::new(1, 1)));
        let ticket = controller.take_ai_request().expect("AI turn scheduled");

        controller.start_match(true).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(controller.play_ai_turn(ticket, &mut rng), None);
        assert_eq!(controller.vacant_cells().len(), 9);
        assert!(!controller.is_ai_turn_pending());
    }

    #[test]
    fn test_ticket_only_played_once() {
        let (mut controller, _rx) = controller();
        controller.start_match(true).unwrap();
        assert!(controller.submit_placement(Cell::new(0, 0)));
        let ticket = controller.take_ai_request().unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        assert!(controller.play_ai_turn(ticket, &mut rng).is_some());
        assert_eq!(controller.play_ai_turn(ticket, &mut rng), None);
        assert_eq!(controller.vacant_cells().len(), 7);
    }

    #[test]
    fn test_two_player_never_schedules_ai() {
        let (mut controller, _rx) = controller();
        controller.start_match(false).unwrap();
        assert!(controller.submit_placement(Cell::new(0, 0)));
        assert!(controller.submit_placement(Cell::new(1, 0)));
        assert!(controller.take_ai_request().is_none());
        assert!(!controller.is_ai_turn_pending());
    }
}
