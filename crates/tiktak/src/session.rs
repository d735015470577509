//! Single-writer match session.
//!
//! A [`MatchSession`] is a tokio task that owns a [`MatchController`] and a
//! command queue. External requests from [`MatchHandle`] and the AI timer
//! both arrive on that queue, so at most one placement is evaluated at a time.
//! The AI delay is an abortable task; restarting the match aborts it, and the
//! controller re-checks the ticket in case the abort lost the race.

use crate::controller::{AiTicket, MatchController, MatchSnapshot};
use crate::{EventSink, GameConfig, MatchEvent, SessionError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tiktak_board::{BoardError, Cell, Symbol};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Result of an externally submitted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlacementOutcome {
    /// The piece landed.
    #[display("placed")]
    Placed,
    /// The cell is occupied or off the board.
    #[display("rejected")]
    Rejected,
    /// No match is running.
    #[display("no match running")]
    NotRunning,
    /// The AI is thinking; input is gated until it moves.
    #[display("AI is thinking")]
    AiThinking,
}

impl PlacementOutcome {
    /// Whether the piece landed.
    pub fn is_placed(self) -> bool {
        self == PlacementOutcome::Placed
    }
}

#[derive(Debug)]
enum Command {
    StartMatch {
        single_player: bool,
        reply: oneshot::Sender<Result<(), BoardError>>,
    },
    SubmitPlacement {
        cell: Cell,
        reply: oneshot::Sender<PlacementOutcome>,
    },
    Snapshot {
        reply: oneshot::Sender<MatchSnapshot>,
    },
    AiMoveDue(AiTicket),
    Shutdown,
}

/// Cloneable front door to a running [`MatchSession`].
#[derive(Debug, Clone)]
pub struct MatchHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl MatchHandle {
    /// Starts a new match, abandoning any match in progress.
    #[instrument(skip(self))]
    pub async fn start_match(&self, single_player: bool) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::StartMatch {
            single_player,
            reply,
        })?;
        rx.await.map_err(|_| SessionError::closed())??;
        Ok(())
    }

    /// Submits a placement on behalf of the active human player.
    ///
    /// Refused with [`PlacementOutcome::AiThinking`] while an AI move is
    /// scheduled. Rejections are normal outcomes, not errors.
    #[instrument(skip(self))]
    pub async fn submit_placement(&self, cell: Cell) -> Result<PlacementOutcome, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::SubmitPlacement { cell, reply })?;
        rx.await.map_err(|_| SessionError::closed())
    }

    /// Copies out the current match state.
    pub async fn snapshot(&self) -> Result<MatchSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply })?;
        rx.await.map_err(|_| SessionError::closed())
    }

    /// Cells nobody has marked yet.
    pub async fn vacant_cells(&self) -> Result<Vec<Cell>, SessionError> {
        Ok(self.snapshot().await?.vacant_cells())
    }

    /// Mark at `cell`; `None` for empty or off-board cells.
    pub async fn symbol_at(&self, cell: Cell) -> Result<Option<Symbol>, SessionError> {
        Ok(self.snapshot().await?.symbol_at(cell))
    }

    /// Whether an AI move is scheduled.
    pub async fn is_ai_turn_pending(&self) -> Result<bool, SessionError> {
        Ok(self.snapshot().await?.ai_turn_pending)
    }

    /// Stops the session, discarding any scheduled AI move.
    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        self.tx.send(command).map_err(|_| SessionError::closed())
    }
}

/// Task owning one [`MatchController`].
pub struct MatchSession {
    controller: MatchController,
    ai_delay: Duration,
    rng: StdRng,
    commands: mpsc::UnboundedReceiver<Command>,
    timer_tx: mpsc::WeakUnboundedSender<Command>,
    ai_timer: Option<JoinHandle<()>>,
}

impl MatchSession {
    /// Spawns a session task on the current tokio runtime.
    ///
    /// Returns the handle used to drive it and the receiver its
    /// [`MatchEvent`]s are delivered on. The task ends when every handle is
    /// dropped or [`MatchHandle::shutdown`] is called.
    ///
    /// # Errors
    ///
    /// Fails if the configured board size is invalid.
    #[instrument(skip(config))]
    pub fn spawn(
        config: &GameConfig,
    ) -> Result<(MatchHandle, mpsc::UnboundedReceiver<MatchEvent>), SessionError> {
        let (events, events_rx) = EventSink::channel();
        let controller = MatchController::new(config, events)?;
        let seed = config.ai_seed().unwrap_or_else(|| rand::rng().random());
        let (tx, commands) = mpsc::unbounded_channel();

        let session = Self {
            controller,
            ai_delay: config.ai_delay(),
            rng: StdRng::seed_from_u64(seed),
            commands,
            timer_tx: tx.downgrade(),
            ai_timer: None,
        };
        info!(seed, ai_delay_ms = config.ai_delay_ms(), "Spawning match session");
        tokio::spawn(session.run());

        Ok((MatchHandle { tx }, events_rx))
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::StartMatch {
                    single_player,
                    reply,
                } => {
                    self.cancel_ai_timer();
                    let _ = reply.send(self.controller.start_match(single_player));
                }
                Command::SubmitPlacement { cell, reply } => {
                    let outcome = self.place_from_input(cell);
                    self.schedule_ai_if_requested();
                    let _ = reply.send(outcome);
                }
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.controller.snapshot());
                }
                Command::AiMoveDue(ticket) => {
                    self.ai_timer = None;
                    self.controller.play_ai_turn(ticket, &mut self.rng);
                    self.schedule_ai_if_requested();
                }
                Command::Shutdown => break,
            }
        }
        self.cancel_ai_timer();
        debug!("Match session stopped");
    }

    fn place_from_input(&mut self, cell: Cell) -> PlacementOutcome {
        if !self.controller.is_running() {
            return PlacementOutcome::NotRunning;
        }
        if self.controller.is_ai_turn_pending() {
            warn!(%cell, "Input refused while AI is thinking");
            return PlacementOutcome::AiThinking;
        }
        if self.controller.submit_placement(cell) {
            PlacementOutcome::Placed
        } else {
            PlacementOutcome::Rejected
        }
    }

    fn schedule_ai_if_requested(&mut self) {
        let Some(ticket) = self.controller.take_ai_request() else {
            return;
        };
        self.cancel_ai_timer();

        let delay = self.ai_delay;
        let tx = self.timer_tx.clone();
        debug!(?ticket, ?delay, "Scheduling AI move");
        self.ai_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(Command::AiMoveDue(ticket));
            }
        }));
    }

    fn cancel_ai_timer(&mut self) {
        if let Some(timer) = self.ai_timer.take() {
            debug!("Cancelling scheduled AI move");
            timer.abort();
        }
    }
}
