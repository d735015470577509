//! Session error types.

use derive_more::{Display, Error};
use tiktak_board::BoardError;
use tracing::instrument;

/// Why a session request failed.
#[derive(Debug, Clone, Display)]
pub enum SessionErrorKind {
    /// The session task has stopped and no longer accepts commands.
    #[display("match session has shut down")]
    Closed,
    /// The match could not be (re)started.
    #[display("{}", _0)]
    Board(BoardError),
}

/// Session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", kind, file, line)]
pub struct SessionError {
    /// Error kind.
    pub kind: SessionErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: SessionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// The session is gone.
    #[track_caller]
    pub fn closed() -> Self {
        Self::new(SessionErrorKind::Closed)
    }
}

impl From<BoardError> for SessionError {
    #[track_caller]
    fn from(err: BoardError) -> Self {
        Self::new(SessionErrorKind::Board(err))
    }
}
