//! Board error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong with a board operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoardErrorKind {
    /// Board sizes must be strictly positive.
    #[display("board size must be positive, got {}", _0)]
    InvalidSize(i32),
}

/// Board error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Board error: {} at {}:{}", kind, file, line)]
pub struct BoardError {
    /// Error kind.
    pub kind: BoardErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: BoardErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
