//! Pure N×N tic-tac-toe board.
//!
//! Owns cell occupancy, placement and vacancy queries, and line-based win
//! detection. Turn order and players live in the `tiktak` crate; this crate
//! only ever deals in abstract [`Symbol`] values.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod cell;
mod error;
mod symbol;

pub use board::BoardState;
pub use cell::Cell;
pub use error::{BoardError, BoardErrorKind};
pub use symbol::Symbol;
