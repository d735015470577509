//! Marks players place on the board.

use serde::{Deserialize, Serialize};

/// A mark placed on a cell.
///
/// Two variants today; the enum is the place to add more marks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Symbol {
    /// First-player mark.
    X,
    /// Second-player mark.
    O,
}

impl Symbol {
    /// The mark that moves first in a two-player match.
    pub const FIRST: Symbol = Symbol::X;

    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}
