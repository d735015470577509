//! Match participants.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tiktak_board::Symbol;

/// A participant in a match.
///
/// Built once at match start and never mutated while the match runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Player {
    id: u8,
    #[new(into)]
    name: String,
    symbol: Symbol,
    is_ai: bool,
}

impl Player {
    /// Roster slot of this player.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mark this player places.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Whether moves are generated automatically.
    pub fn is_ai(&self) -> bool {
        self.is_ai
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
