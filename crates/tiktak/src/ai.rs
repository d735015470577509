//! Uniform-random move selection.

use rand::Rng;
use tiktak_board::Cell;

/// Picks one of `vacant` uniformly at random, or `None` when it is empty.
pub fn pick_random_cell<R: Rng + ?Sized>(vacant: &[Cell], rng: &mut R) -> Option<Cell> {
    if vacant.is_empty() {
        return None;
    }
    Some(vacant[rng.random_range(0..vacant.len())])
}
