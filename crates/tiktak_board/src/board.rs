//! Board occupancy and line detection.

use crate::{BoardError, BoardErrorKind, Cell, Symbol};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// N×N board mapping every cell to an optional mark.
///
/// After [`initialize`](Self::initialize) every cell in `[0, N) × [0, N)` has
/// exactly one entry and no other cell ever appears. The map is ordered, so
/// [`vacant_cells`](Self::vacant_cells) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    size: i32,
    cells: BTreeMap<Cell, Option<Symbol>>,
}

impl BoardState {
    /// Creates an empty board of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::InvalidSize`] if `size` is not positive.
    #[track_caller]
    pub fn new(size: i32) -> Result<Self, BoardError> {
        let mut board = Self::default();
        board.initialize(size)?;
        Ok(board)
    }

    /// Resets to an empty `size × size` grid, discarding all occupancy.
    ///
    /// The board is left untouched when `size` is rejected.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn initialize(&mut self, size: i32) -> Result<(), BoardError> {
        if size <= 0 {
            return Err(BoardError::new(BoardErrorKind::InvalidSize(size)));
        }

        self.cells.clear();
        for x in 0..size {
            for y in 0..size {
                self.cells.insert(Cell::new(x, y), None);
            }
        }
        self.size = size;
        debug!(cells = self.cells.len(), "Board initialized");
        Ok(())
    }

    /// Side length of the board.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether `cell` lies on the board.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Marks `cell` with `symbol`.
    ///
    /// Returns `false` without mutating anything if the cell is off the board
    /// or already occupied.
    #[instrument(skip(self))]
    pub fn try_place(&mut self, cell: Cell, symbol: Symbol) -> bool {
        let Some(slot) = self.cells.get_mut(&cell) else {
            debug!("Cell is off the board");
            return false;
        };
        if let Some(existing) = slot {
            debug!(%existing, "Cell already occupied");
            return false;
        }
        *slot = Some(symbol);
        true
    }

    /// Mark at `cell`, or `None` when the cell is empty or off the board.
    pub fn symbol_at(&self, cell: Cell) -> Option<Symbol> {
        self.cells.get(&cell).copied().flatten()
    }

    /// All unoccupied cells, ordered by `x` then `y`.
    pub fn vacant_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .filter(|(_, symbol)| symbol.is_none())
            .map(|(cell, _)| *cell)
            .collect()
    }

    /// Whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.values().all(Option::is_some)
    }

    /// Iterates every cell with its mark in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Option<Symbol>)> + '_ {
        self.cells.iter().map(|(cell, symbol)| (*cell, *symbol))
    }

    /// Whether `symbol` owns a full line after a placement at `last_placed`.
    ///
    /// Checks the row through `last_placed.y`, the column through
    /// `last_placed.x`, and both diagonals. The diagonals are checked no matter
    /// where the piece landed.
    #[instrument(skip(self))]
    pub fn has_line_for(&self, symbol: Symbol, last_placed: Cell) -> bool {
        self.owns_row(symbol, last_placed.y)
            || self.owns_column(symbol, last_placed.x)
            || self.owns_main_diagonal(symbol)
            || self.owns_anti_diagonal(symbol)
    }

    fn owns_row(&self, symbol: Symbol, y: i32) -> bool {
        (0..self.size).all(|x| self.symbol_at(Cell::new(x, y)) == Some(symbol))
    }

    fn owns_column(&self, symbol: Symbol, x: i32) -> bool {
        (0..self.size).all(|y| self.symbol_at(Cell::new(x, y)) == Some(symbol))
    }

    fn owns_main_diagonal(&self, symbol: Symbol) -> bool {
        (0..self.size).all(|i| self.symbol_at(Cell::new(i, i)) == Some(symbol))
    }

    fn owns_anti_diagonal(&self, symbol: Symbol) -> bool {
        (0..self.size).all(|i| self.symbol_at(Cell::new(i, self.size - 1 - i)) == Some(symbol))
    }
}
