//! Keyboard navigation over the board.
//!
//! Row 0 is drawn at the top, so `Up` decreases `y`.

use crossterm::event::KeyCode;
use tiktak::Cell;

/// Moves the cursor with the arrow keys, staying on a `size × size` board.
pub fn move_cursor(cursor: Cell, key: KeyCode, size: i32) -> Cell {
    let next = match key {
        KeyCode::Left => cursor.offset(-1, 0),
        KeyCode::Right => cursor.offset(1, 0),
        KeyCode::Up => cursor.offset(0, -1),
        KeyCode::Down => cursor.offset(0, 1),
        _ => return cursor,
    };
    if (0..size).contains(&next.x) && (0..size).contains(&next.y) {
        next
    } else {
        cursor
    }
}

/// Maps digits `1`-`9` onto the board in reading order.
///
/// Boards with more than nine cells have no digit layout and return `None`.
pub fn digit_to_cell(c: char, size: i32) -> Option<Cell> {
    let cells = size.checked_mul(size)?;
    if size <= 0 || cells > 9 {
        return None;
    }
    let digit = c.to_digit(10)? as i32;
    let index = digit - 1;
    if index < 0 || index >= cells {
        return None;
    }
    Some(Cell::new(index % size, index / size))
}
