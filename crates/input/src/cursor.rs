//! Board cursor.

use crate::types::GameAction;

/// Highlighted grid cell. Movement wraps around the board edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: u16,
    pub col: u16,
}

impl Cursor {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Apply a movement action on a `rows x columns` board.
    ///
    /// Returns `true` if the cursor moved. Non-movement actions are ignored.
    pub fn apply(&mut self, action: GameAction, rows: u16, columns: u16) -> bool {
        if rows == 0 || columns == 0 {
            return false;
        }
        self.clamp(rows, columns);

        let before = *self;
        match action {
            GameAction::MoveLeft => self.col = step_back(self.col, columns),
            GameAction::MoveRight => self.col = step_forward(self.col, columns),
            GameAction::MoveUp => self.row = step_back(self.row, rows),
            GameAction::MoveDown => self.row = step_forward(self.row, rows),
            GameAction::Select | GameAction::Restart => {}
        }
        *self != before
    }

    /// Pull the cursor back inside a board that may have shrunk.
    pub fn clamp(&mut self, rows: u16, columns: u16) {
        self.row = self.row.min(rows.saturating_sub(1));
        self.col = self.col.min(columns.saturating_sub(1));
    }

    /// Row-major card index under the cursor.
    pub fn index(&self, columns: u16) -> usize {
        self.row as usize * columns as usize + self.col as usize
    }
}

/// Previous position on an axis of `len` cells, wrapping to the far end.
fn step_back(pos: u16, len: u16) -> u16 {
    pos.checked_sub(1).unwrap_or(len - 1)
}

/// Next position on an axis of `len` cells, wrapping to zero.
fn step_forward(pos: u16, len: u16) -> u16 {
    match pos.checked_add(1) {
        Some(next) if next < len => next,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_and_wraps() {
        let mut cursor = Cursor::default();
        assert!(cursor.apply(GameAction::MoveLeft, 2, 3));
        assert_eq!(cursor, Cursor::new(0, 2));
        assert!(cursor.apply(GameAction::MoveRight, 2, 3));
        assert_eq!(cursor, Cursor::new(0, 0));
        assert!(cursor.apply(GameAction::MoveUp, 2, 3));
        assert_eq!(cursor, Cursor::new(1, 0));
        assert!(cursor.apply(GameAction::MoveDown, 2, 3));
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_non_movement_is_ignored() {
        let mut cursor = Cursor::new(1, 1);
        assert!(!cursor.apply(GameAction::Select, 2, 2));
        assert!(!cursor.apply(GameAction::Restart, 2, 2));
        assert!(!cursor.apply(GameAction::MoveLeft, 0, 0));
        assert_eq!(cursor, Cursor::new(1, 1));
    }

    #[test]
    fn test_single_column_does_not_move() {
        let mut cursor = Cursor::default();
        assert!(!cursor.apply(GameAction::MoveRight, 2, 1));
        assert!(cursor.apply(GameAction::MoveDown, 2, 1));
    }

    #[test]
    fn test_wraps_on_widest_board() {
        let mut cursor = Cursor::new(0, 0);
        assert!(cursor.apply(GameAction::MoveLeft, 2, u16::MAX));
        assert_eq!(cursor, Cursor::new(0, u16::MAX - 1));
        assert!(cursor.apply(GameAction::MoveRight, 2, u16::MAX));
        assert_eq!(cursor, Cursor::new(0, 0));

        let mut cursor = Cursor::new(u16::MAX - 1, 0);
        assert!(cursor.apply(GameAction::MoveDown, u16::MAX, 2));
        assert_eq!(cursor.row, 0);
    }

    #[test]
    fn test_index_is_row_major() {
        assert_eq!(Cursor::new(0, 0).index(4), 0);
        assert_eq!(Cursor::new(1, 2).index(4), 6);
        assert_eq!(Cursor::new(3, 3).index(4), 15);
    }

    #[test]
    fn test_clamp_after_board_shrinks() {
        let mut cursor = Cursor::new(5, 5);
        cursor.clamp(2, 3);
        assert_eq!(cursor, Cursor::new(1, 2));
    }
}
