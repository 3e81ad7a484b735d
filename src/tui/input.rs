//! Keyboard navigation on the board.

use crossterm::event::KeyCode;

use crate::games::tictactoe::Position;

/// Moves the cursor one square for arrow keys (or `hjkl`), clamping at edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Left | KeyCode::Char('h') => (row, col.saturating_sub(1)),
        KeyCode::Right | KeyCode::Char('l') => (row, (col + 1).min(2)),
        KeyCode::Up | KeyCode::Char('k') => (row.saturating_sub(1), col),
        KeyCode::Down | KeyCode::Char('j') => ((row + 1).min(2), col),
        _ => return cursor,
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Maps the number keys `1`-`9` to board squares, left to right, top to bottom.
pub fn digit_position(c: char) -> Option<Position> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Position::from_index(d as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_move_within_board() {
        use Position::*;
        assert_eq!(move_cursor(Center, KeyCode::Right), MiddleRight);
        assert_eq!(move_cursor(Center, KeyCode::Up), TopCenter);
        assert_eq!(move_cursor(TopLeft, KeyCode::Down), MiddleLeft);
        assert_eq!(move_cursor(BottomCenter, KeyCode::Left), BottomLeft);
    }

    #[test]
    fn test_edges_clamp() {
        use Position::*;
        assert_eq!(move_cursor(TopLeft, KeyCode::Left), TopLeft);
        assert_eq!(move_cursor(TopLeft, KeyCode::Up), TopLeft);
        assert_eq!(move_cursor(BottomRight, KeyCode::Right), BottomRight);
        assert_eq!(move_cursor(BottomRight, KeyCode::Down), BottomRight);
    }

    #[test]
    fn test_vim_keys() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Char('h')), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::Center, KeyCode::Char('j')), Position::BottomCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Char('x')), Position::Center);
    }

    #[test]
    fn test_digit_position() {
        assert_eq!(digit_position('1'), Some(Position::TopLeft));
        assert_eq!(digit_position('9'), Some(Position::BottomRight));
        assert_eq!(digit_position('0'), None);
        assert_eq!(digit_position('a'), None);
    }
}
