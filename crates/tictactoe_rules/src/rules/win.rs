//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Symbol};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three cell indices that win when held by one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine(pub [usize; 3]);

impl WinLine {
    /// The indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// The symbol holding all three cells, if any.
    pub fn holder(&self, board: &Board) -> Option<Symbol> {
        let [a, b, c] = self.0;
        match board.get(a) {
            Cell::Occupied(symbol)
                if board.get(b) == Cell::Occupied(symbol)
                    && board.get(c) == Cell::Occupied(symbol) =>
            {
                Some(symbol)
            }
            _ => None,
        }
    }
}

/// The 8 winning lines in scan order.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    // Columns
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    // Diagonals
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

/// Returns the first line (rows, then columns, then diagonals) held by a
/// single symbol.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<WinLine> {
    WIN_LINES
        .iter()
        .copied()
        .find(|line| line.holder(board).is_some())
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(symbol)` if the symbol holds a full line, `None` otherwise.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Symbol> {
    WIN_LINES.iter().find_map(|line| line.holder(board))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(marks: &[(usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(i, s) in marks {
            board.set(i, s).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(winner(&Board::new()), None);
        assert_eq!(winning_line(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(&[(0, Symbol::X), (1, Symbol::X), (2, Symbol::X)]);
        assert_eq!(winner(&board), Some(Symbol::X));
        assert_eq!(winning_line(&board), Some(WinLine([0, 1, 2])));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[(2, Symbol::O), (4, Symbol::O), (6, Symbol::O)]);
        assert_eq!(winner(&board), Some(Symbol::O));
        assert_eq!(winning_line(&board), Some(WinLine([2, 4, 6])));
    }

    #[test]
    fn test_every_line_detected() {
        for line in WIN_LINES {
            let marks: Vec<_> = line.indices().iter().map(|&i| (i, Symbol::O)).collect();
            assert_eq!(winner(&board_with(&marks)), Some(Symbol::O), "{line:?}");
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[(0, Symbol::X), (1, Symbol::O), (2, Symbol::X)]);
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_row_reported_before_column() {
        // X holds both the top row and the left column.
        let board = board_with(&[
            (0, Symbol::X),
            (1, Symbol::X),
            (2, Symbol::X),
            (3, Symbol::X),
            (6, Symbol::X),
        ]);
        assert_eq!(winning_line(&board), Some(WinLine([0, 1, 2])));
    }
}
