//! Computer opponent.
//!
//! A greedy one-ply policy: take a win if one exists, otherwise block the
//! first opposing threat, otherwise play a random empty cell. It never looks
//! further ahead and has no preference for the centre or corners.

use crate::rng::GameRng;
use crate::rules::winner;
use crate::{Board, MoveError, Symbol};
use tracing::{debug, instrument};

/// Something that picks a cell for the computer side.
pub trait Opponent {
    /// Chooses an empty cell index for `own` to play.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoMovesAvailable`] when the board is full.
    fn choose_move(
        &mut self,
        board: &Board,
        own: Symbol,
        opponent: Symbol,
    ) -> Result<usize, MoveError>;
}

/// First ascending empty index where placing `symbol` completes a line.
fn completing_index(board: &Board, empty: &[usize], symbol: Symbol) -> Option<usize> {
    empty.iter().copied().find(|&index| {
        let mut trial = board.clone();
        trial.set(index, symbol).is_ok() && winner(&trial) == Some(symbol)
    })
}

/// Picks a move with win, then block, then random priority.
///
/// # Errors
///
/// Returns [`MoveError::NoMovesAvailable`] when the board has no empty cell.
#[instrument(skip(board, rng))]
pub fn choose_move(
    board: &Board,
    own: Symbol,
    opponent: Symbol,
    rng: &mut GameRng,
) -> Result<usize, MoveError> {
    let empty = board.empty_indices();
    if empty.is_empty() {
        return Err(MoveError::NoMovesAvailable);
    }

    if let Some(index) = completing_index(board, &empty, own) {
        debug!(index, "Taking winning cell");
        return Ok(index);
    }

    if let Some(index) = completing_index(board, &empty, opponent) {
        debug!(index, "Blocking opponent");
        return Ok(index);
    }

    let index = rng.choose(&empty).ok_or(MoveError::NoMovesAvailable)?;
    debug!(index, "Random fallback");
    Ok(index)
}

/// The default computer opponent, backed by a [`GameRng`].
#[derive(Debug, Clone)]
pub struct GreedyOpponent {
    rng: GameRng,
}

impl GreedyOpponent {
    /// Creates an opponent drawing its fallback moves from `rng`.
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Creates an opponent with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl Default for GreedyOpponent {
    fn default() -> Self {
        Self::new(GameRng::from_entropy())
    }
}

impl Opponent for GreedyOpponent {
    fn choose_move(
        &mut self,
        board: &Board,
        own: Symbol,
        opponent: Symbol,
    ) -> Result<usize, MoveError> {
        choose_move(board, own, opponent, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::{O, X};

    fn board_with(marks: &[(usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(i, s) in marks {
            board.set(i, s).unwrap();
        }
        board
    }

    #[test]
    fn takes_win_over_block() {
        // O can win at 5 (row 3,4,5); X threatens 2 (row 0,1,2).
        let board = board_with(&[(0, X), (1, X), (3, O), (4, O), (8, X)]);
        let mut rng = GameRng::new(0);
        assert_eq!(choose_move(&board, O, X, &mut rng), Ok(5));
    }

    #[test]
    fn blocks_first_threat() {
        // X threatens 2 (top row) and 6 (left column); block the lower index.
        let board = board_with(&[(0, X), (1, X), (3, X), (4, O), (8, O)]);
        let mut rng = GameRng::new(0);
        let chosen = choose_move(&board, O, X, &mut rng).unwrap();
        assert_eq!(chosen, 2);
    }

    #[test]
    fn lowest_winning_index_is_taken() {
        // O wins at 2 (column 2,5,8) and at 6 (column 0,3,6); X threatens 1.
        let board = board_with(&[(0, O), (3, O), (5, O), (8, O), (4, X), (7, X)]);
        let mut rng = GameRng::new(0);
        assert_eq!(choose_move(&board, O, X, &mut rng), Ok(2));
    }

    #[test]
    fn random_fallback_is_reproducible() {
        let board = board_with(&[(4, X)]);
        let a = choose_move(&board, O, X, &mut GameRng::new(99)).unwrap();
        let b = choose_move(&board, O, X, &mut GameRng::new(99)).unwrap();
        assert_eq!(a, b);
        assert!(board.is_empty(a));
    }

    #[test]
    fn full_board_has_no_moves() {
        let board = board_with(&[
            (0, X),
            (1, O),
            (2, X),
            (3, O),
            (4, X),
            (5, X),
            (6, O),
            (7, X),
            (8, O),
        ]);
        let mut opponent = GreedyOpponent::seeded(3);
        assert_eq!(
            opponent.choose_move(&board, O, X),
            Err(MoveError::NoMovesAvailable)
        );
    }
}
