//! Round engine: one play of the grid from an empty board to a win or draw.

use crate::action::{Move, MoveError};
use crate::position::Position;
use crate::rules::winner;
use crate::{Board, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Lifecycle of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Created but not started.
    NotStarted,
    /// Accepting moves.
    InProgress,
    /// A symbol completed a line.
    Won(Symbol),
    /// The board filled with no line completed.
    Drawn,
}

impl RoundStatus {
    /// Returns true for `Won` and `Drawn`.
    pub fn is_over(&self) -> bool {
        matches!(self, RoundStatus::Won(_) | RoundStatus::Drawn)
    }
}

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The symbol won the round.
    Win(Symbol),
    /// Nobody completed a line.
    Draw,
}

impl RoundOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Symbol> {
        match self {
            RoundOutcome::Win(symbol) => Some(*symbol),
            RoundOutcome::Draw => None,
        }
    }

    /// Returns true if the round was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, RoundOutcome::Draw)
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Win(symbol) => write!(f, "Player {} Wins!", symbol),
            RoundOutcome::Draw => write!(f, "Game ended in a draw!"),
        }
    }
}

/// One round of tic-tac-toe.
///
/// A rejected [`Round::apply_move`] leaves the round exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    board: Board,
    starter: Symbol,
    to_move: Symbol,
    status: RoundStatus,
    history: Vec<Move>,
}

impl Round {
    /// Creates a round that `starter` will open once started.
    pub fn new(starter: Symbol) -> Self {
        Self {
            board: Board::new(),
            starter,
            to_move: starter,
            status: RoundStatus::NotStarted,
            history: Vec::new(),
        }
    }

    /// Creates and starts a round in one step.
    pub fn started(starter: Symbol) -> Self {
        let mut round = Self::new(starter);
        round.start();
        round
    }

    /// Starts the round on an empty board with the starter to move.
    ///
    /// Has no effect unless the round is `NotStarted`.
    #[instrument(skip(self), fields(starter = %self.starter))]
    pub fn start(&mut self) {
        if self.status != RoundStatus::NotStarted {
            return;
        }
        self.board = Board::new();
        self.to_move = self.starter;
        self.status = RoundStatus::InProgress;
        debug!("Round started");
    }

    /// Places `symbol` at `index` and advances the round.
    ///
    /// # Errors
    ///
    /// - [`MoveError::RoundNotStarted`] before [`Round::start`]
    /// - [`MoveError::RoundAlreadyOver`] once won or drawn
    /// - [`MoveError::NotYourTurn`] if `symbol` is not to move
    /// - [`MoveError::InvalidMove`] for an occupied or out-of-range cell
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn apply_move(&mut self, index: usize, symbol: Symbol) -> Result<RoundStatus, MoveError> {
        match self.status {
            RoundStatus::NotStarted => return Err(MoveError::RoundNotStarted),
            RoundStatus::Won(_) | RoundStatus::Drawn => return Err(MoveError::RoundAlreadyOver),
            RoundStatus::InProgress => {}
        }
        if symbol != self.to_move {
            return Err(MoveError::NotYourTurn(symbol));
        }
        let position = Position::from_index(index).ok_or(MoveError::InvalidMove(index))?;
        self.board.set(index, symbol)?;
        self.history.push(Move::new(symbol, position));

        if let Some(winner) = winner(&self.board) {
            self.status = RoundStatus::Won(winner);
            info!(%winner, moves = self.history.len(), "Round won");
        } else if self.board.is_full() {
            self.status = RoundStatus::Drawn;
            info!("Round drawn");
        } else {
            self.to_move = symbol.opponent();
        }
        Ok(self.status)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Symbol that opened (or will open) this round.
    pub fn starter(&self) -> Symbol {
        self.starter
    }

    /// Symbol to move, or `None` unless the round is in progress.
    pub fn to_move(&self) -> Option<Symbol> {
        (self.status == RoundStatus::InProgress).then_some(self.to_move)
    }

    /// Current status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Outcome once the round is over.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.status {
            RoundStatus::Won(symbol) => Some(RoundOutcome::Win(symbol)),
            RoundStatus::Drawn => Some(RoundOutcome::Draw),
            RoundStatus::NotStarted | RoundStatus::InProgress => None,
        }
    }

    /// Moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves played so far.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// One-line status for display.
    pub fn status_line(&self) -> String {
        match self.status {
            RoundStatus::NotStarted => "Waiting to start".to_string(),
            RoundStatus::InProgress => format!("Player {}'s Turn", self.to_move),
            RoundStatus::Won(symbol) => RoundOutcome::Win(symbol).to_string(),
            RoundStatus::Drawn => RoundOutcome::Draw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::{O, X};

    #[test]
    fn moves_before_start_are_rejected() {
        let mut round = Round::new(X);
        assert_eq!(round.apply_move(0, X), Err(MoveError::RoundNotStarted));
        assert_eq!(round.to_move(), None);
    }

    #[test]
    fn turn_flips_after_each_move() {
        let mut round = Round::started(X);
        assert_eq!(round.apply_move(4, X), Ok(RoundStatus::InProgress));
        assert_eq!(round.to_move(), Some(O));
        assert_eq!(round.apply_move(0, X), Err(MoveError::NotYourTurn(X)));
        assert_eq!(round.status_line(), "Player O's Turn");
    }

    #[test]
    fn o_can_open_a_round() {
        let mut round = Round::started(O);
        assert_eq!(round.apply_move(0, X), Err(MoveError::NotYourTurn(X)));
        assert_eq!(round.apply_move(0, O), Ok(RoundStatus::InProgress));
        assert_eq!(round.to_move(), Some(X));
    }

    #[test]
    fn occupied_cell_leaves_round_unchanged() {
        let mut round = Round::started(X);
        round.apply_move(4, X).unwrap();
        let before = round.clone();

        assert_eq!(round.apply_move(4, O), Err(MoveError::InvalidMove(4)));
        assert_eq!(round.apply_move(11, O), Err(MoveError::InvalidMove(11)));
        assert_eq!(round, before);
    }

    #[test]
    fn win_ends_round_and_rejects_further_moves() {
        let mut round = Round::started(X);
        for (index, symbol) in [(0, X), (3, O), (1, X), (4, O)] {
            round.apply_move(index, symbol).unwrap();
        }
        assert_eq!(round.apply_move(2, X), Ok(RoundStatus::Won(X)));
        assert_eq!(round.outcome(), Some(RoundOutcome::Win(X)));
        assert_eq!(round.to_move(), None);
        assert_eq!(round.apply_move(5, O), Err(MoveError::RoundAlreadyOver));
        assert_eq!(round.status_line(), "Player X Wins!");
    }

    #[test]
    fn full_board_without_line_is_drawn() {
        let mut round = Round::started(X);
        // X O X / X O O / O X X
        for (index, symbol) in [
            (0, X),
            (1, O),
            (2, X),
            (4, O),
            (3, X),
            (5, O),
            (7, X),
            (6, O),
            (8, X),
        ] {
            round.apply_move(index, symbol).unwrap();
        }
        assert_eq!(round.status(), RoundStatus::Drawn);
        assert_eq!(round.outcome(), Some(RoundOutcome::Draw));
        assert_eq!(round.move_count(), 9);
        assert_eq!(round.status_line(), "Game ended in a draw!");
    }
}
