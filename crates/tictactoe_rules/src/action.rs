//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{Position, Symbol};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a symbol placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The symbol placed.
    pub symbol: Symbol,
    /// Where it was placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(symbol: Symbol, position: Position) -> Self {
        Self { symbol, position }
    }

    /// Returns the symbol of this move.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.symbol, self.position.label())
    }
}

/// Error that can occur when validating or applying a move.
///
/// Every variant is a rejected operation: nothing was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is outside 0-8 or the cell is already occupied.
    #[display("Cell {} is out of range or already occupied", _0)]
    InvalidMove(usize),

    /// The move was submitted for the symbol that is not to move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Symbol),

    /// The round has not been started yet.
    #[display("Round has not started")]
    RoundNotStarted,

    /// The round already ended in a win or draw.
    #[display("Round is already over")]
    RoundAlreadyOver,

    /// The opponent was asked to move on a full board.
    #[display("No moves available")]
    NoMovesAvailable,
}

impl std::error::Error for MoveError {}
