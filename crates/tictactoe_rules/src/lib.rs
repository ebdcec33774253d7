//! Pure tic-tac-toe game logic.
//!
//! - [`Board`] stores nine cells in row-major order
//! - [`rules`] detects wins and draws against the eight fixed lines
//! - [`Round`] runs one round from an empty board to a win or draw
//! - [`opponent`] picks moves for the computer side
//!
//! # Example
//!
//! ```
//! use tictactoe_rules::{Round, RoundStatus, Symbol};
//!
//! let mut round = Round::started(Symbol::X);
//! for (index, symbol) in [(0, Symbol::X), (3, Symbol::O), (1, Symbol::X), (4, Symbol::O)] {
//!     round.apply_move(index, symbol).unwrap();
//! }
//! assert_eq!(round.apply_move(2, Symbol::X), Ok(RoundStatus::Won(Symbol::X)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod opponent;
mod position;
mod rng;
mod round;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use opponent::{GreedyOpponent, Opponent};
pub use position::Position;
pub use rng::GameRng;
pub use round::{Round, RoundOutcome, RoundStatus};
pub use rules::{WIN_LINES, WinLine};
pub use types::{Board, CELL_COUNT, Cell, Symbol};
