//! Best-of-N tic-tac-toe matches.
//!
//! # Architecture
//!
//! - **Config**: [`MatchConfig`] for a match, [`MatchSettings`] for TOML files
//! - **Controller**: [`MatchController`] owns the match state, sequences
//!   rounds, keeps the [`Score`] and moves for the computer
//! - **Session**: [`MatchSession`] drives delayed computer moves on tokio
//!
//! # Example
//!
//! ```
//! use tictactoe_match::{MatchConfig, MatchController, MatchPhase, MatchVerdict};
//!
//! let mut controller = MatchController::seeded(7);
//! controller.start_match(MatchConfig::human_vs_human(1))?;
//! for index in [0, 3, 1, 4, 2] {
//!     controller.submit_move(index)?;
//! }
//! assert_eq!(controller.match_phase(), MatchPhase::MatchEnded);
//! assert_eq!(controller.verdict(), Some(MatchVerdict::Player1Wins));
//! # Ok::<(), tictactoe_match::MatchError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod error;
mod score;
mod session;
mod snapshot;

pub use config::{
    ConfigError, DEFAULT_TOTAL_ROUNDS, MatchConfig, MatchMode, MatchSettings, Side,
};
pub use controller::{ComputerMoveTicket, MatchController, MatchPhase, starter_for_round};
pub use error::MatchError;
pub use score::{MatchVerdict, Score};
pub use session::MatchSession;
pub use snapshot::MatchSnapshot;
