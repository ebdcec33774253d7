//! Match-level errors.

use tictactoe_rules::MoveError;

/// Error returned by a rejected match operation.
///
/// A rejected operation never mutates the match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// The move itself was rejected by the round.
    #[display("{}", _0)]
    Move(MoveError),

    /// The configuration cannot start a match.
    #[display("Invalid config: {}", _0)]
    InvalidConfig(String),

    /// No match is running.
    #[display("No match has been started")]
    MatchNotStarted,

    /// The last round has been played.
    #[display("Match is already over")]
    MatchAlreadyOver,

    /// The current round is still being played.
    #[display("Round is not over yet")]
    RoundNotOver,

    /// A deferred computer move belongs to a round that no longer exists.
    #[display("Computer move is stale")]
    StaleComputerMove,
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveError> for MatchError {
    fn from(err: MoveError) -> Self {
        MatchError::Move(err)
    }
}
