//! Running score and match verdict.

use crate::config::Side;
use serde::{Deserialize, Serialize};
use tictactoe_rules::RoundOutcome;

/// Round results so far, indexed by participant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new,
)]
pub struct Score {
    /// Rounds won by player 1 (X).
    pub player1_wins: u32,
    /// Rounds won by player 2 (O).
    pub player2_wins: u32,
    /// Drawn rounds.
    pub draws: u32,
}

impl Score {
    /// Counts one finished round.
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome.winner().map(Side::for_symbol) {
            Some(Side::Player1) => self.player1_wins += 1,
            Some(Side::Player2) => self.player2_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Number of rounds counted.
    pub fn rounds_played(&self) -> u32 {
        self.player1_wins + self.player2_wins + self.draws
    }

    /// Who is ahead on round wins.
    pub fn verdict(&self) -> MatchVerdict {
        match self.player1_wins.cmp(&self.player2_wins) {
            std::cmp::Ordering::Greater => MatchVerdict::Player1Wins,
            std::cmp::Ordering::Less => MatchVerdict::Player2Wins,
            std::cmp::Ordering::Equal => MatchVerdict::Tie,
        }
    }
}

/// Result of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchVerdict {
    /// Player 1 won more rounds.
    Player1Wins,
    /// Player 2 won more rounds.
    Player2Wins,
    /// Both won the same number of rounds.
    Tie,
}

impl MatchVerdict {
    /// The winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchVerdict::Player1Wins => Some(Side::Player1),
            MatchVerdict::Player2Wins => Some(Side::Player2),
            MatchVerdict::Tie => None,
        }
    }
}
