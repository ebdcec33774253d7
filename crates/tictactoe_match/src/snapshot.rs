//! Serializable view of a match for hosts to render.

use crate::config::MatchConfig;
use crate::controller::MatchPhase;
use crate::score::{MatchVerdict, Score};
use serde::{Deserialize, Serialize};
use tictactoe_rules::{Board, RoundOutcome, Symbol};

/// Everything a host needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Lifecycle phase.
    pub phase: MatchPhase,
    /// Configuration of the running match.
    pub config: Option<MatchConfig>,
    /// Current round number (1-indexed).
    pub round_number: Option<u32>,
    /// Board of the current or just finished round.
    pub board: Option<Board>,
    /// Symbol to move.
    pub turn: Option<Symbol>,
    /// Running score.
    pub score: Score,
    /// Outcome of the most recent round.
    pub last_round_outcome: Option<RoundOutcome>,
    /// Verdict once the match has ended.
    pub verdict: Option<MatchVerdict>,
    /// A delayed computer move is waiting.
    pub computer_move_pending: bool,
    /// Status line for display.
    pub status: String,
    /// Score line for display.
    pub score_line: String,
}
