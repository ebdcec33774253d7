//! Match controller: sequences rounds, keeps score and drives the computer.

use crate::config::{MatchConfig, Side};
use crate::error::MatchError;
use crate::score::{MatchVerdict, Score};
use crate::snapshot::MatchSnapshot;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tictactoe_rules::{
    Board, GameRng, GreedyOpponent, Move, MoveError, Opponent, Round, RoundOutcome, Symbol,
};
use tracing::{debug, info, instrument, warn};

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No match is running.
    AwaitingSetup,
    /// A round is accepting moves.
    RoundInProgress,
    /// A round finished and more rounds remain.
    RoundEnded,
    /// The last round finished.
    MatchEnded,
}

/// Handle for a deferred computer move.
///
/// Only the ticket the controller most recently issued can be redeemed.
/// Exiting, restarting or resetting invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComputerMoveTicket {
    generation: u64,
    round: u32,
    move_number: usize,
}

/// Symbol that opens round `round_number` (1-indexed): X on odd rounds, O on
/// even rounds.
pub fn starter_for_round(round_number: u32) -> Symbol {
    if round_number % 2 == 1 {
        Symbol::X
    } else {
        Symbol::O
    }
}

#[derive(Debug, Clone)]
struct ActiveMatch {
    config: MatchConfig,
    round_number: u32,
    score: Score,
    round: Round,
    phase: MatchPhase,
    last_outcome: Option<RoundOutcome>,
    pending: Option<ComputerMoveTicket>,
}

impl ActiveMatch {
    fn new(config: MatchConfig) -> Self {
        Self {
            config,
            round_number: 1,
            score: Score::default(),
            round: Round::started(starter_for_round(1)),
            phase: MatchPhase::RoundInProgress,
            last_outcome: None,
            pending: None,
        }
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        self.score.record(outcome);
        self.last_outcome = Some(outcome);
        self.pending = None;
        self.phase = if self.round_number >= *self.config.total_rounds() {
            MatchPhase::MatchEnded
        } else {
            MatchPhase::RoundEnded
        };
        info!(
            round = self.round_number,
            ?outcome,
            player1_wins = self.score.player1_wins,
            player2_wins = self.score.player2_wins,
            draws = self.score.draws,
            phase = ?self.phase,
            "Round finished"
        );
    }
}

/// Owns the match state and applies host commands to it.
///
/// Player 1 always plays X and player 2 always plays O. In
/// human-vs-computer mode player 2 is the computer.
pub struct MatchController {
    opponent: Box<dyn Opponent + Send>,
    computer_delay: Duration,
    generation: u64,
    active: Option<ActiveMatch>,
    last_config: Option<MatchConfig>,
}

impl std::fmt::Debug for MatchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchController")
            .field("computer_delay", &self.computer_delay)
            .field("generation", &self.generation)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Default for MatchController {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchController {
    /// Controller with an entropy-seeded computer and no move delay.
    pub fn new() -> Self {
        Self::with_opponent(GreedyOpponent::default())
    }

    /// Controller whose computer draws fallback moves from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_opponent(GreedyOpponent::new(GameRng::new(seed)))
    }

    /// Controller with a custom computer opponent.
    pub fn with_opponent(opponent: impl Opponent + Send + 'static) -> Self {
        Self {
            opponent: Box::new(opponent),
            computer_delay: Duration::ZERO,
            generation: 0,
            active: None,
            last_config: None,
        }
    }

    /// Sets the cosmetic pause before computer moves.
    ///
    /// With a zero delay the computer moves inside the call that handed it
    /// the turn. Otherwise a [`ComputerMoveTicket`] is left pending for the
    /// host to redeem through [`MatchController::play_computer_move`].
    pub fn with_computer_delay(mut self, delay: Duration) -> Self {
        self.computer_delay = delay;
        self
    }

    /// Starts a new match, discarding any current one.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] if the config has zero rounds.
    #[instrument(skip(self, config), fields(mode = ?config.mode(), total_rounds = config.total_rounds()))]
    pub fn start_match(&mut self, config: MatchConfig) -> Result<(), MatchError> {
        config.validate()?;
        self.generation += 1;
        self.last_config = Some(config.clone());
        self.active = Some(ActiveMatch::new(config));
        info!("Match started");
        self.queue_computer_move()
    }

    /// Submits a move for the side whose turn it is.
    ///
    /// In human-vs-computer mode only the human side may submit. If the
    /// move hands the turn to the computer, the computer answers before this
    /// returns (or a ticket is left pending when a delay is configured).
    /// If that answer fails, the human move is taken back and the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`MatchError::MatchNotStarted`] while awaiting setup
    /// - [`MatchError::MatchAlreadyOver`] after the last round
    /// - [`MoveError::RoundAlreadyOver`] between rounds
    /// - [`MoveError::NotYourTurn`] when the computer is to move
    /// - [`MoveError::InvalidMove`] for an occupied or out-of-range cell
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, index: usize) -> Result<(), MatchError> {
        let generation = self.generation;
        let active = self.active.as_mut().ok_or(MatchError::MatchNotStarted)?;
        if active.phase == MatchPhase::MatchEnded {
            return Err(MatchError::MatchAlreadyOver);
        }
        let symbol = active
            .round
            .to_move()
            .ok_or(MoveError::RoundAlreadyOver)?;
        if active.config.computer_symbol() == Some(symbol) {
            warn!(%symbol, "Rejected move submitted on the computer's turn");
            return Err(MoveError::NotYourTurn(symbol).into());
        }

        let saved = active.clone();
        active.round.apply_move(index, symbol)?;
        debug!(%symbol, index, "Move applied");

        if let Some(outcome) = active.round.outcome() {
            active.finish_round(outcome);
            return Ok(());
        }
        self.queue_or_restore(saved, generation)
    }

    /// Starts the next round after a round has ended.
    ///
    /// Odd rounds open with X, even rounds with O. When the computer opens,
    /// it moves as part of this call (or a ticket is left pending).
    ///
    /// # Errors
    ///
    /// - [`MatchError::MatchNotStarted`] while awaiting setup
    /// - [`MatchError::MatchAlreadyOver`] after the last round
    /// - [`MatchError::RoundNotOver`] while a round is being played
    #[instrument(skip(self))]
    pub fn advance_round(&mut self) -> Result<(), MatchError> {
        let generation = self.generation;
        let active = self.active.as_mut().ok_or(MatchError::MatchNotStarted)?;
        match active.phase {
            MatchPhase::RoundEnded => {}
            MatchPhase::MatchEnded => return Err(MatchError::MatchAlreadyOver),
            MatchPhase::RoundInProgress => return Err(MatchError::RoundNotOver),
            MatchPhase::AwaitingSetup => return Err(MatchError::MatchNotStarted),
        }

        let saved = active.clone();
        active.round_number += 1;
        let starter = starter_for_round(active.round_number);
        active.round = Round::started(starter);
        active.phase = MatchPhase::RoundInProgress;
        info!(round = active.round_number, %starter, "Round started");
        self.queue_or_restore(saved, generation)
    }

    /// Abandons the round being played and replays the same round number
    /// from an empty board with the same starter. The abandoned round is not
    /// scored.
    ///
    /// # Errors
    ///
    /// - [`MatchError::MatchNotStarted`] while awaiting setup
    /// - [`MatchError::MatchAlreadyOver`] after the last round
    /// - [`MoveError::RoundAlreadyOver`] between rounds
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) -> Result<(), MatchError> {
        let generation = self.generation;
        let active = self.active.as_mut().ok_or(MatchError::MatchNotStarted)?;
        match active.phase {
            MatchPhase::RoundInProgress => {}
            MatchPhase::RoundEnded => return Err(MoveError::RoundAlreadyOver.into()),
            MatchPhase::MatchEnded => return Err(MatchError::MatchAlreadyOver),
            MatchPhase::AwaitingSetup => return Err(MatchError::MatchNotStarted),
        }

        let saved = active.clone();
        active.round = Round::started(active.round.starter());
        active.pending = None;
        self.generation += 1;
        info!(round = active.round_number, "Round reset");
        self.queue_or_restore(saved, generation)
    }

    /// Abandons the match and forgets its configuration.
    #[instrument(skip(self))]
    pub fn exit_match(&mut self) {
        self.discard();
        self.last_config = None;
        info!("Match exited");
    }

    /// Abandons the match. The score is not kept; [`MatchController::rematch`]
    /// can start a fresh match with the same configuration.
    #[instrument(skip(self))]
    pub fn restart_match(&mut self) {
        self.discard();
        info!("Match restarted");
    }

    /// Starts a new match with the most recent configuration.
    ///
    /// # Errors
    ///
    /// [`MatchError::MatchNotStarted`] if no match was ever configured (or
    /// the last one was exited).
    #[instrument(skip(self))]
    pub fn rematch(&mut self) -> Result<(), MatchError> {
        let config = self.last_config.clone().ok_or(MatchError::MatchNotStarted)?;
        self.start_match(config)
    }

    /// Plays a computer move that was deferred by the configured delay.
    ///
    /// # Errors
    ///
    /// [`MatchError::StaleComputerMove`] if `ticket` is not the one
    /// currently pending, for example because the match was exited or the
    /// round reset after the ticket was issued.
    #[instrument(skip(self))]
    pub fn play_computer_move(&mut self, ticket: ComputerMoveTicket) -> Result<(), MatchError> {
        let pending = self.active.as_ref().and_then(|a| a.pending);
        if pending != Some(ticket) {
            warn!(?pending, "Discarding stale computer move");
            return Err(MatchError::StaleComputerMove);
        }
        self.play_computer_turn()
    }

    fn discard(&mut self) {
        self.active = None;
        self.generation += 1;
    }

    /// Hands the turn to the computer. If its reply fails, the match is put
    /// back to `saved` so the rejected command leaves no trace.
    fn queue_or_restore(&mut self, saved: ActiveMatch, generation: u64) -> Result<(), MatchError> {
        let result = self.queue_computer_move();
        if let Err(err) = &result {
            warn!(error = %err, "Computer reply failed, restoring match");
            self.active = Some(saved);
            self.generation = generation;
        }
        result
    }

    /// Hands the turn to the computer if it is to move.
    fn queue_computer_move(&mut self) -> Result<(), MatchError> {
        let generation = self.generation;
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        let computer = active.config.computer_symbol();
        if computer.is_none() || active.round.to_move() != computer {
            return Ok(());
        }

        if self.computer_delay.is_zero() {
            return self.play_computer_turn();
        }
        let ticket = ComputerMoveTicket {
            generation,
            round: active.round_number,
            move_number: active.round.move_count(),
        };
        debug!(?ticket, delay = ?self.computer_delay, "Computer move deferred");
        active.pending = Some(ticket);
        Ok(())
    }

    fn play_computer_turn(&mut self) -> Result<(), MatchError> {
        let active = self.active.as_mut().ok_or(MatchError::MatchNotStarted)?;
        let own = active
            .round
            .to_move()
            .ok_or(MoveError::RoundAlreadyOver)?;
        let index = self
            .opponent
            .choose_move(active.round.board(), own, own.opponent())?;
        active.round.apply_move(index, own)?;
        active.pending = None;
        debug!(symbol = %own, index, "Computer moved");

        if let Some(outcome) = active.round.outcome() {
            active.finish_round(outcome);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Observers
    // ─────────────────────────────────────────────────────────────

    /// Board of the current (or just finished) round.
    pub fn current_board(&self) -> Option<&Board> {
        self.active.as_ref().map(|a| a.round.board())
    }

    /// Symbol to move, if a round is in progress.
    pub fn current_turn_symbol(&self) -> Option<Symbol> {
        self.active.as_ref().and_then(|a| a.round.to_move())
    }

    /// Running score; all zero while awaiting setup.
    pub fn score(&self) -> Score {
        self.active.as_ref().map(|a| a.score).unwrap_or_default()
    }

    /// Current round number (1-indexed).
    pub fn round_number(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.round_number)
    }

    /// Current phase.
    pub fn match_phase(&self) -> MatchPhase {
        self.active
            .as_ref()
            .map_or(MatchPhase::AwaitingSetup, |a| a.phase)
    }

    /// Outcome of the most recently finished round of this match.
    pub fn last_round_outcome(&self) -> Option<RoundOutcome> {
        self.active.as_ref().and_then(|a| a.last_outcome)
    }

    /// Match verdict once the last round has finished.
    pub fn verdict(&self) -> Option<MatchVerdict> {
        self.active
            .as_ref()
            .filter(|a| a.phase == MatchPhase::MatchEnded)
            .map(|a| a.score.verdict())
    }

    /// Configuration of the running match.
    pub fn config(&self) -> Option<&MatchConfig> {
        self.active.as_ref().map(|a| &a.config)
    }

    /// Moves of the current round.
    pub fn round_history(&self) -> &[Move] {
        match &self.active {
            Some(active) => active.round.history(),
            None => &[],
        }
    }

    /// Deferred computer move waiting for the delay to elapse.
    pub fn pending_computer_move(&self) -> Option<ComputerMoveTicket> {
        self.active.as_ref().and_then(|a| a.pending)
    }

    /// Configured computer delay.
    pub fn computer_delay(&self) -> Duration {
        self.computer_delay
    }

    /// One-line description of what is happening.
    pub fn status_line(&self) -> String {
        let Some(active) = self.active.as_ref() else {
            return "Choose players to start a match".to_string();
        };
        let config = &active.config;
        match active.phase {
            MatchPhase::AwaitingSetup => "Choose players to start a match".to_string(),
            MatchPhase::RoundInProgress => match active.round.to_move() {
                Some(symbol) => {
                    format!("{} ({})'s Turn", config.name_of(Side::for_symbol(symbol)), symbol)
                }
                None => active.round.status_line(),
            },
            MatchPhase::RoundEnded => match active.last_outcome {
                Some(RoundOutcome::Win(symbol)) => format!(
                    "{} wins round {}!",
                    config.name_of(Side::for_symbol(symbol)),
                    active.round_number
                ),
                _ => format!("Round {} ended in a draw!", active.round_number),
            },
            MatchPhase::MatchEnded => {
                let score = active.score;
                match score.verdict().winner() {
                    Some(side) => {
                        let (won, lost) = match side {
                            Side::Player1 => (score.player1_wins, score.player2_wins),
                            Side::Player2 => (score.player2_wins, score.player1_wins),
                        };
                        format!("{} wins the match {}-{}!", config.name_of(side), won, lost)
                    }
                    None => format!(
                        "The match is tied {}-{}!",
                        score.player1_wins, score.player2_wins
                    ),
                }
            }
        }
    }

    /// Score formatted with player names.
    pub fn score_line(&self) -> String {
        let score = self.score();
        let (p1, p2) = self
            .active
            .as_ref()
            .map_or(("Player 1", "Player 2"), |a| {
                (
                    a.config.name_of(Side::Player1),
                    a.config.name_of(Side::Player2),
                )
            });
        format!(
            "{}: {} | {}: {} | Draws: {}",
            p1, score.player1_wins, p2, score.player2_wins, score.draws
        )
    }

    /// Serializable view of the whole controller.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.match_phase(),
            config: self.config().cloned(),
            round_number: self.round_number(),
            board: self.current_board().cloned(),
            turn: self.current_turn_symbol(),
            score: self.score(),
            last_round_outcome: self.last_round_outcome(),
            verdict: self.verdict(),
            computer_move_pending: self.pending_computer_move().is_some(),
            status: self.status_line(),
            score_line: self.score_line(),
        }
    }
}
