//! Match configuration.
//!
//! [`MatchConfig`] is what a match is started with. [`MatchSettings`] is the
//! TOML file form, which also carries host options such as the random seed
//! and the cosmetic computer delay.

use crate::error::MatchError;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictactoe_rules::Symbol;
use tracing::{debug, info, instrument};

/// Default number of rounds in a match.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 7;

/// Who is playing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Two humans share the board.
    #[value(alias = "hvh")]
    HumanVsHuman,
    /// Player 1 is human, player 2 is the computer.
    #[default]
    #[value(alias = "hvc")]
    HumanVsComputer,
}

impl MatchMode {
    /// Symbol played by the computer in this mode, if any.
    pub fn computer_symbol(self) -> Option<Symbol> {
        match self {
            MatchMode::HumanVsHuman => None,
            MatchMode::HumanVsComputer => Some(Side::Player2.symbol()),
        }
    }
}

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Always plays X.
    Player1,
    /// Always plays O.
    Player2,
}

impl Side {
    /// The symbol this side plays for the whole match.
    pub fn symbol(self) -> Symbol {
        match self {
            Side::Player1 => Symbol::X,
            Side::Player2 => Symbol::O,
        }
    }

    /// The side playing `symbol`.
    pub fn for_symbol(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Side::Player1,
            Symbol::O => Side::Player2,
        }
    }
}

/// Settings a match is started with. Immutable once the match begins.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Participant mode.
    mode: MatchMode,
    /// Display name of player 1 (X).
    player1_name: String,
    /// Display name of player 2 (O).
    player2_name: String,
    /// Number of rounds; must be at least 1.
    total_rounds: u32,
}

impl MatchConfig {
    /// Creates a configuration.
    pub fn new(
        mode: MatchMode,
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        total_rounds: u32,
    ) -> Self {
        Self {
            mode,
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            total_rounds,
        }
    }

    /// Two humans with default names.
    pub fn human_vs_human(total_rounds: u32) -> Self {
        Self::new(MatchMode::HumanVsHuman, "Player 1", "Player 2", total_rounds)
    }

    /// A human against the computer with default names.
    pub fn human_vs_computer(total_rounds: u32) -> Self {
        Self::new(MatchMode::HumanVsComputer, "Player 1", "Computer", total_rounds)
    }

    /// Checks that the configuration can start a match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfig`] when `total_rounds` is zero.
    #[instrument(skip(self), fields(total_rounds = self.total_rounds))]
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.total_rounds == 0 {
            return Err(MatchError::InvalidConfig(
                "total_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Display name for a side.
    pub fn name_of(&self, side: Side) -> &str {
        match side {
            Side::Player1 => &self.player1_name,
            Side::Player2 => &self.player2_name,
        }
    }

    /// Symbol played by the computer, if the mode has one.
    pub fn computer_symbol(&self) -> Option<Symbol> {
        self.mode.computer_symbol()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::human_vs_computer(DEFAULT_TOTAL_ROUNDS)
    }
}

/// Match settings as stored in a TOML file.
///
/// ```toml
/// mode = "human_vs_computer"
/// player1_name = "Ada"
/// total_rounds = 5
/// seed = 42
/// computer_delay_ms = 400
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Participant mode.
    #[serde(default)]
    mode: MatchMode,

    /// Display name of player 1 (X).
    #[serde(default = "default_player1_name")]
    player1_name: String,

    /// Display name of player 2 (O). Defaults per mode when absent.
    #[serde(default)]
    player2_name: Option<String>,

    /// Number of rounds.
    #[serde(default = "default_total_rounds")]
    total_rounds: u32,

    /// Seed for the computer's random fallback; OS entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Cosmetic pause before the computer moves, in milliseconds.
    #[serde(default)]
    computer_delay_ms: u64,
}

fn default_player1_name() -> String {
    "Player 1".to_string()
}

fn default_total_rounds() -> u32 {
    DEFAULT_TOTAL_ROUNDS
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            player1_name: default_player1_name(),
            player2_name: None,
            total_rounds: default_total_rounds(),
            seed: None,
            computer_delay_ms: 0,
        }
    }
}

impl MatchSettings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings = Self::from_toml(&content)?;
        info!(mode = ?settings.mode, total_rounds = settings.total_rounds, "Settings loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))
    }

    /// Overrides the mode.
    pub fn set_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
    }

    /// Overrides player 1's name.
    pub fn set_player1_name(&mut self, name: String) {
        self.player1_name = name;
    }

    /// Overrides player 2's name.
    pub fn set_player2_name(&mut self, name: String) {
        self.player2_name = Some(name);
    }

    /// Overrides the round count.
    pub fn set_total_rounds(&mut self, total_rounds: u32) {
        self.total_rounds = total_rounds;
    }

    /// Overrides the seed.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Overrides the computer delay.
    pub fn set_computer_delay_ms(&mut self, delay_ms: u64) {
        self.computer_delay_ms = delay_ms;
    }

    /// The computer delay as a [`Duration`].
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// Builds the match configuration these settings describe.
    pub fn to_config(&self) -> MatchConfig {
        let player2_name = self.player2_name.clone().unwrap_or_else(|| match self.mode {
            MatchMode::HumanVsHuman => "Player 2".to_string(),
            MatchMode::HumanVsComputer => "Computer".to_string(),
        });
        MatchConfig::new(
            self.mode,
            self.player1_name.clone(),
            player2_name,
            self.total_rounds,
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rounds_is_invalid() {
        let config = MatchConfig::human_vs_human(0);
        assert!(matches!(config.validate(), Err(MatchError::InvalidConfig(_))));
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn setters_build_a_config() {
        let config = MatchConfig::default()
            .with_player1_name("Ada".to_string())
            .with_total_rounds(3);
        assert_eq!(config.player1_name(), "Ada");
        assert_eq!(*config.total_rounds(), 3);
        assert_eq!(config.computer_symbol(), Some(Symbol::O));
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let settings = MatchSettings::from_toml("").unwrap();
        assert_eq!(settings, MatchSettings::default());
        let config = settings.to_config();
        assert_eq!(*config.total_rounds(), DEFAULT_TOTAL_ROUNDS);
        assert_eq!(config.player2_name(), "Computer");
    }

    #[test]
    fn human_vs_human_defaults_second_name() {
        let settings = MatchSettings::from_toml("mode = \"human_vs_human\"").unwrap();
        assert_eq!(settings.to_config().player2_name(), "Player 2");
        assert_eq!(settings.to_config().computer_symbol(), None);
    }

    #[test]
    fn bad_toml_reports_location() {
        let err = MatchSettings::from_toml("total_rounds = \"seven\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse settings"));
        assert!(err.file.ends_with("config.rs"));
    }
}
