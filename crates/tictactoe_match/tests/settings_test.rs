//! Loading match settings from TOML files.

use std::io::Write;
use std::time::Duration;
use tictactoe_match::{MatchController, MatchMode, MatchPhase, MatchSettings};

#[test]
fn test_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
mode = "human_vs_human"
player1_name = "Ada"
player2_name = "Bob"
total_rounds = 5
seed = 42
computer_delay_ms = 250
"#
    )
    .unwrap();

    let settings = MatchSettings::from_file(file.path()).unwrap();
    assert_eq!(*settings.mode(), MatchMode::HumanVsHuman);
    assert_eq!(*settings.seed(), Some(42));
    assert_eq!(settings.computer_delay(), Duration::from_millis(250));

    let config = settings.to_config();
    assert_eq!(config.player1_name(), "Ada");
    assert_eq!(config.player2_name(), "Bob");
    assert_eq!(*config.total_rounds(), 5);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MatchSettings::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read settings file"));
}

#[test]
fn test_zero_rounds_in_file_is_rejected_at_start() {
    let settings = MatchSettings::from_toml("total_rounds = 0").unwrap();
    let mut controller = MatchController::seeded(1);
    assert!(controller.start_match(settings.to_config()).is_err());
    assert_eq!(controller.match_phase(), MatchPhase::AwaitingSetup);
}
