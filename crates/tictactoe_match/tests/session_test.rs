//! Timer-driven computer moves through the async session.

use std::time::Duration;
use tictactoe_match::{MatchConfig, MatchController, MatchPhase, MatchSession};
use tictactoe_rules::Symbol;

fn delayed_session(delay_ms: u64) -> MatchSession {
    MatchSession::new(
        MatchController::seeded(3).with_computer_delay(Duration::from_millis(delay_ms)),
    )
}

#[tokio::test]
async fn test_delayed_computer_move_is_played() {
    let mut session = delayed_session(10);
    session
        .start_match(MatchConfig::human_vs_computer(3))
        .await
        .unwrap();

    let snapshot = session.submit_move(4).await.unwrap();
    assert!(snapshot.computer_move_pending);
    assert_eq!(snapshot.turn, Some(Symbol::O));

    let snapshot = session.wait_for_computer().await;
    assert!(!snapshot.computer_move_pending);
    assert_eq!(snapshot.turn, Some(Symbol::X));
    assert_eq!(snapshot.board.unwrap().count(Symbol::O), 1);
}

#[tokio::test]
async fn test_exit_cancels_pending_computer_move() {
    let mut session = delayed_session(100);
    session
        .start_match(MatchConfig::human_vs_computer(3))
        .await
        .unwrap();
    session.submit_move(4).await.unwrap();

    let snapshot = session.exit_match().await;
    assert_eq!(snapshot.phase, MatchPhase::AwaitingSetup);

    tokio::time::sleep(Duration::from_millis(250)).await;
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.phase, MatchPhase::AwaitingSetup);
    assert_eq!(snapshot.board, None);
}

#[tokio::test]
async fn test_rematch_never_receives_stale_move() {
    let mut session = delayed_session(100);
    session
        .start_match(MatchConfig::human_vs_computer(3))
        .await
        .unwrap();
    session.submit_move(4).await.unwrap();

    session.restart_match().await;
    let snapshot = session.rematch().await.unwrap();
    assert_eq!(snapshot.turn, Some(Symbol::X));

    tokio::time::sleep(Duration::from_millis(250)).await;
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.board.unwrap().count(Symbol::O), 0);
    assert_eq!(snapshot.turn, Some(Symbol::X));
}

#[tokio::test]
async fn test_reset_round_cancels_pending_move() {
    let mut session = delayed_session(100);
    session
        .start_match(MatchConfig::human_vs_computer(3))
        .await
        .unwrap();
    session.submit_move(0).await.unwrap();

    let snapshot = session.reset_round().await.unwrap();
    assert!(!snapshot.computer_move_pending);

    tokio::time::sleep(Duration::from_millis(250)).await;
    let snapshot = session.snapshot().await;
    assert!(snapshot.board.unwrap().empty_indices().len() == 9);
    assert_eq!(snapshot.round_number, Some(1));
}

#[tokio::test]
async fn test_zero_delay_moves_synchronously() {
    let mut session = delayed_session(0);
    session
        .start_match(MatchConfig::human_vs_computer(3))
        .await
        .unwrap();

    let snapshot = session.submit_move(4).await.unwrap();
    assert!(!snapshot.computer_move_pending);
    assert_eq!(snapshot.board.unwrap().count(Symbol::O), 1);
}

#[tokio::test]
async fn test_delayed_opening_move_after_advance() {
    let mut session = delayed_session(10);
    let mut snapshot = session
        .start_match(MatchConfig::human_vs_computer(3))
        .await
        .unwrap();

    while snapshot.phase == MatchPhase::RoundInProgress {
        let index = snapshot.board.as_ref().unwrap().empty_indices()[0];
        session.submit_move(index).await.unwrap();
        snapshot = session.wait_for_computer().await;
    }
    assert_eq!(snapshot.phase, MatchPhase::RoundEnded);

    let snapshot = session.advance_round().await.unwrap();
    assert_eq!(snapshot.round_number, Some(2));
    assert!(snapshot.computer_move_pending);
    assert_eq!(snapshot.turn, Some(Symbol::O));
    assert_eq!(snapshot.board.unwrap().count(Symbol::O), 0);

    let snapshot = session.wait_for_computer().await;
    assert!(!snapshot.computer_move_pending);
    assert_eq!(snapshot.turn, Some(Symbol::X));
    let board = snapshot.board.unwrap();
    assert_eq!(board.count(Symbol::O), 1);
    assert_eq!(board.count(Symbol::X), 0);
}
