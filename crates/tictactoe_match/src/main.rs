//! Terminal host for a best-of-N tic-tac-toe match.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tictactoe_match::{MatchController, MatchPhase, MatchSession, MatchSettings, MatchSnapshot};
use tictactoe_rules::Position;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    run(settings, cli.json).await
}

/// Reads the settings file (if any) and applies command-line overrides.
#[instrument(skip(cli))]
fn load_settings(cli: &Cli) -> Result<MatchSettings> {
    let mut settings = match &cli.config {
        Some(path) => MatchSettings::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MatchSettings::default(),
    };
    if let Some(mode) = cli.mode {
        settings.set_mode(mode);
    }
    if let Some(rounds) = cli.rounds {
        settings.set_total_rounds(rounds);
    }
    if let Some(name) = &cli.player1 {
        settings.set_player1_name(name.clone());
    }
    if let Some(name) = &cli.player2 {
        settings.set_player2_name(name.clone());
    }
    if let Some(seed) = cli.seed {
        settings.set_seed(seed);
    }
    if let Some(delay_ms) = cli.delay_ms {
        settings.set_computer_delay_ms(delay_ms);
    }
    debug!(?settings, "Settings resolved");
    Ok(settings)
}

async fn run(settings: MatchSettings, json: bool) -> Result<()> {
    let controller = match settings.seed() {
        Some(seed) => MatchController::seeded(*seed),
        None => MatchController::new(),
    }
    .with_computer_delay(settings.computer_delay());

    let mut session = MatchSession::new(controller);
    let mut snapshot = session.start_match(settings.to_config()).await?;
    info!("Match running");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if snapshot.computer_move_pending {
            snapshot = session.wait_for_computer().await;
        }
        render(&snapshot, json)?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim().to_lowercase();

        let result = match (input.as_str(), snapshot.phase) {
            ("q" | "quit", _) => {
                session.exit_match().await;
                break;
            }
            ("r" | "reset", MatchPhase::RoundInProgress) => session.reset_round().await,
            ("n" | "next" | "", MatchPhase::RoundEnded) => session.advance_round().await,
            ("p" | "play", MatchPhase::MatchEnded) => session.rematch().await,
            (_, MatchPhase::RoundInProgress) => match Position::from_label_or_number(&input) {
                Some(position) => session.submit_move(position.to_index()).await,
                None => {
                    println!("Enter a cell number 1-9 or a name like \"center\"");
                    continue;
                }
            },
            _ => {
                println!("Unrecognized command");
                continue;
            }
        };

        match result {
            Ok(next) => snapshot = next,
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}

fn render(snapshot: &MatchSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    if let (Some(round), Some(config)) = (snapshot.round_number, &snapshot.config) {
        println!("\nRound {} of {}", round, config.total_rounds());
    }
    if let Some(board) = &snapshot.board {
        println!("{}", board.display());
    }
    println!("{}", snapshot.status);
    println!("{}", snapshot.score_line);

    let prompt = match snapshot.phase {
        MatchPhase::RoundInProgress => "Cell (1-9), r to reset the round, q to quit:",
        MatchPhase::RoundEnded => "Enter or n for the next round, q to quit:",
        MatchPhase::MatchEnded => "p to play again, q to quit:",
        MatchPhase::AwaitingSetup => "q to quit:",
    };
    println!("{}", prompt);
    Ok(())
}
