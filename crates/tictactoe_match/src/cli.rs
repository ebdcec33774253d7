//! Command-line interface for tictactoe_match.

use clap::Parser;
use std::path::PathBuf;
use tictactoe_match::MatchMode;

/// Play a best-of-N tic-tac-toe match in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe_match")]
#[command(about = "Best-of-N tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML settings file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Who is playing
    #[arg(short, long, value_enum)]
    pub mode: Option<MatchMode>,

    /// Number of rounds in the match
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// Name of player 1 (X)
    #[arg(long)]
    pub player1: Option<String>,

    /// Name of player 2 (O)
    #[arg(long)]
    pub player2: Option<String>,

    /// Seed for the computer's random moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before the computer moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Print each state as JSON instead of a drawn board
    #[arg(long)]
    pub json: bool,
}
