//! Command-line interface for tally_toe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tally Toe - hot-seat tic-tac-toe with a persistent scoreboard
#[derive(Parser, Debug)]
#[command(name = "tally_toe")]
#[command(about = "Two-player tic-tac-toe with persistent scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML settings file (optional)
    #[arg(long, global = true, default_value = "tally_toe.toml")]
    pub config: PathBuf,

    /// Score database path (overrides config and TALLY_TOE_DB)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Keep scores in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Show the saved scores
    Scores {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset the saved scores to zero
    ResetScores {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Play { ephemeral: false }
    }
}
