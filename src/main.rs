//! Tally Toe - unified CLI
//!
//! Plays the game in the terminal and manages the saved scoreboard.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{self, BufRead, Write};
use tally_toe::{MemoryStore, ScoreStore, ScoreTracker, Settings, SqliteStore, run_tui};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(&cli.config)?.apply_env();
    if let Some(db) = cli.db {
        settings = settings.with_db_path(db);
    }

    match cli.command.unwrap_or_default() {
        Command::Play { ephemeral } => run_play(&settings, ephemeral),
        Command::Scores { json } => run_scores(&settings, json),
        Command::ResetScores { yes } => run_reset_scores(&settings, yes),
    }
}

/// Run the terminal game
fn run_play(settings: &Settings, ephemeral: bool) -> Result<()> {
    initialize_file_tracing(settings.log_file())?;

    let store: Box<dyn ScoreStore> = if ephemeral {
        info!("Keeping scores in memory");
        Box::new(MemoryStore::new())
    } else {
        Box::new(SqliteStore::open(settings.db_path())?)
    };

    run_tui(settings, store)
}

/// Print the saved scoreboard
#[instrument(skip(settings))]
fn run_scores(settings: &Settings, json: bool) -> Result<()> {
    initialize_stderr_tracing();

    let tracker = ScoreTracker::new(SqliteStore::open(settings.db_path())?);
    let scores = tracker.scores();

    if json {
        println!("{}", serde_json::to_string_pretty(scores)?);
        return Ok(());
    }

    println!("Player X wins: {}", scores.wins_x());
    println!("Player O wins: {}", scores.wins_o());
    println!("Draws:         {}", scores.draws());
    println!("Games played:  {}", scores.total_games());

    let entries = tracker.store().entries()?;
    if let Some(latest) = entries.iter().map(|e| *e.updated_at()).max() {
        println!("Last updated:  {}", latest.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

/// Zero the saved scoreboard after confirmation
#[instrument(skip(settings))]
fn run_reset_scores(settings: &Settings, yes: bool) -> Result<()> {
    initialize_stderr_tracing();

    let mut tracker = ScoreTracker::new(SqliteStore::open(settings.db_path())?);

    if !yes {
        print!("Are you sure you want to reset scores? [y/N] ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;

        if !is_affirmative(&answer) {
            println!("Scores kept: {}", tracker.scores());
            return Ok(());
        }
    }

    tracker.reset_all()?;
    println!("Scores reset.");
    Ok(())
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Logs to a file so the TUI owns the terminal.
fn initialize_file_tracing(path: &str) -> Result<bool> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file '{}'", path))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(report_subscriber(installed))
}

fn initialize_stderr_tracing() -> bool {
    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();

    report_subscriber(installed)
}

/// Returns true if the subscriber was installed, warning on stderr otherwise.
fn report_subscriber<E: std::fmt::Display>(installed: std::result::Result<(), E>) -> bool {
    match installed {
        Ok(()) => true,
        Err(e) => {
            eprintln!("warning: logging not initialized: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("nope"));
    }

    #[test]
    fn test_report_subscriber() {
        assert!(report_subscriber::<String>(Ok(())));
        assert!(!report_subscriber(Err("a global default trace dispatcher has already been set")));
    }

    #[test]
    fn test_second_subscriber_is_reported() {
        initialize_stderr_tracing();
        assert!(!initialize_stderr_tracing());
    }

    #[test]
    fn test_cli_defaults_to_play() {
        let cli = Cli::parse_from(["tally_toe"]);
        assert_eq!(cli.command.unwrap_or_default(), Command::Play { ephemeral: false });
        assert_eq!(cli.config, std::path::PathBuf::from("tally_toe.toml"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["tally_toe", "--db", "x.db", "reset-scores", "--yes"]);
        assert_eq!(cli.db.as_deref(), Some("x.db"));
        assert_eq!(cli.command, Some(Command::ResetScores { yes: true }));

        let cli = Cli::parse_from(["tally_toe", "scores", "--json"]);
        assert_eq!(cli.command, Some(Command::Scores { json: true }));
    }
}
