//! Terminal UI for tic-tac-toe.

mod app;
mod confetti;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

pub use app::{App, Confirmation};
pub use confetti::{BURST_LENGTH, Confetti, PARTICLE_COUNT, Particle};

use crate::config::Settings;
use crate::db::ScoreStore;
use crate::scores::ScoreTracker;

/// Runs the game until the user quits.
///
/// Logging must already point somewhere other than the terminal.
#[instrument(skip_all)]
pub fn run_tui<S: ScoreStore>(settings: &Settings, store: S) -> Result<()> {
    info!("Starting tic-tac-toe TUI");

    let tracker = ScoreTracker::new(store);
    let mut app = App::new(tracker, settings);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, settings.frame_interval());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    info!(scores = %app.scores(), "TUI closed");
    res
}

/// Draw, wait up to one frame for input, advance animations.
fn run_app<S: ScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
    frame: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        let area = terminal.draw(|f| ui::draw(f, &*app))?.area;
        app.set_viewport(area);

        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;
    }

    Ok(())
}
