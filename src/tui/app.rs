//! Application state and logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::confetti::Confetti;
use super::input::{digit_position, move_cursor};
use super::ui;
use crate::config::Settings;
use crate::db::ScoreStore;
use crate::games::tictactoe::{GameEngine, GameStatus, MoveResult, Position};
use crate::scores::{ScoreRecord, ScoreTracker};

/// A destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Abandon the current game.
    Restart,
    /// Zero the scoreboard.
    ResetScores,
}

impl Confirmation {
    /// Question shown to the user.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Restart => "Are you sure you want to restart the game?",
            Self::ResetScores => "Are you sure you want to reset scores?",
        }
    }
}

/// Main application state: one game, one scoreboard.
pub struct App<S> {
    engine: GameEngine,
    tracker: ScoreTracker<S>,
    cursor: Position,
    pending: Option<Confirmation>,
    confetti: Confetti,
    rng: StdRng,
    confetti_enabled: bool,
    confirm_destructive: bool,
    notice: Option<String>,
    viewport: Rect,
    should_quit: bool,
}

impl<S: ScoreStore> App<S> {
    /// Creates the application around an already loaded tracker.
    #[instrument(skip_all)]
    pub fn new(tracker: ScoreTracker<S>, settings: &Settings) -> Self {
        Self {
            engine: GameEngine::new(),
            tracker,
            cursor: Position::Center,
            pending: None,
            confetti: Confetti::new(),
            rng: StdRng::from_entropy(),
            confetti_enabled: *settings.confetti(),
            confirm_destructive: *settings.confirm_destructive(),
            notice: None,
            viewport: Rect::default(),
            should_quit: false,
        }
    }

    /// Replaces the confetti RNG (deterministic runs).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Gets the current game.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Gets the scoreboard.
    pub fn scores(&self) -> &ScoreRecord {
        self.tracker.scores()
    }

    /// Gets the score tracker.
    pub fn tracker(&self) -> &ScoreTracker<S> {
        &self.tracker
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Confirmation waiting for an answer, if any.
    pub fn pending(&self) -> Option<Confirmation> {
        self.pending
    }

    /// The confetti effect.
    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Last error worth showing, such as a failed score write.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Returns true once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records the size of the last drawn frame.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    /// The text under the board.
    pub fn turn_indicator(&self) -> String {
        match self.engine.status() {
            GameStatus::InProgress => format!("Player {}'s turn", self.engine.current_player()),
            GameStatus::Won { winner, .. } => format!("Player {} wins!", winner),
            GameStatus::Draw => "It's a draw!".to_string(),
        }
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.pending.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.cancel(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.request(Confirmation::Restart),
            KeyCode::Char('s') | KeyCode::Char('S') => self.request(Confirmation::ResetScores),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.play(self.cursor);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            code => self.cursor = move_cursor(self.cursor, code),
        }
    }

    /// Handles a mouse event; a left click on a square plays it.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.pending.is_some() || event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(pos) = ui::cell_at(self.viewport, event.column, event.row) {
            debug!(?pos, "Square clicked");
            self.cursor = pos;
            self.play(pos);
        }
    }

    /// Plays `pos` for the current player and scores a finished game.
    #[instrument(skip(self))]
    pub fn play(&mut self, pos: Position) -> MoveResult {
        let result = self.engine.apply_position(pos);

        if let Some(outcome) = result.outcome() {
            match self.tracker.record(outcome) {
                Ok(record) => debug!(%record, "Scoreboard updated"),
                Err(e) => {
                    error!(error = %e, "Failed to save scores");
                    self.notice = Some(format!("Failed to save scores: {}", e.message));
                }
            }
        }

        if matches!(result, MoveResult::Win { .. }) && self.confetti_enabled {
            self.confetti
                .burst(&mut self.rng, self.viewport.width, self.viewport.height);
        }

        result
    }

    /// Asks for confirmation, or acts right away when prompts are disabled.
    pub fn request(&mut self, action: Confirmation) {
        if self.confirm_destructive {
            debug!(?action, "Awaiting confirmation");
            self.pending = Some(action);
        } else {
            self.perform(action);
        }
    }

    /// Accepts the pending confirmation.
    pub fn confirm(&mut self) {
        if let Some(action) = self.pending.take() {
            self.perform(action);
        }
    }

    /// Drops the pending confirmation.
    pub fn cancel(&mut self) {
        if let Some(action) = self.pending.take() {
            debug!(?action, "Confirmation cancelled");
        }
    }

    fn perform(&mut self, action: Confirmation) {
        match action {
            Confirmation::Restart => self.restart(),
            Confirmation::ResetScores => self.reset_scores(),
        }
    }

    /// Starts a new game. Scores are kept.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.engine.reset();
        self.confetti.stop();
        self.notice = None;
    }

    /// Zeroes the scoreboard.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        match self.tracker.reset_all() {
            Ok(_) => {
                info!("Scoreboard reset");
                self.notice = None;
            }
            Err(e) => {
                error!(error = %e, "Failed to reset scores");
                self.notice = Some(format!("Failed to reset scores: {}", e.message));
            }
        }
    }

    /// Advances animations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.confetti.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::games::tictactoe::Player;

    fn app() -> App<MemoryStore> {
        let tracker = ScoreTracker::new(MemoryStore::new());
        let mut app = App::new(tracker, &Settings::default()).with_rng(StdRng::seed_from_u64(0));
        app.set_viewport(Rect::new(0, 0, 80, 30));
        app
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_digits_play_and_win_updates_scores() {
        let mut app = app();
        for c in ['1', '4', '2', '5', '3'] {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.turn_indicator(), "Player X wins!");
        assert_eq!(app.scores(), &ScoreRecord::new(1, 0, 0));
        assert!(app.confetti().is_active());
    }

    #[test]
    fn test_cursor_and_enter_play() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cursor(), Position::TopCenter);
        assert_eq!(app.turn_indicator(), "Player O's turn");
    }

    #[test]
    fn test_occupied_square_is_ignored() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.engine().history().len(), 1);
        assert_eq!(app.engine().current_player(), Player::O);
    }

    #[test]
    fn test_restart_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.pending(), Some(Confirmation::Restart));

        // Moves are blocked while the prompt is open.
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.engine().history().len(), 1);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.pending(), None);
        assert_eq!(app.engine().history().len(), 1);

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.engine().history().is_empty());
        assert_eq!(app.turn_indicator(), "Player X's turn");
    }

    #[test]
    fn test_reset_scores_after_confirmation() {
        let tracker = ScoreTracker::new(MemoryStore::with_entries([("scoreX", "4"), ("scoreDraw", "2")]));
        let mut app = App::new(tracker, &Settings::default());
        assert_eq!(app.scores(), &ScoreRecord::new(4, 0, 2));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.scores(), &ScoreRecord::new(4, 0, 2));
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.scores(), &ScoreRecord::default());
        assert_eq!(
            app.tracker().store().entries().get("scoreX").map(String::as_str),
            Some("0")
        );
    }

    #[test]
    fn test_prompts_can_be_disabled() {
        let settings = Settings::from_toml("confirm_destructive = false").unwrap();
        let mut app = App::new(ScoreTracker::new(MemoryStore::new()), &settings);
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.pending(), None);
        assert!(app.engine().history().is_empty());
    }

    #[test]
    fn test_restart_stops_confetti_and_keeps_scores() {
        let mut app = app();
        for c in ['1', '4', '2', '5', '3'] {
            press(&mut app, KeyCode::Char(c));
        }
        app.restart();
        assert!(!app.confetti().is_active());
        assert_eq!(app.scores(), &ScoreRecord::new(1, 0, 0));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_mouse_click_plays_square() {
        let mut app = app();
        let cells = ui::board_cells(Rect::new(0, 0, 80, 30));
        let target = cells[Position::BottomLeft.to_index()];
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.x + 1,
            row: target.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.engine().history(), &[Position::BottomLeft]);
    }
}
