//! Game engine for tic-tac-toe.

use tracing::{debug, info, instrument};

use super::action::{MoveRejection, MoveResult};
use super::rules::{check_winner, is_full};
use super::types::{Board, GameState, GameStatus, Player};
use super::Position;

/// Tic-tac-toe game engine.
///
/// Owns one [`GameState`]; `apply_move` and `reset` are its only mutators.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Returns the player to move (the winner, once the game is won).
    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        self.state.status()
    }

    /// Returns the accepted moves in order.
    pub fn history(&self) -> &[Position] {
        self.state.history()
    }

    /// Returns true once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.state.status().is_over()
    }

    /// Returns the empty positions, or none once the game is over.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.is_over() {
            Vec::new()
        } else {
            Position::valid_moves(self.board())
        }
    }

    /// Makes a move for the current player at board index `index` (0-8).
    ///
    /// Rejected moves leave the state untouched.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn apply_move(&mut self, index: usize) -> MoveResult {
        match Position::from_index(index) {
            Some(pos) => self.apply_position(pos),
            None => {
                debug!(index, "Move out of bounds");
                MoveResult::Rejected(MoveRejection::OutOfBounds(index))
            }
        }
    }

    /// Makes a move for the current player at `pos`.
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn apply_position(&mut self, pos: Position) -> MoveResult {
        if self.is_over() {
            debug!(?pos, "Move after game end ignored");
            return MoveResult::Rejected(MoveRejection::GameOver);
        }

        if !self.board().is_empty(pos) {
            debug!(?pos, "Square already occupied");
            return MoveResult::Rejected(MoveRejection::SquareOccupied(pos));
        }

        let player = self.state.current_player();
        self.state.place(pos);

        if let Some((winner, line)) = check_winner(self.board()) {
            info!(%winner, %line, moves = self.history().len(), "Game won");
            self.state.set_status(GameStatus::Won { winner, line });
            return MoveResult::Win { winner, line };
        }

        if is_full(self.board()) {
            info!("Game drawn");
            self.state.set_status(GameStatus::Draw);
            return MoveResult::Draw;
        }

        self.state.pass_turn();
        let next = self.state.current_player();
        debug!(%player, ?pos, %next, "Move applied");
        MoveResult::Continue(next)
    }

    /// Starts a fresh game: empty board, X to move. Scores are not touched.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.history().len(), "Resetting game");
        self.state = GameState::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Square;

    #[test]
    fn test_first_move_passes_turn() {
        let mut engine = GameEngine::new();
        assert_eq!(engine.apply_move(4), MoveResult::Continue(Player::O));
        assert_eq!(engine.board().get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(engine.history(), &[Position::Center]);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut engine = GameEngine::new();
        assert_eq!(
            engine.apply_move(9),
            MoveResult::Rejected(MoveRejection::OutOfBounds(9))
        );
        assert_eq!(engine.state(), &GameState::new());
    }

    #[test]
    fn test_win_keeps_winner_as_current_player() {
        let mut engine = GameEngine::new();
        for index in [0, 3, 1, 4] {
            engine.apply_move(index);
        }
        let result = engine.apply_move(2);
        assert!(matches!(result, MoveResult::Win { winner: Player::X, .. }));
        assert_eq!(engine.current_player(), Player::X);
        assert!(engine.valid_moves().is_empty());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut engine = GameEngine::new();
        engine.apply_move(0);
        engine.apply_move(1);
        engine.reset();
        assert!(engine.history().is_empty());
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.valid_moves().len(), 9);
    }
}
