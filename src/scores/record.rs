//! Score record and its persisted layout.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::games::tictactoe::{Outcome, Player};

/// The three persisted counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ScoreKey {
    /// Wins for X.
    WinsX,
    /// Wins for O.
    WinsO,
    /// Draws.
    Draws,
}

impl ScoreKey {
    /// The store key for this counter.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::WinsX => "scoreX",
            Self::WinsO => "scoreO",
            Self::Draws => "scoreDraw",
        }
    }

    /// The counter an outcome increments.
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome.winner() {
            Some(Player::X) => Self::WinsX,
            Some(Player::O) => Self::WinsO,
            None => Self::Draws,
        }
    }
}

/// Cumulative wins per player and draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct ScoreRecord {
    wins_x: u32,
    wins_o: u32,
    draws: u32,
}

impl ScoreRecord {
    /// Creates a record from explicit counts.
    pub fn new(wins_x: u32, wins_o: u32, draws: u32) -> Self {
        Self {
            wins_x,
            wins_o,
            draws,
        }
    }

    /// Returns the counter stored under `key`.
    pub fn get(&self, key: ScoreKey) -> u32 {
        match key {
            ScoreKey::WinsX => self.wins_x,
            ScoreKey::WinsO => self.wins_o,
            ScoreKey::Draws => self.draws,
        }
    }

    /// Wins for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.wins_x,
            Player::O => self.wins_o,
        }
    }

    /// Number of completed games.
    pub fn total_games(&self) -> u64 {
        u64::from(self.wins_x) + u64::from(self.wins_o) + u64::from(self.draws)
    }

    /// Adds one to the counter matching `outcome`.
    pub(crate) fn increment(&mut self, outcome: Outcome) {
        let counter = match ScoreKey::for_outcome(outcome) {
            ScoreKey::WinsX => &mut self.wins_x,
            ScoreKey::WinsO => &mut self.wins_o,
            ScoreKey::Draws => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }

    pub(crate) fn set(&mut self, key: ScoreKey, value: u32) {
        match key {
            ScoreKey::WinsX => self.wins_x = value,
            ScoreKey::WinsO => self.wins_o = value,
            ScoreKey::Draws => self.draws = value,
        }
    }
}

impl std::fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X: {}  O: {}  Draws: {}",
            self.wins_x, self.wins_o, self.draws
        )
    }
}

/// Parses a stored counter, falling back to 0.
///
/// Leading whitespace and a `+` sign are accepted and trailing junk after the
/// digits is ignored (`"12abc"` reads as 12). Missing digits, a negative sign
/// or a value past `u32::MAX` read as 0.
pub fn parse_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };

    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..digits_end].parse::<u32>() {
        Ok(value) => value,
        Err(_) => {
            debug!(raw, "Malformed score value, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_accepts_integers() {
        assert_eq!(parse_count(Some("0")), 0);
        assert_eq!(parse_count(Some("42")), 42);
        assert_eq!(parse_count(Some(" 7")), 7);
        assert_eq!(parse_count(Some("+3")), 3);
    }

    #[test]
    fn test_parse_count_takes_leading_digits() {
        assert_eq!(parse_count(Some("12abc")), 12);
        assert_eq!(parse_count(Some("5.9")), 5);
    }

    #[test]
    fn test_parse_count_defaults_malformed_to_zero() {
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(Some("abc")), 0);
        assert_eq!(parse_count(Some("-4")), 0);
        assert_eq!(parse_count(Some("99999999999")), 0);
        assert_eq!(parse_count(Some("NaN")), 0);
    }

    #[test]
    fn test_increment_matches_outcome() {
        let mut record = ScoreRecord::default();
        record.increment(Outcome::Winner(Player::O));
        record.increment(Outcome::Draw);
        record.increment(Outcome::Draw);
        assert_eq!(record, ScoreRecord::new(0, 1, 2));
        assert_eq!(record.total_games(), 3);
        assert_eq!(record.wins(Player::O), 1);
    }

    #[test]
    fn test_increment_saturates() {
        let mut record = ScoreRecord::new(u32::MAX, 0, 0);
        record.increment(Outcome::Winner(Player::X));
        assert_eq!(*record.wins_x(), u32::MAX);
    }

    #[test]
    fn test_outcome_selects_counter() {
        assert_eq!(ScoreKey::for_outcome(Outcome::Winner(Player::X)), ScoreKey::WinsX);
        assert_eq!(ScoreKey::for_outcome(Outcome::Winner(Player::O)), ScoreKey::WinsO);
        assert_eq!(ScoreKey::for_outcome(Outcome::Draw), ScoreKey::Draws);
    }

    #[test]
    fn test_keys_match_storage_layout() {
        assert_eq!(ScoreKey::WinsX.as_key(), "scoreX");
        assert_eq!(ScoreKey::WinsO.as_key(), "scoreO");
        assert_eq!(ScoreKey::Draws.as_key(), "scoreDraw");
    }
}
