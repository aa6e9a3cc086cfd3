//! Validated game setup: board size and the ordered list of players.

use crate::constants::{
    DEFAULT_COLS, DEFAULT_PLAYERS, DEFAULT_ROWS, MAX_DIM, MAX_PLAYERS, MIN_DIM, MIN_PLAYERS,
    PALETTE,
};
use crate::error::ConfigError;

/// Index of a player in turn order.
pub type PlayerId = usize;

/// Board dimensions and players for one game.
///
/// Player colors are stored lowercase; their order is the turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    rows: usize,
    cols: usize,
    players: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            players: DEFAULT_PLAYERS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl GameConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    /// - [`ConfigError::Rows`] / [`ConfigError::Cols`] if a dimension is outside `6..=10`
    /// - [`ConfigError::PlayerCount`] if fewer than 2 or more than 8 players are given
    /// - [`ConfigError::UnknownColor`] if a color is not in the palette
    /// - [`ConfigError::DuplicateColor`] if two players share a color (case-insensitive)
    pub fn new<S: AsRef<str>>(rows: usize, cols: usize, players: &[S]) -> Result<Self, ConfigError> {
        if !(MIN_DIM..=MAX_DIM).contains(&rows) {
            return Err(ConfigError::Rows { got: rows, min: MIN_DIM, max: MAX_DIM });
        }
        if !(MIN_DIM..=MAX_DIM).contains(&cols) {
            return Err(ConfigError::Cols { got: cols, min: MIN_DIM, max: MAX_DIM });
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(ConfigError::PlayerCount {
                got: players.len(),
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }

        let mut labels: Vec<String> = Vec::with_capacity(players.len());
        for p in players {
            let label = normalize_color(p.as_ref());
            if !PALETTE.contains(&label.as_str()) {
                return Err(ConfigError::UnknownColor(p.as_ref().to_string()));
            }
            if labels.contains(&label) {
                return Err(ConfigError::DuplicateColor(label));
            }
            labels.push(label);
        }

        Ok(Self { rows, cols, players: labels })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Color label of a player.
    pub fn label(&self, player: PlayerId) -> &str {
        &self.players[player]
    }
}

/// Lowercase a color label and collapse inner whitespace ("Green  1" -> "green 1").
fn normalize_color(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
