//! Error types surfaced by the engine.
//!
//! Neither kind is fatal: a rejected input leaves the game untouched, and a
//! configuration error is reported before any game starts.

use thiserror::Error;

use crate::coord::Coord;

/// Why a placement or undo request was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectedInput {
    /// A chain reaction is still animating.
    #[error("a chain reaction is in progress")]
    CascadeInProgress,
    /// The cell belongs to another player.
    #[error("cell {0} is owned by another player")]
    OpponentCell(Coord),
    /// The pointer or coordinate does not map onto the board.
    #[error("coordinate is outside the board")]
    OutOfBounds,
    /// The game is over; reset before playing again.
    #[error("the game has ended")]
    GameOver,
    /// No move has been made since the last reset.
    #[error("nothing to undo")]
    NothingToUndo,
}

/// Invalid game setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rows must be between {min} and {max} (got {got})")]
    Rows { got: usize, min: usize, max: usize },
    #[error("columns must be between {min} and {max} (got {got})")]
    Cols { got: usize, min: usize, max: usize },
    #[error("between {min} and {max} players are required (got {got})")]
    PlayerCount { got: usize, min: usize, max: usize },
    #[error("unknown color: {0}")]
    UnknownColor(String),
    #[error("same colors are not allowed for multiple players: {0}")]
    DuplicateColor(String),
    #[error("cannot reconfigure while a chain reaction is in progress")]
    CascadeInProgress,
}
