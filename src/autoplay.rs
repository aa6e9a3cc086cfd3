//! Random playouts.
//!
//! Every player picks a uniformly random legal cell (empty, or already their
//! own) until someone wins or the move cap is reached. Each chain reaction is
//! run to completion with fixed-length frames before the next move.

use crate::coord::Coord;
use crate::session::{GameObserver, GameSession, Winner};

/// Frame length used while settling a chain reaction, in milliseconds.
pub const FRAME_MS: u64 = 16;

/// Upper bound on frames spent settling a single move.
pub const MAX_SETTLE_FRAMES: usize = 200_000;

/// Result of a playout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// `None` if the move cap was hit first.
    pub winner: Option<Winner>,
    /// Accepted placements.
    pub moves: usize,
}

/// Play random moves on `session` until the game ends or `max_moves` are made.
pub fn autoplay<O: GameObserver>(
    session: &mut GameSession<O>,
    max_moves: usize,
    rng: &mut fastrand::Rng,
) -> Outcome {
    let mut moves = 0;
    while moves < max_moves && !session.is_game_over() {
        let Some(coord) = choose_random_move(session, rng) else {
            break;
        };
        if session.place(coord).is_err() {
            break;
        }
        moves += 1;

        let result = session.settle(FRAME_MS, MAX_SETTLE_FRAMES);
        if result.game_ended {
            return Outcome {
                winner: result.winner,
                moves,
            };
        }
    }
    Outcome {
        winner: None,
        moves,
    }
}

/// Pick a random cell the active player may play on.
///
/// Scanning starts at a random index and wraps around, then one candidate is
/// drawn uniformly.
pub fn choose_random_move<O: GameObserver>(
    session: &GameSession<O>,
    rng: &mut fastrand::Rng,
) -> Option<Coord> {
    let board = session.board();
    let player = session.current_player();
    let (rows, cols) = (board.rows(), board.cols());
    let total = rows * cols;

    let start = rng.usize(..total);
    let candidates: Vec<Coord> = (start..total)
        .chain(0..start)
        .map(|i| Coord::new(i % cols, i / cols))
        .filter(|&c| board.get(c).is_none_or(|cell| cell.owner == player))
        .collect();

    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.usize(..candidates.len())])
}
