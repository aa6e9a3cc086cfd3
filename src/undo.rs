//! Single-level undo.
//!
//! The state just before the latest accepted move is kept in one slot. Each
//! new move overwrites it; there is no history beyond that.

use crate::board::Board;
use crate::turn::TurnManager;

/// Board and turn state captured before a move.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    pub turns: TurnManager,
}

#[derive(Clone, Debug, Default)]
pub struct UndoSlot {
    snapshot: Option<Snapshot>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-copy the current state, replacing any earlier snapshot.
    pub fn capture(&mut self, board: &Board, turns: &TurnManager) {
        self.snapshot = Some(Snapshot {
            board: board.clone(),
            turns: turns.clone(),
        });
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Write the snapshot back into `board` and `turns`.
    ///
    /// The snapshot stays in the slot, so undoing twice lands on the same state.
    /// Returns `false` if nothing was captured.
    pub fn restore(&self, board: &mut Board, turns: &mut TurnManager) -> bool {
        match &self.snapshot {
            Some(s) => {
                board.clone_from(&s.board);
                turns.clone_from(&s.turns);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }
}
