//! Turn order and player elimination.
//!
//! The turn counter only ever grows; the active player is `turn % player_count`.
//! During the opening round (`turn < player_count`) each player gets exactly one
//! first move and nobody can be eliminated. After that, a player owning no cell
//! is out for the rest of the game and is skipped in turn order.

use log::debug;

use crate::board::Board;
use crate::config::PlayerId;

/// Counter and eliminated list for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnManager {
    /// Number of turns taken so far.
    pub turn: usize,
    /// Eliminated players, in elimination order.
    pub eliminated: Vec<PlayerId>,
}

/// What changed after [`TurnManager::advance`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnUpdate {
    /// The new active player, if the turn moved on.
    pub next: Option<PlayerId>,
    /// Players eliminated by this call.
    pub eliminated: Vec<PlayerId>,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.turn = 0;
        self.eliminated.clear();
    }

    /// Player whose turn it is.
    #[inline]
    pub fn current_player(&self, player_count: usize) -> PlayerId {
        self.turn % player_count
    }

    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.eliminated.contains(&player)
    }

    /// Whether every player has had their first move.
    pub fn opening_done(&self, player_count: usize) -> bool {
        self.turn >= player_count
    }

    /// The sole survivor once all other players are eliminated.
    pub fn winner(&self, player_count: usize) -> Option<PlayerId> {
        if self.eliminated.len() + 1 != player_count {
            return None;
        }
        (0..player_count).find(|p| !self.is_eliminated(*p))
    }

    /// Update eliminations and, if `update_turn` is set, pass the turn on.
    ///
    /// With `update_turn == false` only the eliminated list is refreshed; this
    /// is used between steps of a chain reaction, where the player who set it
    /// off keeps control until the board settles.
    pub fn advance(&mut self, board: &Board, player_count: usize, update_turn: bool) -> TurnUpdate {
        let mut update = TurnUpdate::default();

        if !self.opening_done(player_count) {
            if update_turn {
                self.turn += 1;
                update.next = Some(self.current_player(player_count));
            }
            return update;
        }

        for player in 0..player_count {
            if !self.is_eliminated(player) && !board.owns_any(player) {
                debug!("player {player} eliminated at turn {}", self.turn);
                self.eliminated.push(player);
                update.eliminated.push(player);
            }
        }

        if update_turn && self.eliminated.len() < player_count {
            loop {
                self.turn += 1;
                if !self.is_eliminated(self.current_player(player_count)) {
                    break;
                }
            }
            update.next = Some(self.current_player(player_count));
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;

    fn board(owners: &[(usize, usize, PlayerId)]) -> Board {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut b = Board::new(6, 6);
        for &(col, row, owner) in owners {
            b.add_orbs(Coord::new(col, row), owner, 1, &mut rng);
        }
        b
    }

    #[test]
    fn test_opening_round_never_eliminates() {
        let mut tm = TurnManager::new();
        let b = board(&[(0, 0, 0)]);
        let u = tm.advance(&b, 3, true);
        assert_eq!(u.next, Some(1));
        assert!(tm.eliminated.is_empty());
        let u = tm.advance(&b, 3, true);
        assert_eq!(u.next, Some(2));
        assert!(tm.eliminated.is_empty());
    }

    #[test]
    fn test_opening_without_update_keeps_turn() {
        let mut tm = TurnManager::new();
        let u = tm.advance(&board(&[]), 2, false);
        assert_eq!(u, TurnUpdate::default());
        assert_eq!(tm.turn, 0);
    }

    #[test]
    fn test_eliminated_players_are_skipped() {
        let mut tm = TurnManager { turn: 3, eliminated: vec![] };
        // player 1 owns nothing
        let b = board(&[(0, 0, 0), (5, 5, 2)]);
        let u = tm.advance(&b, 3, true);
        assert_eq!(u.eliminated, vec![1]);
        // turn 3 -> 4 is player 1 (eliminated) -> 5 is player 2
        assert_eq!(tm.turn, 5);
        assert_eq!(u.next, Some(2));
    }

    #[test]
    fn test_update_false_only_refreshes_eliminations() {
        let mut tm = TurnManager { turn: 2, eliminated: vec![] };
        let b = board(&[(0, 0, 0)]);
        let u = tm.advance(&b, 2, false);
        assert_eq!(u.next, None);
        assert_eq!(u.eliminated, vec![1]);
        assert_eq!(tm.turn, 2);
        assert_eq!(tm.winner(2), Some(0));
    }

    #[test]
    fn test_elimination_is_permanent() {
        let mut tm = TurnManager { turn: 4, eliminated: vec![1] };
        // player 1 owning a cell again does not bring them back
        let b = board(&[(0, 0, 0), (1, 1, 1), (2, 2, 2)]);
        let u = tm.advance(&b, 3, true);
        assert!(u.eliminated.is_empty());
        assert_eq!(tm.eliminated, vec![1]);
        // turn 4 -> 5 is player 2
        assert_eq!(u.next, Some(2));
    }

    #[test]
    fn test_winner() {
        let tm = TurnManager { turn: 9, eliminated: vec![0, 2] };
        assert_eq!(tm.winner(3), Some(1));
        let tm = TurnManager { turn: 9, eliminated: vec![0] };
        assert_eq!(tm.winner(3), None);
    }
}
