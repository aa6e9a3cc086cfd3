//! Critical-cell detection and the explosion fan-out rule.
//!
//! A cell is critical once its orb count reaches the number of its grid
//! neighbors. When critical cells explode together, each one sends one orb to
//! every neighbor, and contributions landing on the same cell add up.

use std::collections::BTreeMap;

use crate::board::{Board, Cell};
use crate::coord::Coord;

/// Whether a single cell has reached its neighbor count.
#[inline]
pub fn is_critical(board: &Board, cell: &Cell) -> bool {
    cell.level >= board.neighbor_count(cell.coord)
}

/// All critical cells on the board, sorted by coordinate.
pub fn detect_critical(board: &Board) -> Vec<Cell> {
    board
        .cells()
        .into_iter()
        .filter(|c| is_critical(board, c))
        .copied()
        .collect()
}

/// How many orbs each cell receives when `critical` explode at once.
///
/// Every critical cell contributes one orb to each in-bounds neighbor. A cell
/// next to two exploding cells receives two orbs.
pub fn neighbor_contributions(board: &Board, critical: &[Cell]) -> BTreeMap<Coord, u32> {
    let mut out = BTreeMap::new();
    for cell in critical {
        for n in board.neighbors(cell.coord) {
            *out.entry(n).or_insert(0) += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(usize, usize, usize, u32)]) -> Board {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut b = Board::new(6, 6);
        for &(col, row, owner, level) in cells {
            b.add_orbs(Coord::new(col, row), owner, level, &mut rng);
        }
        b
    }

    #[test]
    fn test_thresholds_by_position() {
        // corner needs 2, edge 3, interior 4
        let b = board_with(&[(0, 0, 0, 1), (3, 0, 0, 2), (3, 3, 0, 3)]);
        assert!(detect_critical(&b).is_empty());

        let b = board_with(&[(0, 0, 0, 2), (3, 0, 0, 3), (3, 3, 0, 4)]);
        let crit: Vec<_> = detect_critical(&b).iter().map(|c| c.coord).collect();
        assert_eq!(crit, vec![Coord::new(0, 0), Coord::new(3, 0), Coord::new(3, 3)]);
    }

    #[test]
    fn test_overfull_cell_is_critical() {
        let b = board_with(&[(0, 0, 1, 5)]);
        assert_eq!(detect_critical(&b).len(), 1);
    }

    #[test]
    fn test_single_corner_contributions() {
        let b = board_with(&[(0, 0, 0, 2)]);
        let crit = detect_critical(&b);
        let map = neighbor_contributions(&b, &crit);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&Coord::new(1, 0)], 1);
        assert_eq!(map[&Coord::new(0, 1)], 1);
    }

    #[test]
    fn test_shared_neighbor_receives_summed_contributions() {
        // corner (0,0) and edge (2,0) both border (1,0)
        let b = board_with(&[(0, 0, 0, 2), (2, 0, 0, 3)]);
        let crit = detect_critical(&b);
        assert_eq!(crit.len(), 2);
        let map = neighbor_contributions(&b, &crit);
        assert_eq!(map[&Coord::new(1, 0)], 2);
        assert_eq!(map[&Coord::new(0, 1)], 1);
        assert_eq!(map[&Coord::new(3, 0)], 1);
        assert_eq!(map[&Coord::new(2, 1)], 1);
    }

    #[test]
    fn test_adjacent_criticals_feed_each_other() {
        let b = board_with(&[(0, 0, 0, 2), (1, 0, 0, 3)]);
        let crit = detect_critical(&b);
        let map = neighbor_contributions(&b, &crit);
        assert_eq!(map[&Coord::new(0, 0)], 1);
        assert_eq!(map[&Coord::new(1, 0)], 1);
    }
}
