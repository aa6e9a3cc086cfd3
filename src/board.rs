//! The cell store: a sparse map of occupied cells.
//!
//! An empty cell is simply absent from the map, so every stored cell holds at
//! least one orb. Cells are keyed by [`board_key`] of their coordinate.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;

use crate::config::PlayerId;
use crate::constants::AXIS_RANGES;
use crate::coord::{Coord, board_key};

/// State of an occupied cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub coord: Coord,
    pub owner: PlayerId,
    /// Number of orbs, always at least 1.
    pub level: u32,
    /// Axis the orbs spin around. Cosmetic, but kept stable for the cell's lifetime.
    pub axis: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: HashMap<u64, Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: HashMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds(self.rows, self.cols)
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(&board_key(coord))
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> Vec<&Cell> {
        let mut v: Vec<&Cell> = self.cells.values().collect();
        v.sort_by_key(|c| c.coord);
        v
    }

    /// In-bounds orthogonal neighbors, in east, west, north, south order.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + use<> {
        let Coord { col, row } = coord;
        let mut v = Vec::with_capacity(4);
        if col + 1 < self.cols {
            v.push(Coord::new(col + 1, row));
        }
        if col > 0 {
            v.push(Coord::new(col - 1, row));
        }
        if row + 1 < self.rows {
            v.push(Coord::new(col, row + 1));
        }
        if row > 0 {
            v.push(Coord::new(col, row - 1));
        }
        v.into_iter()
    }

    /// Number of orthogonal neighbors: 2 in a corner, 3 on an edge, 4 inside.
    pub fn neighbor_count(&self, coord: Coord) -> u32 {
        self.neighbors(coord).count() as u32
    }

    /// Whether `player` owns at least one cell.
    pub fn owns_any(&self, player: PlayerId) -> bool {
        self.cells.values().any(|c| c.owner == player)
    }

    pub fn cells_owned_by(&self, player: PlayerId) -> usize {
        self.cells.values().filter(|c| c.owner == player).count()
    }

    /// Total number of orbs on the board.
    pub fn total_orbs(&self) -> u32 {
        self.cells.values().map(|c| c.level).sum()
    }

    /// Add `count` orbs of `owner` to a cell.
    ///
    /// An empty cell is created with a fresh rotation axis drawn from `rng`.
    /// An occupied cell keeps its axis and is taken over by `owner`.
    /// Adding zero orbs is a no-op so no empty cell is ever stored.
    pub fn add_orbs(&mut self, coord: Coord, owner: PlayerId, count: u32, rng: &mut fastrand::Rng) {
        if count == 0 {
            return;
        }
        self.cells
            .entry(board_key(coord))
            .and_modify(|c| {
                c.level += count;
                c.owner = owner;
            })
            .or_insert_with(|| Cell {
                coord,
                owner,
                level: count,
                axis: random_axis(rng),
            });
    }

    pub fn remove(&mut self, coord: Coord) -> Option<Cell> {
        self.cells.remove(&board_key(coord))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

/// Draw a rotation axis with each component uniform in its [`AXIS_RANGES`] range.
///
/// Resampled until at least one component is non-zero.
pub fn random_axis(rng: &mut fastrand::Rng) -> Vec3 {
    loop {
        let [x, y, z] = AXIS_RANGES.map(|(lo, hi)| lo + rng.f32() * (hi - lo));
        let axis = Vec3::new(x, y, z);
        if axis != Vec3::ZERO {
            return axis;
        }
    }
}

/// Top row first, one character pair per cell: level then owner index, `..` when empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                match self.get(Coord::new(col, row)) {
                    Some(c) => write!(f, "{}{} ", c.level, c.owner)?,
                    None => write!(f, ".. ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> fastrand::Rng {
        fastrand::Rng::with_seed(7)
    }

    #[test]
    fn test_neighbor_counts() {
        let b = Board::new(8, 6);
        assert_eq!(b.neighbor_count(Coord::new(0, 0)), 2);
        assert_eq!(b.neighbor_count(Coord::new(5, 0)), 2);
        assert_eq!(b.neighbor_count(Coord::new(0, 7)), 2);
        assert_eq!(b.neighbor_count(Coord::new(5, 7)), 2);
        assert_eq!(b.neighbor_count(Coord::new(3, 0)), 3);
        assert_eq!(b.neighbor_count(Coord::new(0, 4)), 3);
        assert_eq!(b.neighbor_count(Coord::new(2, 3)), 4);
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let b = Board::new(6, 6);
        let n: Vec<_> = b.neighbors(Coord::new(2, 3)).collect();
        assert_eq!(
            n,
            vec![Coord::new(3, 3), Coord::new(1, 3), Coord::new(2, 4), Coord::new(2, 2)]
        );
        let corner: Vec<_> = b.neighbors(Coord::new(5, 5)).collect();
        assert_eq!(corner, vec![Coord::new(4, 5), Coord::new(5, 4)]);
    }

    #[test]
    fn test_add_orbs_creates_and_takes_over() {
        let mut rng = rng();
        let mut b = Board::new(6, 6);
        let at = Coord::new(1, 1);
        b.add_orbs(at, 0, 1, &mut rng);
        let axis = b.get(at).unwrap().axis;
        assert_eq!(b.get(at).unwrap().level, 1);

        b.add_orbs(at, 1, 2, &mut rng);
        let cell = b.get(at).unwrap();
        assert_eq!(cell.level, 3);
        assert_eq!(cell.owner, 1);
        assert_eq!(cell.axis, axis, "axis must stay stable while the cell lives");
    }

    #[test]
    fn test_add_zero_orbs_does_not_create_cell() {
        let mut rng = rng();
        let mut b = Board::new(6, 6);
        b.add_orbs(Coord::new(0, 0), 0, 0, &mut rng);
        assert!(b.is_empty());
    }

    #[test]
    fn test_random_axis_is_nonzero_and_in_range() {
        let mut rng = rng();
        for _ in 0..1000 {
            let a = random_axis(&mut rng);
            assert_ne!(a, Vec3::ZERO);
            assert!((-1.0..1.0).contains(&a.x));
            assert!((-3.0..3.0).contains(&a.y));
            assert!((-4.0..4.0).contains(&a.z));
        }
    }

    #[test]
    fn test_ownership_queries() {
        let mut rng = rng();
        let mut b = Board::new(6, 6);
        b.add_orbs(Coord::new(0, 0), 0, 1, &mut rng);
        b.add_orbs(Coord::new(1, 0), 0, 2, &mut rng);
        b.add_orbs(Coord::new(5, 5), 1, 1, &mut rng);
        assert!(b.owns_any(0));
        assert!(!b.owns_any(2));
        assert_eq!(b.cells_owned_by(0), 2);
        assert_eq!(b.total_orbs(), 4);
        assert_eq!(b.cells()[0].coord, Coord::new(0, 0));
    }

    #[test]
    fn test_display() {
        let mut rng = rng();
        let mut b = Board::new(6, 6);
        b.add_orbs(Coord::new(0, 0), 1, 2, &mut rng);
        let s = b.to_string();
        let last = s.lines().last().unwrap();
        assert!(last.starts_with("21 .. "));
        assert_eq!(s.lines().count(), 6);
    }
}
