//! Board coordinates and their integer key encoding.
//!
//! Cells are addressed by `(col, row)` with `(0, 0)` at the lower-left corner of
//! the board: `col` grows to the right and `row` grows upwards. Internally the
//! board stores cells under a single `u64` key obtained from the Cantor pairing
//! of the two components.

use std::cmp::Ordering;
use std::fmt;

/// A cell position on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Whether this coordinate lies on a `rows x cols` board.
    #[inline]
    pub fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.col < cols && self.row < rows
    }
}

/// Row-major order: bottom row first, left to right within a row.
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Map a coordinate to a single integer with the Cantor pairing function.
///
/// The mapping is a bijection between `N x N` and `N`, so distinct
/// coordinates never share a key.
#[inline]
pub fn board_key(coord: Coord) -> u64 {
    let c = coord.col as u64;
    let r = coord.row as u64;
    (c + r) * (c + r + 1) / 2 + r
}

/// Inverse of [`board_key`].
///
/// Uses an integer square root so large keys decode exactly.
pub fn inverse_key(key: u64) -> Coord {
    let w = ((8 * key + 1).isqrt() - 1) / 2;
    let t = w * (w + 1) / 2;
    let row = key - t;
    let col = w - row;
    Coord::new(col as usize, row as usize)
}

/// Parse a coordinate string of the form `"col,row"` (e.g. `"3,4"`).
///
/// Whitespace around either component is ignored. Returns `None` for anything
/// that is not two non-negative integers.
pub fn parse_coord(s: &str) -> Option<Coord> {
    let (col, row) = s.split_once(',')?;
    let col = col.trim().parse().ok()?;
    let row = row.trim().parse().ok()?;
    Some(Coord::new(col, row))
}

/// Convert a coordinate to its `"col,row"` string form.
pub fn str_coord(coord: Coord) -> String {
    coord.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_key_small_values() {
        assert_eq!(board_key(Coord::new(0, 0)), 0);
        assert_eq!(board_key(Coord::new(1, 0)), 1);
        assert_eq!(board_key(Coord::new(0, 1)), 2);
        assert_eq!(board_key(Coord::new(2, 0)), 3);
        assert_eq!(board_key(Coord::new(1, 1)), 4);
    }

    #[test]
    fn test_key_roundtrip_on_largest_board() {
        for row in 0..10 {
            for col in 0..10 {
                let c = Coord::new(col, row);
                assert_eq!(inverse_key(board_key(c)), c, "Failed roundtrip for {c}");
            }
        }
    }

    #[test]
    fn test_inverse_key_is_exact_for_large_keys() {
        let c = Coord::new(3_000_000, 1_234_567);
        assert_eq!(inverse_key(board_key(c)), c);
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<u64> = (0..10)
            .flat_map(|r| (0..10).map(move |c| board_key(Coord::new(c, r))))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4"), Some(Coord::new(3, 4)));
        assert_eq!(parse_coord(" 0 , 9 "), Some(Coord::new(0, 9)));
        assert_eq!(parse_coord("3"), None);
        assert_eq!(parse_coord("a,1"), None);
        assert_eq!(parse_coord("-1,2"), None);
        assert_eq!(str_coord(Coord::new(5, 2)), "5,2");
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut v = vec![Coord::new(2, 1), Coord::new(0, 1), Coord::new(5, 0)];
        v.sort();
        assert_eq!(v, vec![Coord::new(5, 0), Coord::new(0, 1), Coord::new(2, 1)]);
    }

    #[test]
    fn test_in_bounds() {
        assert!(Coord::new(5, 7).in_bounds(8, 6));
        assert!(!Coord::new(6, 0).in_bounds(8, 6));
        assert!(!Coord::new(0, 8).in_bounds(8, 6));
    }
}
