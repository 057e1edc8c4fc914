use core::fmt;

/// A 0-based `(row, col)` position on a [Grid](crate::grid::Grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }

    /// Whether both coordinates lie on the same row or the same column.
    pub fn is_lateral_to(&self, other: &Coordinate) -> bool {
        self.row == other.row || self.col == other.col
    }

    /// Whether `other` is one of the 8 surrounding positions.
    pub fn is_adjacent_to(&self, other: &Coordinate) -> bool {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col)) == 1
    }

    /// Absolute row and column differences.
    pub fn deltas(&self, other: &Coordinate) -> (u32, u32) {
        (
            self.row.abs_diff(other.row) as u32,
            self.col.abs_diff(other.col) as u32,
        )
    }

    /// Applies a signed offset, returning `None` when it would leave the non-negative quadrant.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.row.checked_add_signed(d_row)?,
            self.col.checked_add_signed(d_col)?,
        ))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lateral_and_adjacent() {
        let c = Coordinate::new(2, 2);
        assert!(c.is_lateral_to(&Coordinate::new(2, 7)));
        assert!(c.is_lateral_to(&Coordinate::new(0, 2)));
        assert!(!c.is_lateral_to(&Coordinate::new(3, 3)));
        assert!(c.is_adjacent_to(&Coordinate::new(3, 3)));
        assert!(c.is_adjacent_to(&Coordinate::new(1, 2)));
        assert!(!c.is_adjacent_to(&c));
        assert!(!c.is_adjacent_to(&Coordinate::new(4, 2)));
    }

    #[test]
    fn offset_stays_non_negative() {
        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(1, 1), Some(Coordinate::new(1, 1)));
        assert_eq!(Coordinate::new(3, 1).deltas(&origin), (3, 1));
    }
}
