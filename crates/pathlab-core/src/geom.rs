//! Grid coordinates: [`Pos`].

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A `(row, col)` grid coordinate. Rows grow downward, columns grow right.
///
/// Components are signed so that neighbor offsets never underflow; positions
/// outside a grid are simply rejected by [`GridModel::contains`].
///
/// [`GridModel::contains`]: crate::GridModel::contains
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// One column to the right.
    pub const EAST: Self = Self { row: 0, col: 1 };
    /// One row down.
    pub const SOUTH: Self = Self { row: 1, col: 0 };
    /// One column to the left.
    pub const WEST: Self = Self { row: 0, col: -1 };
    /// One row up.
    pub const NORTH: Self = Self { row: -1, col: 0 };

    /// The cardinal offsets in neighbor enumeration order: East, South,
    /// West, North.
    pub const CARDINALS: [Self; 4] = [Self::EAST, Self::SOUTH, Self::WEST, Self::NORTH];

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours in East, South, West, North order.
    /// Bounds are not checked.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        Self::CARDINALS.map(|d| self + d)
    }

    /// The cell exactly halfway between `self` and `other`.
    ///
    /// Only meaningful for positions an even distance apart on one axis,
    /// such as two maze lattice cells.
    #[inline]
    pub const fn midpoint(self, other: Pos) -> Pos {
        Pos::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

// --- trait impls for Pos ---

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    /// Row-major ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i32> for Pos {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.row * rhs, self.col * rhs)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pos_json_shape() {
        let json = serde_json::to_string(&Pos::new(3, 7)).unwrap();
        assert_eq!(json, r#"{"row":3,"col":7}"#);
    }
}
