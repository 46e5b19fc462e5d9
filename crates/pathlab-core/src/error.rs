use std::fmt;

use crate::geom::Pos;

/// Why a grid edit was refused. A refused edit never mutates the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The position lies outside the grid.
    OutOfBounds(Pos),
    /// A search is running on the grid; structural edits must wait.
    Busy,
    /// The cell holds the start or goal role.
    Occupied(Pos),
    /// The cell is a wall and cannot take the start or goal role.
    Wall(Pos),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::Busy => f.write_str("grid is busy: a search is running"),
            Self::Occupied(p) => write!(f, "cell {p} is already the start or goal"),
            Self::Wall(p) => write!(f, "cell {p} is a wall"),
        }
    }
}

impl std::error::Error for EditError {}
