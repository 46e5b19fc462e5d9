//! The [`Cell`] type: one square of the grid.

/// A grid cell.
///
/// `wall`, `start` and `goal` are placement state owned by
/// [`GridModel`](crate::GridModel); they are read-only outside it. The
/// remaining three flags are visualization output written by the search
/// algorithms and carry no meaning for correctness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub(crate) wall: bool,
    pub(crate) start: bool,
    pub(crate) goal: bool,
    pub visited: bool,
    pub in_frontier: bool,
    pub in_path: bool,
}

impl Cell {
    /// Whether the cell blocks movement.
    #[inline]
    pub const fn wall(&self) -> bool {
        self.wall
    }

    /// Whether the cell is the search start.
    #[inline]
    pub const fn start(&self) -> bool {
        self.start
    }

    /// Whether the cell is the search goal.
    #[inline]
    pub const fn goal(&self) -> bool {
        self.goal
    }

    /// Whether the cell holds the start or goal role.
    #[inline]
    pub const fn is_endpoint(&self) -> bool {
        self.start || self.goal
    }

    /// Clear the visualization flags, keeping placement state.
    #[inline]
    pub(crate) fn reset_state(&mut self) {
        self.visited = false;
        self.in_frontier = false;
        self.in_path = false;
    }
}
