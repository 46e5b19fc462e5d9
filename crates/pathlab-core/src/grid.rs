//! The [`GridModel`] type: the cell matrix and its placement rules.
//!
//! A `GridModel` owns a fixed `rows × cols` matrix of [`Cell`]s stored
//! row-major in one buffer. Placement state (walls, start, goal) only changes
//! through the mutators here, which keep `start_pos`/`goal_pos` in sync with
//! the cell flags and refuse edits that would break the invariants:
//!
//! - a cell is never both a wall and the start or goal,
//! - at most one cell is the start and at most one is the goal.

use crate::cell::Cell;
use crate::error::EditError;
use crate::geom::Pos;

// ---------------------------------------------------------------------------
// GridModel
// ---------------------------------------------------------------------------

/// A 2D grid of [`Cell`]s with wall/start/goal placement rules.
///
/// # Single writer
///
/// The grid is shared between the active search and the editing
/// collaborator. A search calls [`begin_search`](Self::begin_search) when it
/// starts; from then on the structural mutators ([`toggle_wall`],
/// [`set_wall`], [`set_start`], [`set_goal`]) fail with [`EditError::Busy`]
/// until the search finishes. [`clear_grid`] and
/// [`reset_algorithm_state`] are always allowed: they bump the grid's
/// *epoch*, which aborts the running search.
///
/// [`toggle_wall`]: Self::toggle_wall
/// [`set_wall`]: Self::set_wall
/// [`set_start`]: Self::set_start
/// [`set_goal`]: Self::set_goal
/// [`clear_grid`]: Self::clear_grid
/// [`reset_algorithm_state`]: Self::reset_algorithm_state
#[derive(Debug, Clone)]
pub struct GridModel {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    start_pos: Option<Pos>,
    goal_pos: Option<Pos>,
    busy: bool,
    epoch: u64,
}

impl GridModel {
    /// Create an open grid (no walls, no start or goal). Negative sizes are
    /// clamped to zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            cells: vec![Cell::default(); (rows as usize) * (cols as usize)],
            rows,
            cols,
            start_pos: None,
            goal_pos: None,
            busy: false,
            epoch: 0,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    #[inline]
    fn index(&self, p: Pos) -> Option<usize> {
        if self.contains(p) {
            Some(p.row as usize * self.cols as usize + p.col as usize)
        } else {
            None
        }
    }

    #[inline]
    fn cell_mut(&mut self, p: Pos) -> Option<&mut Cell> {
        let i = self.index(p)?;
        self.cells.get_mut(i)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.index(p).and_then(|i| self.cells.get(i))
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passage(&self, p: Pos) -> bool {
        self.cell(p).is_some_and(|c| !c.wall)
    }

    /// Position of the start cell, if set.
    #[inline]
    pub fn start_pos(&self) -> Option<Pos> {
        self.start_pos
    }

    /// Position of the goal cell, if set.
    #[inline]
    pub fn goal_pos(&self) -> Option<Pos> {
        self.goal_pos
    }

    /// Iterate over `(Pos, &Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        let cols = self.cols.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, c)| {
            let p = Pos::new((i / cols) as i32, (i % cols) as i32);
            (p, c)
        })
    }

    /// Count how many cells satisfy a predicate.
    pub fn count(&self, mut f: impl FnMut(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| f(c)).count()
    }

    /// In-bounds, non-wall cells 4-adjacent to `p`, in East, South, West,
    /// North order.
    ///
    /// The order is fixed: it decides BFS exploration order and A* tie
    /// breaking, so searches on the same grid are reproducible.
    pub fn neighbors(&self, p: Pos) -> impl Iterator<Item = Pos> + '_ {
        p.neighbors_4().into_iter().filter(move |&n| self.is_passage(n))
    }

    // -----------------------------------------------------------------------
    // Structural mutators
    // -----------------------------------------------------------------------

    fn check_editable(&self, p: Pos) -> Result<&Cell, EditError> {
        if self.busy {
            return Err(EditError::Busy);
        }
        self.cell(p).ok_or(EditError::OutOfBounds(p))
    }

    /// Flip the wall state of `p`. Refused for the start and goal cells.
    pub fn toggle_wall(&mut self, p: Pos) -> Result<(), EditError> {
        let wall = self.check_editable(p)?.wall;
        self.set_wall(p, !wall)
    }

    /// Make `p` a wall (`true`) or a passage (`false`). Refused for the
    /// start and goal cells.
    pub fn set_wall(&mut self, p: Pos, wall: bool) -> Result<(), EditError> {
        if self.check_editable(p)?.is_endpoint() {
            return Err(EditError::Occupied(p));
        }
        if let Some(c) = self.cell_mut(p) {
            c.wall = wall;
        }
        Ok(())
    }

    /// Make `p` the start cell, clearing the previous start.
    ///
    /// Refused if `p` is a wall or the goal.
    pub fn set_start(&mut self, p: Pos) -> Result<(), EditError> {
        let cell = self.check_editable(p)?;
        if cell.wall {
            return Err(EditError::Wall(p));
        }
        if cell.goal {
            return Err(EditError::Occupied(p));
        }
        if let Some(old) = self.start_pos.take().and_then(|o| self.cell_mut(o)) {
            old.start = false;
        }
        if let Some(c) = self.cell_mut(p) {
            c.start = true;
        }
        self.start_pos = Some(p);
        Ok(())
    }

    /// Make `p` the goal cell, clearing the previous goal.
    ///
    /// Refused if `p` is a wall or the start.
    pub fn set_goal(&mut self, p: Pos) -> Result<(), EditError> {
        let cell = self.check_editable(p)?;
        if cell.wall {
            return Err(EditError::Wall(p));
        }
        if cell.start {
            return Err(EditError::Occupied(p));
        }
        if let Some(old) = self.goal_pos.take().and_then(|o| self.cell_mut(o)) {
            old.goal = false;
        }
        if let Some(c) = self.cell_mut(p) {
            c.goal = true;
        }
        self.goal_pos = Some(p);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Resets
    // -----------------------------------------------------------------------

    /// Hard reset: remove all walls, unset start and goal, clear every
    /// visualization flag. Aborts any running search.
    pub fn clear_grid(&mut self) {
        self.cells.fill(Cell::default());
        self.start_pos = None;
        self.goal_pos = None;
        self.abort_search();
    }

    /// Hard reset, then turn every cell into a wall. Used by maze
    /// generators before carving.
    pub fn fill_walls(&mut self) {
        self.clear_grid();
        for c in self.cells.iter_mut() {
            c.wall = true;
        }
    }

    /// Soft reset: clear `visited`, `in_frontier` and `in_path` on every
    /// cell. Walls, start and goal are kept. Aborts any running search.
    pub fn reset_algorithm_state(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_state();
        }
        self.abort_search();
    }

    fn abort_search(&mut self) {
        self.busy = false;
        self.epoch = self.epoch.wrapping_add(1);
    }

    // -----------------------------------------------------------------------
    // Search bookkeeping
    // -----------------------------------------------------------------------

    /// Mark the grid busy for a search and return the current epoch.
    ///
    /// The search keeps the epoch and compares it with [`epoch`](Self::epoch)
    /// on every step; a mismatch means the grid was reset under it.
    pub fn begin_search(&mut self) -> u64 {
        self.busy = true;
        self.epoch
    }

    /// Release the busy flag taken by [`begin_search`](Self::begin_search).
    /// Ignored if the grid was reset since (the epoch moved on).
    pub fn end_search(&mut self, epoch: u64) {
        if epoch == self.epoch {
            self.busy = false;
        }
    }

    /// Whether a search currently holds the grid.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Counter bumped by every reset.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // -----------------------------------------------------------------------
    // Visualization writers
    // -----------------------------------------------------------------------

    /// Mark `p` as finalized by a search. This also takes it off the
    /// frontier.
    pub fn mark_visited(&mut self, p: Pos) {
        if let Some(c) = self.cell_mut(p) {
            c.visited = true;
            c.in_frontier = false;
        }
    }

    /// Set or clear the `in_frontier` flag of `p`.
    pub fn set_frontier(&mut self, p: Pos, on: bool) {
        if let Some(c) = self.cell_mut(p) {
            c.in_frontier = on;
        }
    }

    /// Mark `p` as part of the reconstructed path.
    pub fn mark_path(&mut self, p: Pos) {
        if let Some(c) = self.cell_mut(p) {
            c.in_path = true;
        }
    }
}
