//! Randomized Prim's maze generator.
//!
//! Passages live on a *lattice*: the cells reachable from the seed by
//! two-step hops. The cells between two lattice cells are walls that may be
//! carved away. Starting from a fully walled grid, the generator grows a
//! spanning tree over the lattice by repeatedly taking a random frontier
//! cell and joining it to a random lattice neighbour that is already a
//! passage.
//!
//! On grids with an even number of rows or columns, the last row or column
//! is not on the lattice and stays walled. The opposite corner is then opened
//! for the goal but may be unreachable; a warning is logged.

use pathlab_core::{GridModel, Pos};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

/// What one [`PrimMaze::generate`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeStats {
    /// The lattice cell the maze was grown from.
    pub seed_cell: Pos,
    /// Cells turned from wall into passage, seed included.
    pub carved: usize,
    /// Frontier entries taken off the list, duplicates included.
    pub frontier_pops: usize,
    /// Whether the grid had an even number of rows or columns.
    pub even_dimensions: bool,
}

/// Maze generator owning its random source.
pub struct PrimMaze<R: Rng> {
    pub rng: R,
}

impl PrimMaze<StdRng> {
    /// A generator whose output depends only on `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PrimMaze<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Overwrite `grid` with a maze and put the start in the top-left
    /// corner and the goal in the bottom-right one.
    ///
    /// The grid is hard-reset first, which also aborts any search running
    /// on it.
    pub fn generate(&mut self, grid: &mut GridModel) -> MazeStats {
        let rows = grid.rows();
        let cols = grid.cols();
        grid.fill_walls();

        let mut stats = MazeStats {
            even_dimensions: rows % 2 == 0 || cols % 2 == 0,
            ..MazeStats::default()
        };
        if grid.is_empty() {
            return stats;
        }

        // Seed on the lattice holding the origin corner, so that both
        // corners of an odd-sized grid end up in the maze.
        let seed = Pos::new(
            2 * self.rng.random_range(0..(rows + 1) / 2),
            2 * self.rng.random_range(0..(cols + 1) / 2),
        );
        stats.seed_cell = seed;
        if open(grid, seed) {
            stats.carved += 1;
        }

        let mut frontier: Vec<Pos> = lattice_neighbors(grid, seed).collect();
        let mut passages: Vec<Pos> = Vec::with_capacity(4);

        while !frontier.is_empty() {
            let i = self.rng.random_range(0..frontier.len());
            let cell = frontier.swap_remove(i);
            stats.frontier_pops += 1;

            // Listed more than once and already joined.
            if grid.is_passage(cell) {
                continue;
            }

            passages.clear();
            passages.extend(lattice_neighbors(grid, cell).filter(|&n| grid.is_passage(n)));
            if passages.is_empty() {
                continue;
            }
            let joined = passages[self.rng.random_range(0..passages.len())];

            for p in [cell.midpoint(joined), cell] {
                if open(grid, p) {
                    stats.carved += 1;
                }
            }
            frontier.extend(lattice_neighbors(grid, cell).filter(|&n| !grid.is_passage(n)));
        }

        place_endpoints(grid, stats.even_dimensions);
        log::debug!(
            "prim maze {rows}x{cols}: seed {}, {} cells carved, {} frontier pops",
            stats.seed_cell,
            stats.carved,
            stats.frontier_pops
        );
        stats
    }
}

/// In-bounds cells two steps away from `p`, East, South, West, North.
fn lattice_neighbors(grid: &GridModel, p: Pos) -> impl Iterator<Item = Pos> + '_ {
    Pos::CARDINALS
        .into_iter()
        .map(move |d| p + d * 2)
        .filter(move |&n| grid.contains(n))
}

fn open(grid: &mut GridModel, p: Pos) -> bool {
    grid.set_wall(p, false).is_ok()
}

fn place_endpoints(grid: &mut GridModel, even_dimensions: bool) {
    let start = Pos::ZERO;
    let goal = Pos::new(grid.rows() - 1, grid.cols() - 1);
    if even_dimensions {
        log::warn!(
            "maze on a {}x{} grid: even dimensions leave the last row or column off the \
             lattice, the goal corner may be unreachable",
            grid.rows(),
            grid.cols()
        );
    }

    for p in [start, goal] {
        if !grid.is_passage(p) {
            open(grid, p);
        }
    }
    if let Err(e) = grid.set_start(start) {
        log::warn!("maze start not placed: {e}");
    }
    if goal != start {
        if let Err(e) = grid.set_goal(goal) {
            log::warn!("maze goal not placed: {e}");
        }
    }
}
