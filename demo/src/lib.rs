//! Driver model shared by the `pathlab` terminal binary.
//!
//! A [`Session`] owns the grid, the maze generator and the active search,
//! and turns editor [`Command`]s into calls on them. The binary only maps
//! CLI flags to a [`Config`], calls [`Session::tick`] once per frame and
//! draws [`Session::frame`].

use std::fmt;
use std::time::Duration;

use pathlab_core::{Cell, EditError, GridModel, Pos};
use pathlab_maze::PrimMaze;
use pathlab_search::{AlgorithmKind, SearchAlgorithm, SearchError, SearchStatus};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

pub const DEFAULT_ROWS: i32 = 21;
pub const DEFAULT_COLS: i32 = 41;
pub const DEFAULT_TICK: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// How to set up a session.
#[derive(Debug, Clone)]
pub struct Config {
    pub rows: i32,
    pub cols: i32,
    pub algorithm: AlgorithmKind,
    /// Generate a maze instead of an open grid.
    pub maze: bool,
    /// Random walls scattered on an open grid. Ignored with `maze`.
    pub walls: usize,
    /// Seed for the maze and wall placement; random if unset.
    pub seed: Option<u64>,
    /// Time between two search steps.
    pub tick: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            algorithm: AlgorithmKind::default(),
            maze: true,
            walls: 0,
            seed: None,
            tick: DEFAULT_TICK,
        }
    }
}

// ---------------------------------------------------------------------------
// Commands and errors
// ---------------------------------------------------------------------------

/// Editor and control actions, one per button of the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetStart(Pos),
    SetGoal(Pos),
    ToggleWall(Pos),
    /// Drag-paint a wall.
    PaintWall(Pos),
    Clear,
    GenerateMaze,
    Run(AlgorithmKind),
    Reset,
}

/// A command the session refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Edit(EditError),
    Search(SearchError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit(e) => write!(f, "edit refused: {e}"),
            Self::Search(e) => write!(f, "cannot run search: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Edit(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}

impl From<EditError> for SessionError {
    fn from(e: EditError) -> Self {
        Self::Edit(e)
    }
}

impl From<SearchError> for SessionError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    grid: GridModel,
    maze: PrimMaze<StdRng>,
    algorithm: AlgorithmKind,
    search: Option<Box<dyn SearchAlgorithm>>,
    running: bool,
    steps: usize,
}

impl Session {
    /// Build the grid described by `config`: a maze, or an open grid with
    /// scattered walls and the endpoints on opposite corners.
    pub fn new(config: &Config) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        let maze_seed: u64 = rng.random();
        let mut session = Self {
            grid: GridModel::new(config.rows, config.cols),
            maze: PrimMaze::seeded(maze_seed),
            algorithm: config.algorithm,
            search: None,
            running: false,
            steps: 0,
        };

        if config.maze {
            session.maze.generate(&mut session.grid);
        } else {
            session.scatter_walls(&mut rng, config.walls);
        }
        session
    }

    fn scatter_walls(&mut self, rng: &mut StdRng, walls: usize) {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        if self.grid.is_empty() {
            return;
        }
        let start = Pos::ZERO;
        let goal = Pos::new(rows - 1, cols - 1);
        let budget = walls.min(self.grid.len().saturating_sub(2));
        let mut placed = 0;
        let mut attempts = 0;
        while placed < budget && attempts < budget * 20 {
            attempts += 1;
            let p = Pos::new(rng.random_range(0..rows), rng.random_range(0..cols));
            if p == start || p == goal || !self.grid.is_passage(p) {
                continue;
            }
            if self.grid.set_wall(p, true).is_ok() {
                placed += 1;
            }
        }
        if let Err(e) = self.grid.set_start(start) {
            log::warn!("start not placed: {e}");
        }
        if goal != start {
            if let Err(e) = self.grid.set_goal(goal) {
                log::warn!("goal not placed: {e}");
            }
        }
    }

    /// Apply an editor or control command.
    pub fn apply(&mut self, cmd: Command) -> Result<(), SessionError> {
        match cmd {
            Command::SetStart(p) => self.grid.set_start(p)?,
            Command::SetGoal(p) => self.grid.set_goal(p)?,
            Command::ToggleWall(p) => self.grid.toggle_wall(p)?,
            Command::PaintWall(p) => self.grid.set_wall(p, true)?,
            Command::Clear => {
                self.grid.clear_grid();
                self.stop();
            }
            Command::GenerateMaze => {
                self.maze.generate(&mut self.grid);
                self.stop();
            }
            Command::Run(kind) => {
                let mut search = kind.build();
                search.start(&mut self.grid)?;
                self.algorithm = kind;
                self.search = Some(search);
                self.running = true;
                self.steps = 0;
            }
            Command::Reset => {
                self.grid.reset_algorithm_state();
                self.stop();
            }
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
        self.search = None;
        self.steps = 0;
    }

    /// Advance the active search by one step. Returns `true` on the tick
    /// the search finishes.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let Some(search) = self.search.as_mut() else {
            self.running = false;
            return false;
        };
        self.steps += 1;
        let finished = search.run_step(&mut self.grid);
        if finished {
            self.running = false;
        }
        finished
    }

    /// Whether a search is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of ticks spent on the current search.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// The algorithm last selected.
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// The current or last search, if any.
    pub fn search(&self) -> Option<&dyn SearchAlgorithm> {
        self.search.as_deref()
    }

    /// The grid as text, one string per row.
    pub fn frame(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.grid.rows() as usize);
        let mut line = String::with_capacity(self.grid.cols() as usize);
        for (p, c) in self.grid.iter() {
            line.push(glyph(c));
            if p.col == self.grid.cols() - 1 {
                lines.push(std::mem::take(&mut line));
            }
        }
        lines
    }

    /// One-line summary of the current search.
    pub fn status_line(&self) -> String {
        let Some(search) = self.search() else {
            return format!("{} | idle", self.algorithm);
        };
        let s = search.summary();
        let state = match s.status {
            SearchStatus::NotStarted => "idle",
            SearchStatus::Running => "running",
            SearchStatus::Found => "found",
            SearchStatus::NotFound => "no path",
        };
        let ms = s.elapsed.unwrap_or_default().as_secs_f64() * 1000.0;
        format!(
            "{} | {state} | step {} | explored {} | path {} | {ms:.1} ms",
            s.algorithm, self.steps, s.nodes_explored, s.path_length
        )
    }
}

/// Character for a cell, by display priority: endpoints, walls, then the
/// search overlays.
pub fn glyph(c: &Cell) -> char {
    if c.start() {
        'S'
    } else if c.goal() {
        'G'
    } else if c.wall() {
        '#'
    } else if c.in_path {
        '*'
    } else if c.in_frontier {
        'o'
    } else if c.visited {
        '.'
    } else {
        ' '
    }
}
