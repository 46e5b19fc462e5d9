use std::collections::{BinaryHeap, HashMap, HashSet};

use pathlab_core::{GridModel, Pos};

use crate::distance::manhattan;
use crate::error::SearchError;
use crate::kind::AlgorithmKind;
use crate::run::{SearchRun, SearchStatus};
use crate::traits::SearchAlgorithm;

/// Open-set entry, ordered for use in a max-`BinaryHeap` so that the
/// smallest `f` pops first.
///
/// Ties on `f` go to the smaller `h` (closer to the goal), then to the
/// earlier push. `seq` is unique per run, so the order is total.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    f: i32,
    h: i32,
    seq: u64,
    pos: Pos,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Stepwise A* search with the Manhattan heuristic.
///
/// The open set has no decrease-key: when a cell's `g` improves it is pushed
/// again, and the superseded entry is dropped when it surfaces because its
/// cell is already closed. The heuristic is consistent, so a closed cell is
/// never reopened and the first path to the goal is optimal.
#[derive(Debug, Clone, Default)]
pub struct AStar {
    open: BinaryHeap<OpenEntry>,
    closed: HashSet<Pos>,
    g_score: HashMap<Pos, i32>,
    f_score: HashMap<Pos, i32>,
    seq: u64,
    run: SearchRun,
    nbuf: Vec<Pos>,
}

impl AStar {
    /// Create a search that has not started.
    pub fn new() -> Self {
        Self {
            nbuf: Vec::with_capacity(4),
            ..Self::default()
        }
    }

    /// Best known cost from the start to `p`.
    pub fn g_score(&self, p: Pos) -> Option<i32> {
        self.g_score.get(&p).copied()
    }

    /// `g + h` for the best known route through `p`.
    pub fn f_score(&self, p: Pos) -> Option<i32> {
        self.f_score.get(&p).copied()
    }

    /// Whether `p` is in the closed set.
    pub fn is_closed(&self, p: Pos) -> bool {
        self.closed.contains(&p)
    }

    /// Number of entries in the open set, stale ones included.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    fn clear(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.g_score.clear();
        self.f_score.clear();
        self.seq = 0;
        self.run.clear();
    }

    fn push(&mut self, pos: Pos, g: i32, h: i32) {
        let f = g + h;
        self.g_score.insert(pos, g);
        self.f_score.insert(pos, f);
        self.open.push(OpenEntry {
            f,
            h,
            seq: self.seq,
            pos,
        });
        self.seq += 1;
    }

    /// Pop entries whose cell is already closed off the top of the heap, so
    /// that an empty heap means an exhausted search.
    fn discard_stale(&mut self) {
        while self.open.peek().is_some_and(|e| self.closed.contains(&e.pos)) {
            self.open.pop();
        }
    }
}

impl SearchAlgorithm for AStar {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::AStar
    }

    fn run(&self) -> &SearchRun {
        &self.run
    }

    fn start(&mut self, grid: &mut GridModel) -> Result<(), SearchError> {
        let (start, goal) = SearchRun::endpoints(grid)?;
        self.clear();
        self.run.begin(grid, start, goal, self.kind());
        self.push(start, 0, manhattan(start, goal));
        grid.set_frontier(start, true);
        Ok(())
    }

    fn run_step(&mut self, grid: &mut GridModel) -> bool {
        if !self.run.ready(grid) {
            if self.run.status() == SearchStatus::NotStarted {
                self.clear();
            }
            return true;
        }

        self.discard_stale();
        let Some(current) = self.open.pop() else {
            self.run.exhaust(grid);
            return true;
        };
        let cp = current.pos;

        self.closed.insert(cp);
        self.run.finalize(grid, cp);

        let goal = self.run.goal();
        if cp == goal {
            self.run.reach_goal(grid);
            return true;
        }

        let current_g = self.g_score.get(&cp).copied().unwrap_or_default();

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend(grid.neighbors(cp));

        let mut pushed = 0;
        for &np in nbuf.iter() {
            if self.closed.contains(&np) {
                continue;
            }
            let tentative_g = current_g + 1;
            if self.g_score.get(&np).is_some_and(|&g| tentative_g >= g) {
                continue;
            }
            self.push(np, tentative_g, manhattan(np, goal));
            self.run.set_parent(np, cp);
            grid.set_frontier(np, true);
            pushed += 1;
        }
        self.nbuf = nbuf;
        self.run.expanded(cp, pushed);

        self.discard_stale();
        if self.open.is_empty() {
            self.run.exhaust(grid);
            return true;
        }
        false
    }
}
