use std::collections::{HashSet, VecDeque};

use pathlab_core::{GridModel, Pos};

use crate::error::SearchError;
use crate::kind::AlgorithmKind;
use crate::run::{SearchRun, SearchStatus};
use crate::traits::SearchAlgorithm;

/// Stepwise breadth-first search.
///
/// Every edge costs 1, so cells are finalized in order of hop distance from
/// the start and the first time the goal is popped its path is shortest. A
/// cell is queued the first time it is discovered and never again.
#[derive(Debug, Clone, Default)]
pub struct Bfs {
    queue: VecDeque<Pos>,
    visited: HashSet<Pos>,
    run: SearchRun,
    nbuf: Vec<Pos>,
}

impl Bfs {
    /// Create a search that has not started.
    pub fn new() -> Self {
        Self {
            nbuf: Vec::with_capacity(4),
            ..Self::default()
        }
    }

    /// Cells currently queued, front first.
    pub fn frontier(&self) -> impl Iterator<Item = Pos> + '_ {
        self.queue.iter().copied()
    }

    /// Whether `p` has been finalized.
    pub fn is_visited(&self, p: Pos) -> bool {
        self.visited.contains(&p)
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.visited.clear();
        self.run.clear();
    }
}

impl SearchAlgorithm for Bfs {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Bfs
    }

    fn run(&self) -> &SearchRun {
        &self.run
    }

    fn start(&mut self, grid: &mut GridModel) -> Result<(), SearchError> {
        let (start, goal) = SearchRun::endpoints(grid)?;
        self.clear();
        self.run.begin(grid, start, goal, self.kind());
        self.queue.push_back(start);
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

        let Some(current) = self.queue.pop_front() else {
            self.run.exhaust(grid);
            return true;
        };

        if !self.visited.insert(current) {
            return false;
        }
        self.run.finalize(grid, current);

        if current == self.run.goal() {
            self.run.reach_goal(grid);
            return true;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend(grid.neighbors(current));

        let mut pushed = 0;
        for &np in nbuf.iter() {
            if self.visited.contains(&np) || self.run.is_discovered(np) {
                continue;
            }
            self.run.set_parent(np, current);
            self.queue.push_back(np);
            grid.set_frontier(np, true);
            pushed += 1;
        }
        self.nbuf = nbuf;
        self.run.expanded(current, pushed);

        if self.queue.is_empty() {
            self.run.exhaust(grid);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(rows: i32, cols: i32) -> GridModel {
        let mut g = GridModel::new(rows, cols);
        g.set_start(Pos::new(0, 0)).unwrap();
        g.set_goal(Pos::new(rows - 1, cols - 1)).unwrap();
        g
    }

    #[test]
    fn start_requires_endpoints() {
        let mut g = GridModel::new(3, 3);
        let mut bfs = Bfs::new();
        assert_eq!(bfs.start(&mut g), Err(SearchError::MissingStart));
        g.set_start(Pos::ZERO).unwrap();
        assert_eq!(bfs.start(&mut g), Err(SearchError::MissingGoal));
        assert_eq!(bfs.status(), SearchStatus::NotStarted);
        assert!(!g.is_busy());
        assert_eq!(g.count(|c| c.in_frontier), 0);
    }

    #[test]
    fn open_five_by_five() {
        let mut g = open_grid(5, 5);
        let mut bfs = Bfs::new();
        bfs.start(&mut g).unwrap();
        bfs.run_to_end(&mut g);
        assert!(bfs.found());
        assert_eq!(bfs.path_length(), 8);
        assert_eq!(bfs.path().first(), Some(&Pos::new(4, 4)));
        assert!(!bfs.path().contains(&Pos::ZERO));
        assert_eq!(g.count(|c| c.in_path), 8);
    }

    #[test]
    fn first_step_expands_start_in_neighbor_order() {
        let mut g = open_grid(3, 3);
        let mut bfs = Bfs::new();
        bfs.start(&mut g).unwrap();
        assert!(!bfs.run_step(&mut g));
        let frontier: Vec<Pos> = bfs.frontier().collect();
        assert_eq!(frontier, vec![Pos::new(0, 1), Pos::new(1, 0)]);
        assert!(bfs.is_visited(Pos::ZERO));
        assert_eq!(bfs.nodes_explored(), 1);

        let start = g.cell(Pos::ZERO).unwrap();
        assert!(start.visited && !start.in_frontier);
        assert!(g.cell(Pos::new(0, 1)).unwrap().in_frontier);
    }

    #[test]
    fn never_started_step_is_finished() {
        let mut g = open_grid(2, 2);
        let mut bfs = Bfs::new();
        assert!(bfs.run_step(&mut g));
        assert_eq!(g.count(|c| c.visited), 0);
    }

    #[test]
    fn busy_while_running() {
        let mut g = open_grid(3, 3);
        let mut bfs = Bfs::new();
        bfs.start(&mut g).unwrap();
        assert!(g.is_busy());
        bfs.run_to_end(&mut g);
        assert!(!g.is_busy());
    }

    #[test]
    fn soft_reset_aborts_run() {
        let mut g = open_grid(5, 5);
        let mut bfs = Bfs::new();
        bfs.start(&mut g).unwrap();
        bfs.run_step(&mut g);
        bfs.run_step(&mut g);
        g.reset_algorithm_state();

        assert!(bfs.run_step(&mut g));
        assert_eq!(bfs.status(), SearchStatus::NotStarted);
        assert_eq!(bfs.nodes_explored(), 0);
        assert_eq!(bfs.frontier().count(), 0);
        assert_eq!(g.count(|c| c.visited), 0);

        // The grid is editable again and the search can be restarted.
        g.toggle_wall(Pos::new(2, 2)).unwrap();
        bfs.start(&mut g).unwrap();
        bfs.run_to_end(&mut g);
        assert_eq!(bfs.path_length(), 8);
    }
}
