use std::collections::HashMap;
use std::time::{Duration, Instant};

use pathlab_core::{GridModel, Pos};

use crate::error::SearchError;
use crate::kind::AlgorithmKind;
use crate::steplog::{StepEntry, StepKind, StepLog};

/// Lifecycle of a search. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    #[default]
    NotStarted,
    Running,
    /// Finished with a path to the goal.
    Found,
    /// Finished with the frontier exhausted.
    NotFound,
}

impl SearchStatus {
    /// Whether the search reached a terminal state.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Found | Self::NotFound)
    }
}

/// Summary fields read by the renderer and the report collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSummary {
    pub algorithm: AlgorithmKind,
    pub status: SearchStatus,
    pub found: bool,
    pub nodes_explored: usize,
    pub path_length: usize,
    /// Wall time from `start()` to the terminal step, or to now if still
    /// running. `None` before the first `start()`.
    pub elapsed: Option<Duration>,
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

/// Bookkeeping shared by every search: lifecycle, parent links, the
/// reconstructed path, counters, timing and the step log.
///
/// Each algorithm owns one `SearchRun` next to its own frontier
/// structures.
#[derive(Debug, Clone, Default)]
pub struct SearchRun {
    status: SearchStatus,
    epoch: u64,
    start: Pos,
    goal: Pos,
    // start maps to None
    parent: HashMap<Pos, Option<Pos>>,
    path: Vec<Pos>,
    nodes_explored: usize,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    log: StepLog,
}

impl SearchRun {
    /// Read the grid's endpoints, failing if either is unset.
    pub(crate) fn endpoints(grid: &GridModel) -> Result<(Pos, Pos), SearchError> {
        let start = grid.start_pos().ok_or(SearchError::MissingStart)?;
        let goal = grid.goal_pos().ok_or(SearchError::MissingGoal)?;
        Ok((start, goal))
    }

    /// Drop everything and return to [`SearchStatus::NotStarted`].
    pub(crate) fn clear(&mut self) {
        self.status = SearchStatus::NotStarted;
        self.parent.clear();
        self.path.clear();
        self.nodes_explored = 0;
        self.start_time = None;
        self.end_time = None;
        self.log.clear();
    }

    /// Begin a fresh run from `start` to `goal`: clear the grid's
    /// visualization flags left by earlier runs and take its busy flag.
    pub(crate) fn begin(&mut self, grid: &mut GridModel, start: Pos, goal: Pos, kind: AlgorithmKind) {
        self.clear();
        grid.reset_algorithm_state();
        self.status = SearchStatus::Running;
        self.epoch = grid.begin_search();
        self.start = start;
        self.goal = goal;
        self.parent.insert(start, None);
        self.start_time = Some(Instant::now());
        log::debug!("{} started: {start} -> {goal}", kind.label());
        self.record(
            StepKind::Started,
            format!("{} started at {start}, goal {goal}", kind.label()),
            Some(start),
        );
    }

    /// Whether a step should do work. A run whose grid was reset since
    /// `begin` is cleared here and reported as not ready.
    pub(crate) fn ready(&mut self, grid: &GridModel) -> bool {
        if self.status != SearchStatus::Running {
            return false;
        }
        if grid.epoch() != self.epoch {
            log::debug!("grid reset during search, discarding run");
            self.clear();
            return false;
        }
        true
    }

    pub(crate) fn goal(&self) -> Pos {
        self.goal
    }

    pub(crate) fn is_discovered(&self, p: Pos) -> bool {
        self.parent.contains_key(&p)
    }

    pub(crate) fn set_parent(&mut self, p: Pos, parent: Pos) {
        self.parent.insert(p, Some(parent));
    }

    pub(crate) fn record(&mut self, kind: StepKind, description: String, pos: Option<Pos>) {
        let elapsed = self.start_time.map(|t| t.elapsed()).unwrap_or_default();
        self.log.push(StepEntry {
            kind,
            description,
            pos,
            elapsed,
            nodes_explored: self.nodes_explored,
        });
    }

    /// `p` was popped and finalized.
    pub(crate) fn finalize(&mut self, grid: &mut GridModel, p: Pos) {
        grid.mark_visited(p);
        self.record(StepKind::Visited, format!("visited {p}"), Some(p));
    }

    /// `p` was expanded, pushing `pushed` neighbors.
    pub(crate) fn expanded(&mut self, p: Pos, pushed: usize) {
        self.nodes_explored += 1;
        self.record(
            StepKind::NeighborsExplored,
            format!("explored {pushed} neighbors of {p}"),
            Some(p),
        );
    }

    /// The goal was finalized: rebuild and mark the path, then finish.
    pub(crate) fn reach_goal(&mut self, grid: &mut GridModel) {
        let goal = self.goal;
        self.record(StepKind::GoalReached, format!("goal reached at {goal}"), Some(goal));

        self.path.clear();
        let mut cur = goal;
        while cur != self.start {
            self.path.push(cur);
            match self.parent.get(&cur) {
                Some(&Some(p)) => cur = p,
                _ => break,
            }
        }
        for &p in &self.path {
            grid.mark_path(p);
        }
        self.record(
            StepKind::PathReconstructed,
            format!("path reconstructed: {} steps", self.path.len()),
            None,
        );
        self.finish(grid, SearchStatus::Found);
    }

    /// The frontier is empty and the goal was never reached.
    pub(crate) fn exhaust(&mut self, grid: &mut GridModel) {
        self.record(
            StepKind::Exhausted,
            "frontier exhausted: no path".to_string(),
            None,
        );
        self.finish(grid, SearchStatus::NotFound);
    }

    fn finish(&mut self, grid: &mut GridModel, status: SearchStatus) {
        self.status = status;
        self.end_time = Some(Instant::now());
        grid.end_search(self.epoch);
        log::debug!(
            "search finished: {status:?}, {} nodes explored, path length {}",
            self.nodes_explored,
            self.path.len()
        );
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// The path in goal → start order, start excluded. Empty unless found.
    #[inline]
    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    #[inline]
    pub fn path_length(&self) -> usize {
        self.path.len()
    }

    /// Cells finalized and expanded so far. The goal is finalized but never
    /// expanded, so it is not counted.
    #[inline]
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    #[inline]
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    #[inline]
    pub fn end_time(&self) -> Option<Instant> {
        self.end_time
    }

    /// Time from start to end, or to now while running.
    pub fn elapsed(&self) -> Option<Duration> {
        let start = self.start_time?;
        Some(match self.end_time {
            Some(end) => end.duration_since(start),
            None => start.elapsed(),
        })
    }

    #[inline]
    pub fn log(&self) -> &StepLog {
        &self.log
    }
}
