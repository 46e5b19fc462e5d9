use std::time::{Duration, Instant};

use pathlab_core::{GridModel, Pos};

use crate::error::SearchError;
use crate::kind::AlgorithmKind;
use crate::run::{SearchRun, SearchStatus, SearchSummary};
use crate::steplog::StepLog;

/// A search that advances one step at a time.
///
/// The grid is passed to every call rather than stored, so the driver can
/// read it for rendering between steps. While the search runs the grid is
/// busy and refuses structural edits.
pub trait SearchAlgorithm {
    /// Which algorithm this is.
    fn kind(&self) -> AlgorithmKind;

    /// Shared bookkeeping for the current (or last) run.
    fn run(&self) -> &SearchRun;

    /// Reset all state from any prior run and seed the frontier with the
    /// grid's start cell.
    ///
    /// Fails without touching anything if the grid has no start or goal.
    fn start(&mut self, grid: &mut GridModel) -> Result<(), SearchError>;

    /// Do one unit of work. Returns `true` once the search is finished
    /// (goal found or frontier exhausted), and `true` again on every later
    /// call without doing anything. A search that was never started, or
    /// whose grid was reset since `start`, also returns `true`.
    fn run_step(&mut self, grid: &mut GridModel) -> bool;

    /// Step until finished and return the number of calls made.
    fn run_to_end(&mut self, grid: &mut GridModel) -> usize {
        let mut steps = 1;
        while !self.run_step(grid) {
            steps += 1;
        }
        steps
    }

    fn status(&self) -> SearchStatus {
        self.run().status()
    }

    fn found(&self) -> bool {
        self.run().found()
    }

    fn path(&self) -> &[Pos] {
        self.run().path()
    }

    fn path_length(&self) -> usize {
        self.run().path_length()
    }

    fn nodes_explored(&self) -> usize {
        self.run().nodes_explored()
    }

    fn start_time(&self) -> Option<Instant> {
        self.run().start_time()
    }

    fn end_time(&self) -> Option<Instant> {
        self.run().end_time()
    }

    fn elapsed(&self) -> Option<Duration> {
        self.run().elapsed()
    }

    fn log(&self) -> &StepLog {
        self.run().log()
    }

    fn summary(&self) -> SearchSummary {
        let run = self.run();
        SearchSummary {
            algorithm: self.kind(),
            status: run.status(),
            found: run.found(),
            nodes_explored: run.nodes_explored(),
            path_length: run.path_length(),
            elapsed: run.elapsed(),
        }
    }
}
