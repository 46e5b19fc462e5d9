//! Stepwise graph searches over a [`GridModel`](pathlab_core::GridModel).
//!
//! Unlike a one-shot pathfinder, every search here is a resumable state
//! machine driven from outside: call [`SearchAlgorithm::start`] once, then
//! [`SearchAlgorithm::run_step`] once per animation tick until it returns
//! `true`. Between steps the grid's cell flags (`visited`, `in_frontier`,
//! `in_path`) describe the search for rendering.
//!
//! - **BFS** ([`Bfs`]): FIFO frontier, shortest path in hops.
//! - **A\*** ([`AStar`]): min-heap on `f = g + h` with the Manhattan
//!   heuristic and lazy deletion of stale entries.
//!
//! Both record a [`StepLog`] of notable events for report generation.

mod astar;
mod bfs;
mod distance;
mod error;
mod kind;
mod run;
mod steplog;
mod traits;

pub use astar::AStar;
pub use bfs::Bfs;
pub use distance::manhattan;
pub use error::SearchError;
pub use kind::AlgorithmKind;
pub use run::{SearchRun, SearchStatus, SearchSummary};
pub use steplog::{StepEntry, StepKind, StepLog};
pub use traits::SearchAlgorithm;
