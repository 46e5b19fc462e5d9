use std::fmt;

/// Errors reported by the search crate. None of them leave partial state
/// behind: a failed [`start`](crate::SearchAlgorithm::start) mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no start cell.
    MissingStart,
    /// The grid has no goal cell.
    MissingGoal,
    /// An algorithm name did not match any [`AlgorithmKind`](crate::AlgorithmKind).
    UnknownAlgorithm(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("no start cell set"),
            Self::MissingGoal => f.write_str("no goal cell set"),
            Self::UnknownAlgorithm(name) => {
                write!(f, "unknown algorithm \u{201c}{name}\u{201d} (expected bfs or astar)")
            }
        }
    }
}

impl std::error::Error for SearchError {}
