//! Ordered record of notable search events.

use std::time::Duration;

use pathlab_core::Pos;

/// What a [`StepEntry`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// The frontier was seeded with the start cell.
    Started,
    /// A cell was popped and finalized.
    Visited,
    /// A finalized cell's neighbors were pushed onto the frontier.
    NeighborsExplored,
    /// The goal was finalized.
    GoalReached,
    /// The path was rebuilt from parent links.
    PathReconstructed,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEntry {
    pub kind: StepKind,
    /// Human-readable description.
    pub description: String,
    /// The cell the event concerns, if any.
    pub pos: Option<Pos>,
    /// Time since the search started.
    pub elapsed: Duration,
    /// `nodes_explored` when the entry was written.
    pub nodes_explored: usize,
}

/// The step log of one search run.
///
/// Entries are kept in the order they happened and are never dropped by the
/// search itself; presentation code may show only a tail.
#[derive(Debug, Clone, Default)]
pub struct StepLog {
    entries: Vec<StepEntry>,
}

impl StepLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: StepEntry) {
        log::trace!("{}", entry.description);
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[StepEntry] {
        &self.entries
    }

    /// The `n` most recent entries, oldest first.
    pub fn tail(&self, n: usize) -> &[StepEntry] {
        let skip = self.entries.len().saturating_sub(n);
        &self.entries[skip..]
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&StepEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: StepKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, StepEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a StepEntry;
    type IntoIter = std::slice::Iter<'a, StepEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: StepKind, n: usize) -> StepEntry {
        StepEntry {
            kind,
            description: format!("{kind:?} {n}"),
            pos: None,
            elapsed: Duration::ZERO,
            nodes_explored: n,
        }
    }

    #[test]
    fn push_keeps_order() {
        let mut log = StepLog::new();
        log.push(entry(StepKind::Started, 0));
        log.push(entry(StepKind::Visited, 0));
        log.push(entry(StepKind::NeighborsExplored, 1));
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].kind, StepKind::Started);
        assert_eq!(log.last().map(|e| e.nodes_explored), Some(1));
    }

    #[test]
    fn tail_returns_most_recent() {
        let mut log = StepLog::new();
        for i in 0..5 {
            log.push(entry(StepKind::Visited, i));
        }
        let tail: Vec<usize> = log.tail(2).iter().map(|e| e.nodes_explored).collect();
        assert_eq!(tail, vec![3, 4]);
        assert_eq!(log.tail(10).len(), 5);
    }

    #[test]
    fn count_by_kind() {
        let mut log = StepLog::new();
        log.push(entry(StepKind::Visited, 0));
        log.push(entry(StepKind::Visited, 1));
        log.push(entry(StepKind::GoalReached, 1));
        assert_eq!(log.count(StepKind::Visited), 2);
        assert_eq!(log.count(StepKind::Exhausted), 0);
    }
}
