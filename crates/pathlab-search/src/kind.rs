use std::fmt;
use std::str::FromStr;

use crate::astar::AStar;
use crate::bfs::Bfs;
use crate::error::SearchError;
use crate::traits::SearchAlgorithm;

/// The available search algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    Bfs,
    #[default]
    AStar,
}

impl AlgorithmKind {
    /// All kinds, in menu order.
    pub const ALL: [AlgorithmKind; 2] = [Self::Bfs, Self::AStar];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::AStar => "A*",
        }
    }

    /// The other algorithm.
    pub fn toggle(self) -> Self {
        match self {
            Self::Bfs => Self::AStar,
            Self::AStar => Self::Bfs,
        }
    }

    /// Build a fresh, not-started search of this kind.
    pub fn build(self) -> Box<dyn SearchAlgorithm> {
        match self {
            Self::Bfs => Box::new(Bfs::new()),
            Self::AStar => Box::new(AStar::new()),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("bfs".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Bfs));
        assert_eq!("A*".parse::<AlgorithmKind>(), Ok(AlgorithmKind::AStar));
        assert_eq!("AStar".parse::<AlgorithmKind>(), Ok(AlgorithmKind::AStar));
        assert_eq!(
            "dfs".parse::<AlgorithmKind>(),
            Err(SearchError::UnknownAlgorithm("dfs".into()))
        );
    }

    #[test]
    fn toggle_and_build() {
        assert_eq!(AlgorithmKind::Bfs.toggle(), AlgorithmKind::AStar);
        for kind in AlgorithmKind::ALL {
            let search = kind.build();
            assert_eq!(search.kind(), kind);
            assert_eq!(search.status(), crate::SearchStatus::NotStarted);
        }
    }
}
