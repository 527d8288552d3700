use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Fringe ordering used by graph search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    #[default]
    DepthFirst,
    BreadthFirst,
    UniformCost,
    AStar,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 4] = [
        SearchStrategy::DepthFirst,
        SearchStrategy::BreadthFirst,
        SearchStrategy::UniformCost,
        SearchStrategy::AStar,
    ];
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchStrategy::DepthFirst => "depth-first",
            SearchStrategy::BreadthFirst => "breadth-first",
            SearchStrategy::UniformCost => "uniform-cost",
            SearchStrategy::AStar => "a-star",
        };
        f.write_str(label)
    }
}

impl FromStr for SearchStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" | "depth_first" => Ok(SearchStrategy::DepthFirst),
            "bfs" | "breadth-first" | "breadth_first" => Ok(SearchStrategy::BreadthFirst),
            "ucs" | "uniform-cost" | "uniform_cost" => Ok(SearchStrategy::UniformCost),
            "astar" | "a*" | "a-star" => Ok(SearchStrategy::AStar),
            _ => Err(crate::Error::ParseStrategy {
                input: s.to_string(),
                expected: "depth-first, breadth-first, uniform-cost, a-star".to_string(),
            }),
        }
    }
}
