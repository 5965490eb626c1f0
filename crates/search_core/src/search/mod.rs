use std::{fmt, str::FromStr};

use anyhow::bail;
use rustc_hash::FxHashMap;

use crate::{
    constants::Weight,
    graph::{Graph, NodeIndex},
    statistics::SearchStats,
};

use self::shortest_path::ShortestPath;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod shortest_path;

/// Tentative weight and predecessor of every node reached by a search.
pub(crate) type NodeData = FxHashMap<NodeIndex, (Weight, Option<NodeIndex>)>;

/// Common interface of all searches so they can be benchmarked side by side.
pub trait PathSearch {
    /// Searches a path from `source` to `target`. Returns `None` if the target
    /// can't be reached or one of the nodes does not exist.
    fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath>;

    /// Statistics of the last search
    fn stats(&self) -> &SearchStats;

    fn algorithm(&self) -> SearchAlgorithm;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SearchAlgorithm {
    #[value(name = "dfs", alias = "depth-first")]
    DepthFirst,
    #[value(name = "bfs", alias = "breadth-first")]
    BreadthFirst,
    #[value(name = "dijkstra")]
    Dijkstra,
    #[value(name = "astar", alias = "a*")]
    AStar,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 4] = [
        SearchAlgorithm::DepthFirst,
        SearchAlgorithm::BreadthFirst,
        SearchAlgorithm::Dijkstra,
        SearchAlgorithm::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SearchAlgorithm::DepthFirst => "depth_first",
            SearchAlgorithm::BreadthFirst => "breadth_first",
            SearchAlgorithm::Dijkstra => "dijkstra",
            SearchAlgorithm::AStar => "astar",
        }
    }

    /// Whether the algorithm guarantees a path of minimal weight.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SearchAlgorithm::Dijkstra | SearchAlgorithm::AStar)
    }

    pub fn searcher<'a>(&self, g: &'a Graph) -> Box<dyn PathSearch + 'a> {
        match self {
            SearchAlgorithm::DepthFirst => Box::new(dfs::DepthFirst::new(g)),
            SearchAlgorithm::BreadthFirst => Box::new(bfs::BreadthFirst::new(g)),
            SearchAlgorithm::Dijkstra => Box::new(dijkstra::Dijkstra::new(g)),
            SearchAlgorithm::AStar => Box::new(astar::AStar::new(g)),
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" | "depth_first" => Ok(SearchAlgorithm::DepthFirst),
            "bfs" | "breadth-first" | "breadth_first" => Ok(SearchAlgorithm::BreadthFirst),
            "dijkstra" | "ucs" => Ok(SearchAlgorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(SearchAlgorithm::AStar),
            other => bail!(
                "Unknown search algorithm '{}', expected one of dfs, bfs, dijkstra, astar",
                other
            ),
        }
    }
}

/// True if both nodes exist in `g`.
pub(crate) fn nodes_exist(g: &Graph, source: NodeIndex, target: NodeIndex) -> bool {
    source.index() < g.nodes.len() && target.index() < g.nodes.len()
}

/// Follows the predecessors stored in `node_data` from `target` back to
/// `source`.
pub fn reconstruct_path(
    target: NodeIndex,
    source: NodeIndex,
    node_data: &FxHashMap<NodeIndex, (Weight, Option<NodeIndex>)>,
) -> Option<ShortestPath> {
    let weight = node_data.get(&target)?.0;
    let mut path = vec![target];

    let mut current = target;
    while current != source {
        current = node_data.get(&current)?.1?;
        path.push(current);
    }
    path.reverse();
    Some(ShortestPath::new(path, weight))
}

#[cfg(test)]
pub(crate) fn assert_no_path(path: Option<ShortestPath>) {
    assert_eq!(None, path);
}

#[cfg(test)]
pub(crate) fn assert_path(
    expected_path: Vec<usize>,
    expected_weight: Weight,
    path: Option<ShortestPath>,
) {
    let path = path.expect("Expected a path");
    let nodes: Vec<usize> = path.nodes.iter().map(|n| n.index()).collect();
    assert_eq!(expected_path, nodes);
    approx::assert_abs_diff_eq!(expected_weight, path.weight, epsilon = 1e-9);
}
