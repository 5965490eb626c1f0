//! Implementation of the A* search algorithm.
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    constants::Weight,
    graph::{Graph, Node, NodeIndex},
    statistics::SearchStats,
    util::math::straight_line,
};

use super::{shortest_path::ShortestPath, NodeData, PathSearch, SearchAlgorithm};

/// Estimate of the remaining distance from a node to the target. Must never
/// overestimate for A* to return minimal paths.
pub type Heuristic = fn(&Node, &Node) -> Weight;

#[derive(Debug)]
struct Candidate {
    node: NodeIndex,
    real_weight: Weight,
    tentative_weight: Weight,
}

impl Candidate {
    fn new(node: NodeIndex, real_weight: Weight, estimated_weight: Weight) -> Self {
        Self {
            node,
            real_weight,
            tentative_weight: estimated_weight,
        }
    }
}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.tentative_weight == self.tentative_weight
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .tentative_weight
            .partial_cmp(&self.tentative_weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

pub struct AStar<'a> {
    pub stats: SearchStats,
    pub nodes_settled: FxHashSet<NodeIndex>,
    heuristic: Heuristic,
    g: &'a Graph,
}

impl<'a> AStar<'a> {
    /// A* guided by the straight line distance to the target.
    pub fn new(g: &'a Graph) -> Self {
        Self::with_heuristic(g, straight_line)
    }

    pub fn with_heuristic(g: &'a Graph, heuristic: Heuristic) -> Self {
        AStar {
            g,
            heuristic,
            stats: SearchStats::default(),
            nodes_settled: FxHashSet::default(),
        }
    }
}

impl<'a> PathSearch for AStar<'a> {
    fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        self.stats.init();
        self.nodes_settled.clear();
        if !super::nodes_exist(self.g, source, target) {
            self.stats.finish();
            return None;
        }
        if source == target {
            self.stats.nodes_settled += 1;
            self.nodes_settled.insert(source);
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0.0));
        }

        let (g, heuristic) = (self.g, self.heuristic);
        let goal = &g.nodes[target.index()];
        let estimate = |node: NodeIndex| heuristic(&g.nodes[node.index()], goal);

        let mut node_data: NodeData = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut queue = BinaryHeap::new();

        queue.push(Candidate::new(source, 0.0, estimate(source)));

        let mut found = false;
        while let Some(Candidate {
            tentative_weight: _,
            real_weight,
            node,
        }) = queue.pop()
        {
            // A cheaper way to this node has been found since it was queued
            if real_weight > node_data[&node].0 {
                continue;
            }

            self.stats.nodes_settled += 1;
            self.nodes_settled.insert(node);

            if node == target {
                found = true;
                break;
            }

            for (_, edge) in g.neighbors_outgoing(node) {
                let real_weight = real_weight + edge.weight;

                if real_weight
                    < node_data
                        .get(&edge.target)
                        .unwrap_or(&(f64::INFINITY, None))
                        .0
                {
                    let tentative_weight = real_weight + estimate(edge.target);

                    node_data.insert(edge.target, (real_weight, Some(node)));
                    queue.push(Candidate::new(edge.target, real_weight, tentative_weight));
                }
            }
        }

        self.stats.finish();

        if !found {
            debug!("No path found: {}", self.stats);
            return None;
        }

        let sp = super::reconstruct_path(target, source, &node_data);
        debug!("Path found: {}, weight: {:?}", self.stats, sp.as_ref().map(|sp| sp.weight));
        sp
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::AStar
    }
}
