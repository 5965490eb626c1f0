use std::collections::BinaryHeap;

use crate::constants::Weight;
use crate::graph::*;
use crate::search::shortest_path::ShortestPath;
use crate::statistics::SearchStats;
use log::debug;
use rustc_hash::FxHashMap;

use super::{NodeData, PathSearch, SearchAlgorithm};

#[derive(Debug)]
pub struct Candidate {
    pub node_idx: NodeIndex,
    pub weight: Weight,
}

impl Candidate {
    pub fn new(node_idx: NodeIndex, weight: Weight) -> Self {
        Self { node_idx, weight }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.weight == self.weight
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    // Reversed so the BinaryHeap pops the lowest weight first
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            g: graph,
            stats: SearchStats::default(),
        }
    }
}

impl<'a> PathSearch for Dijkstra<'a> {
    fn search(&mut self, source: NodeIndex, target: NodeIndex) -> Option<ShortestPath> {
        self.stats.init();
        if !super::nodes_exist(self.g, source, target) {
            self.stats.finish();
            return None;
        }

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return Some(ShortestPath::new(vec![source], 0.0));
        }

        let mut node_data: NodeData = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut queue = BinaryHeap::new();

        queue.push(Candidate::new(source, 0.0));

        let mut found = false;
        while let Some(Candidate { weight, node_idx }) = queue.pop() {
            // Stale entry, the node was settled with a lower weight already
            if weight > node_data[&node_idx].0 {
                continue;
            }

            self.stats.nodes_settled += 1;

            if node_idx == target {
                found = true;
                break;
            }

            for (_, edge) in self.g.neighbors_outgoing(node_idx) {
                let new_distance = weight + edge.weight;
                if new_distance
                    < node_data
                        .get(&edge.target)
                        .unwrap_or(&(f64::INFINITY, None))
                        .0
                {
                    node_data.insert(edge.target, (new_distance, Some(node_idx)));
                    queue.push(Candidate::new(edge.target, new_distance));
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
        SearchAlgorithm::Dijkstra
    }
}
