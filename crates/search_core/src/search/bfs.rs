//! Breadth-first search. Finds the path with the fewest edges, ignoring edge
//! weights.
use std::collections::{hash_map::Entry, VecDeque};

use log::debug;
use rustc_hash::FxHashMap;

use crate::{
    graph::{Graph, NodeIndex},
    statistics::SearchStats,
};

use super::{shortest_path::ShortestPath, NodeData, PathSearch, SearchAlgorithm};

pub struct BreadthFirst<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> BreadthFirst<'a> {
    pub fn new(g: &'a Graph) -> Self {
        BreadthFirst {
            g,
            stats: SearchStats::default(),
        }
    }
}

impl<'a> PathSearch for BreadthFirst<'a> {
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

        // Doubles as the set of discovered nodes
        let mut node_data: NodeData = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut queue = VecDeque::new();
        queue.push_back(source);

        let mut found = false;
        while let Some(node) = queue.pop_front() {
            self.stats.nodes_settled += 1;

            if node == target {
                found = true;
                break;
            }

            let weight = node_data[&node].0;
            for (_, edge) in self.g.neighbors_outgoing(node) {
                if let Entry::Vacant(entry) = node_data.entry(edge.target) {
                    entry.insert((weight + edge.weight, Some(node)));
                    queue.push_back(edge.target);
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
        SearchAlgorithm::BreadthFirst
    }
}
