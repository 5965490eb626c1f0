//! Depth-first search. Finds some path to the target, usually not the shortest.
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    graph::{Graph, NodeIndex},
    statistics::SearchStats,
};

use super::{shortest_path::ShortestPath, NodeData, PathSearch, SearchAlgorithm};

pub struct DepthFirst<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> DepthFirst<'a> {
    pub fn new(g: &'a Graph) -> Self {
        DepthFirst {
            g,
            stats: SearchStats::default(),
        }
    }
}

impl<'a> PathSearch for DepthFirst<'a> {
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

        let mut settled: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut stack = vec![source];

        while let Some(node) = stack.pop() {
            if !settled.insert(node) {
                continue;
            }
            self.stats.nodes_settled += 1;

            if node == target {
                break;
            }

            let weight = node_data[&node].0;
            let successors: Vec<_> = self
                .g
                .neighbors_outgoing(node)
                .filter(|(_, edge)| !settled.contains(&edge.target))
                .collect();

            // Reversed so the first neighbour ends up on top of the stack.
            // The last push of a node is always popped first, so overwriting
            // its predecessor keeps the stored path consistent.
            for (_, edge) in successors.into_iter().rev() {
                node_data.insert(edge.target, (weight + edge.weight, Some(node)));
                stack.push(edge.target);
            }
        }
        self.stats.finish();

        if !settled.contains(&target) {
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
        SearchAlgorithm::DepthFirst
    }
}
