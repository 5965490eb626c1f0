use crate::{
    constants::Weight,
    graph::{Graph, NodeIndex},
};

/// Path returned by a search. `weight` is the summed length of the edges along
/// `nodes`, which is only minimal for Dijkstra and A*.
#[derive(Debug, PartialEq, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<NodeIndex>,
    pub weight: Weight,
}

impl ShortestPath {
    pub fn new(nodes: Vec<NodeIndex>, weight: Weight) -> Self {
        ShortestPath { nodes, weight }
    }

    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// External ids of the nodes on the path
    pub fn ids<'g>(&self, g: &'g Graph) -> Vec<&'g str> {
        self.nodes.iter().map(|node| g.id_of(*node)).collect()
    }
}
