use crate::constants::{NodeId, Weight};
use anyhow::Context;
use log::{info, warn};
use map_reader::RoadMap;
use rustc_hash::FxHashMap;
use std::{fmt, path::Path};

/// Default integer typer for node and edge indices
pub type DefaultIdx = u32;

/// Node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(DefaultIdx);

impl NodeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn end() -> Self {
        NodeIndex(DefaultIdx::MAX)
    }
}

impl From<DefaultIdx> for NodeIndex {
    fn from(ix: DefaultIdx) -> Self {
        NodeIndex(ix)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short version of `NodeIndex::new`
pub fn node_index(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Edge identifier.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EdgeIndex(DefaultIdx);

impl From<DefaultIdx> for EdgeIndex {
    fn from(ix: DefaultIdx) -> Self {
        EdgeIndex(ix)
    }
}

impl EdgeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        EdgeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// An invalid `EdgeIndex` used to denote absence of an edge.
    #[inline]
    pub fn end() -> Self {
        EdgeIndex(DefaultIdx::MAX)
    }
}

/// Road network node (junction or shape point)
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, lat: f64, lon: f64) -> Self {
        Node {
            id: id.into(),
            lat,
            lon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub weight: Weight,
    pub is_bidir: bool,
}

impl Edge {
    pub fn new(source: NodeIndex, target: NodeIndex, weight: Weight) -> Self {
        Edge {
            source,
            target,
            weight,
            is_bidir: false,
        }
    }

    pub fn new_bidir(source: NodeIndex, target: NodeIndex, weight: Weight) -> Self {
        Edge {
            source,
            target,
            weight,
            is_bidir: true,
        }
    }

    pub(crate) fn reverse(&self) -> Self {
        Edge {
            source: self.target,
            target: self.source,
            weight: self.weight,
            is_bidir: self.is_bidir,
        }
    }

    /// True if the edge can be used to travel from `a` to `b`.
    fn joins(&self, a: NodeIndex, b: NodeIndex) -> bool {
        (self.source == a && self.target == b)
            || (self.is_bidir && self.source == b && self.target == a)
    }
}

#[derive(Clone, Default)]
pub struct Graph {
    pub edges_in: Vec<Vec<EdgeIndex>>,
    pub edges_out: Vec<Vec<EdgeIndex>>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    ids: FxHashMap<NodeId, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            edges_in: Vec::new(),
            edges_out: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            ids: FxHashMap::default(),
        }
    }

    pub fn with_capacity(num_nodes: usize, num_edges: usize) -> Self {
        Self {
            edges_in: Vec::with_capacity(num_nodes),
            edges_out: Vec::with_capacity(num_nodes),
            nodes: Vec::with_capacity(num_nodes),
            edges: Vec::with_capacity(num_edges),
            ids: FxHashMap::with_capacity_and_hasher(num_nodes, Default::default()),
        }
    }

    /// Add a new `edge` to the graph.
    ///
    /// **Panics** if the Graph is at the maximum number of edges for its index
    /// type
    /// **Panics** if the source or target node does not exist
    ///
    /// If an edge of the same kind already joins source and target only the
    /// lower weight is kept and the index of the existing edge is returned.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeIndex {
        let edge_idx = EdgeIndex::new(self.edges.len());

        assert!(
            EdgeIndex::end() != edge_idx,
            "Maximum number of edges for index type {} exceeded",
            std::any::type_name::<DefaultIdx>()
        );
        assert!(
            edge.source.index() < self.nodes.len(),
            "Source node index ({}) does not exist",
            edge.source.index()
        );
        assert!(
            edge.target.index() < self.nodes.len(),
            "Target node index ({}) does not exist",
            edge.target.index()
        );

        for old_idx in self.edges_out[edge.source.index()].iter() {
            let old_edge = &mut self.edges[old_idx.index()];
            if !old_edge.joins(edge.source, edge.target) {
                continue;
            }
            if old_edge.is_bidir == edge.is_bidir {
                if edge.weight < old_edge.weight {
                    old_edge.weight = edge.weight;
                }
                return *old_idx;
            }
            // A cheaper road in both directions already covers this one
            if old_edge.is_bidir && old_edge.weight <= edge.weight {
                return *old_idx;
            }
        }

        self.edges_out[edge.source.index()].push(edge_idx);
        self.edges_in[edge.target.index()].push(edge_idx);

        if edge.is_bidir && edge.source != edge.target {
            self.edges_out[edge.target.index()].push(edge_idx);
            self.edges_in[edge.source.index()].push(edge_idx);
        }

        self.edges.push(edge);

        edge_idx
    }

    pub fn add_edges(&mut self, edges: Vec<Edge>) {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    /// Adds a new node to the graph. A node whose id is already known is not
    /// added again, the index of the existing node is returned instead.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(existing) = self.ids.get(&node.id) {
            warn!("Node {} already exists, ignoring duplicate", node.id);
            return *existing;
        }

        let node_idx: NodeIndex = NodeIndex::new(self.nodes.len());

        assert!(
            NodeIndex::end() != node_idx,
            "Maximum number of nodes for index type {} exceeded",
            std::any::type_name::<DefaultIdx>()
        );

        // Create new entry in adjacency list for new node
        self.edges_in.push(Vec::new());
        self.edges_out.push(Vec::new());

        self.ids.insert(node.id.clone(), node_idx);
        self.nodes.push(node);

        node_idx
    }

    pub fn node(&self, node_idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(node_idx.index())
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).and_then(|idx| self.node(idx))
    }

    /// Looks up the dense index of the node with the external `id`.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.ids.get(id).copied()
    }

    /// External id of `node_idx`, mainly for log and error messages.
    pub fn id_of(&self, node_idx: NodeIndex) -> &str {
        self.node(node_idx).map_or("<unknown>", |node| node.id.as_str())
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns an iterator over all nodes of the graph
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns an iterator over all edges of the graph
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges leaving `node_idx`. Bidirectional edges are returned oriented so
    /// that `source == node_idx`.
    pub fn neighbors_outgoing(
        &self,
        node_idx: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, Edge)> + '_ {
        self.edges_out[node_idx.index()].iter().map(move |edge_idx| {
            let edge = &self.edges[edge_idx.index()];
            if edge.source == node_idx {
                (*edge_idx, *edge)
            } else {
                (*edge_idx, edge.reverse())
            }
        })
    }

    pub fn neighbors_incoming(
        &self,
        node_idx: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, Edge)> + '_ {
        self.edges_in[node_idx.index()].iter().map(move |edge_idx| {
            let edge = &self.edges[edge_idx.index()];
            if edge.target == node_idx {
                (*edge_idx, *edge)
            } else {
                (*edge_idx, edge.reverse())
            }
        })
    }

    /// Cheapest edge joining `a` and `b`, in either direction.
    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<(EdgeIndex, Edge)> {
        if a.index() >= self.nodes.len() || b.index() >= self.nodes.len() {
            return None;
        }

        self.neighbors_outgoing(a)
            .filter(|(_, edge)| edge.target == b)
            .chain(
                self.neighbors_outgoing(b)
                    .filter(|(_, edge)| edge.target == a),
            )
            .min_by(|(_, x), (_, y)| x.weight.total_cmp(&y.weight))
    }

    pub fn print_info(&self) {
        println!("{}", self);
    }

    /// Builds the graph from a parsed road map. Every arc becomes one
    /// bidirectional edge.
    pub fn from_road_map(map: &RoadMap) -> anyhow::Result<Self> {
        let mut g = Graph::with_capacity(map.get_nodes().len(), map.get_arcs().len());

        for node in map.get_nodes() {
            g.add_node(Node::new(node.id.clone(), node.lat, node.lon));
        }

        for arc in map.get_arcs() {
            let source = g
                .index_of(&arc.source)
                .with_context(|| format!("Unknown source node {}", arc.source))?;
            let target = g
                .index_of(&arc.target)
                .with_context(|| format!("Unknown target node {}", arc.target))?;
            g.add_edge(Edge::new_bidir(source, target, arc.length));
        }

        Ok(g)
    }

    pub fn from_csv(path_to_nodes: &Path, path_to_edges: &Path) -> anyhow::Result<Self> {
        let map = RoadMap::from_csv(path_to_nodes, path_to_edges)?;
        let g = Graph::from_road_map(&map).context("Could not build graph")?;

        info!("{}", g);
        Ok(g)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph:\t#Nodes: {}, #Edges: {}",
            self.nodes.len(),
            self.edges.len()
        )
    }
}

/// Macro to create a edge from source to target with a weight
///
/// edge!(0 , 1, 3.0) Returns a bidirectional edge
///
/// edge!(0 => 1, 3.0) Returns directed edge
#[macro_export]
macro_rules! edge {
    ($source:expr => $target:expr, $weight:expr) => {
        $crate::graph::Edge::new($source.into(), $target.into(), $weight)
    };
    ($source:expr , $target:expr, $weight:expr) => {
        $crate::graph::Edge::new_bidir($source.into(), $target.into(), $weight)
    };
}

/// Macro to create a node with a given id, lat, lon
/// node!("a", 1.0, 1.0)
#[macro_export]
macro_rules! node {
    ($id:expr, $lat:expr, $lon:expr) => {
        $crate::graph::Node::new($id.to_string(), $lat, $lon)
    };
}
