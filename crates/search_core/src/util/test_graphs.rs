use std::path::PathBuf;

use crate::{
    edge,
    graph::{node_index, Graph, Node},
};

/// Weighted undirected graph with eleven nodes. Coordinates are scaled down so
/// the straight line between neighbours stays below the edge weights.
pub fn generate_complex_graph() -> Graph {
    let mut graph = Graph::new();

    let at = |id: &str, x: f64, y: f64| Node::new(id, x * 1e-6, y * 1e-6);

    let a = graph.add_node(at("A", 6.0, 2.0));
    let b = graph.add_node(at("B", 3.0, 3.0));
    let c = graph.add_node(at("C", 4.0, 6.0));
    let d = graph.add_node(at("D", 2.0, 7.0));
    let e = graph.add_node(at("E", 3.0, 10.0));
    let f = graph.add_node(at("F", 2.0, 13.0));
    let g = graph.add_node(at("G", 7.0, 15.0));
    let h = graph.add_node(at("H", 5.0, 12.0));
    let i = graph.add_node(at("I", 7.0, 11.0));
    let j = graph.add_node(at("J", 5.0, 9.0));
    let k = graph.add_node(at("K", 7.0, 7.0));

    graph.add_edges(vec![
        edge!(a, b, 3.0),
        edge!(a, c, 5.0),
        edge!(a, k, 3.0),
        edge!(b, d, 5.0),
        edge!(b, c, 3.0),
        edge!(c, d, 2.0),
        edge!(c, j, 2.0),
        edge!(d, j, 4.0),
        edge!(d, e, 7.0),
        edge!(e, j, 3.0),
        edge!(e, f, 6.0),
        edge!(f, h, 2.0),
        edge!(f, g, 4.0),
        edge!(g, h, 3.0),
        edge!(g, i, 5.0),
        edge!(h, i, 3.0),
        edge!(h, j, 2.0),
        edge!(i, j, 4.0),
        edge!(i, k, 6.0),
        edge!(j, k, 3.0),
    ]);

    graph
}

pub fn generate_simple_graph() -> Graph {
    //           B
    //           |
    // E -> A -> C
    //      |  /
    //      D
    let mut g = Graph::new();

    let a = g.add_node(Node::new("A", 0.0, 0.0));
    let b = g.add_node(Node::new("B", 0.0, 0.0));
    let c = g.add_node(Node::new("C", 0.0, 0.0));
    let d = g.add_node(Node::new("D", 0.0, 0.0));
    let e = g.add_node(Node::new("E", 0.0, 0.0));

    g.add_edge(edge!(a => c, 1.0));
    g.add_edge(edge!(a => d, 1.0));
    g.add_edge(edge!(e => a, 1.0));
    g.add_edge(edge!(c, b, 1.0));
    g.add_edge(edge!(c, d, 1.0));

    g
}

/// Directed graph with three routes of different length and hop count from 0
/// to 4.
pub fn generate_tiered_graph() -> Graph {
    //      7 -> 8 -> 9
    //      |         |
    // 0 -> 5 -> 6 -  |
    // |         |  \ |
    // 1 -> 2 -> 3 -> 4
    let mut g = Graph::new();

    for i in 0..10 {
        g.add_node(Node::new(i.to_string(), 0.0, 0.0));
    }

    for (source, target, weight) in [
        (0, 1, 1.0),
        (1, 2, 1.0),
        (2, 3, 1.0),
        (3, 4, 20.0),
        (0, 5, 5.0),
        (5, 6, 1.0),
        (6, 4, 20.0),
        (6, 3, 20.0),
        (5, 7, 5.0),
        (7, 8, 1.0),
        (8, 9, 1.0),
        (9, 4, 1.0),
    ] {
        g.add_edge(edge!(node_index(source) => node_index(target), weight));
    }

    g
}

pub fn generate_disconnected_graph() -> Graph {
    // 0 -> 1 -> 2
    // 3 -> 4 -> 5
    let mut g = Graph::new();
    for i in 0..6 {
        g.add_node(Node::new(i.to_string(), 0.0, 0.0));
    }

    g.add_edge(edge!(node_index(0) => node_index(1), 1.0));
    g.add_edge(edge!(node_index(1) => node_index(2), 1.0));
    g.add_edge(edge!(node_index(3) => node_index(4), 3.0));
    g.add_edge(edge!(node_index(4) => node_index(5), 1.0));

    g
}

/// Paths of the node and edge file of the bundled road map: a 6x5 street grid
/// with two shortcuts, a gap and a separate two-node island.
pub fn fixture_paths() -> (PathBuf, PathBuf) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_data");
    (dir.join("nodes.csv"), dir.join("edges.csv"))
}

pub fn fixture_map() -> Graph {
    let (nodes, edges) = fixture_paths();
    Graph::from_csv(&nodes, &edges).unwrap()
}
