//! Re-exports of the most commonly used items in `search_core`.
pub use crate::benchmark::run_benchmark;
pub use crate::benchmark::AlgorithmReport;
pub use crate::benchmark::BenchmarkConfig;

pub use crate::search;
pub use crate::search::shortest_path::ShortestPath;
pub use crate::search::PathSearch;
pub use crate::search::SearchAlgorithm;

pub use crate::graph::node_index;
pub use crate::graph::Graph;
pub use crate::util::test_graphs::generate_simple_graph;
pub use crate::validate::validate_path;
pub use crate::validate::PathError;
