//! Crate to compare uninformed and informed path searches on road networks.
//!
//! # Basic usage
//! ```no_run
//! use std::path::Path;
//!
//! use search_core::prelude::*;
//!
//! // Load the road network from its node and edge files
//! let g = Graph::from_csv(Path::new("nodes.csv"), Path::new("edges.csv"))
//!     .expect("Failed to load graph");
//!
//! // Run a single query
//! let s = g.index_of("9585187701").unwrap();
//! let t = g.index_of("5441879433").unwrap();
//! let mut astar = SearchAlgorithm::AStar.searcher(&g);
//! let sp = astar.search(s, t).expect("No path found");
//! validate_path(&g, s, t, &sp.nodes).expect("Invalid path");
//!
//! // Benchmark all algorithms on random queries
//! let reports = run_benchmark(&g, &BenchmarkConfig::default()).unwrap();
//! for report in reports {
//!     println!("{}", report);
//! }
//!```
//! [`Graph`]: crate::graph::Graph
pub mod benchmark;
pub mod constants;
pub mod graph;
pub mod plot;
pub mod prelude;
pub mod search;
pub mod statistics;
pub mod util;
pub mod validate;
