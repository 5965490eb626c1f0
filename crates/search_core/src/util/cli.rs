use std::path::PathBuf;

use clap::Parser;

use crate::{
    benchmark::{BenchmarkConfig, REFERENCE_QUERY},
    constants::NodeId,
    search::SearchAlgorithm,
};

#[derive(Parser, Debug)]
#[command(version, about = "Benchmark graph searches on a road map", long_about = None)]
struct Cli {
    /// Path to the node file (id,lat,lon)
    #[arg(long, default_value = "nodes.csv")]
    nodes: PathBuf,

    /// Path to the edge file (a,b,length)
    #[arg(long, default_value = "edges.csv")]
    edges: PathBuf,

    /// Seed for sampling the random queries
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of random queries per algorithm
    #[arg(short, long, default_value_t = 200)]
    queries: usize,

    /// Algorithm to benchmark, may be repeated. Defaults to all
    #[arg(short, long = "algorithm", value_enum, value_name = "algo")]
    algorithms: Vec<SearchAlgorithm>,

    /// Start and goal id of the query every algorithm has to solve first
    #[arg(long, num_args = 2, value_names = ["start", "goal"], conflicts_with = "no_reference")]
    reference: Option<Vec<NodeId>>,

    /// Skip the reference query
    #[arg(long)]
    no_reference: bool,

    /// Write the report as CSV to this file
    #[arg(long, value_name = "file")]
    report: Option<PathBuf>,

    /// Plot the shortest path between `--from` and `--to` into this HTML file
    #[arg(long, value_name = "file", requires_all = ["from", "to"])]
    plot: Option<PathBuf>,

    /// Start node id of the plotted path
    #[arg(long, value_name = "id")]
    from: Option<NodeId>,

    /// Goal node id of the plotted path
    #[arg(long, value_name = "id")]
    to: Option<NodeId>,

    /// Hide the progress bars
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone)]
pub struct PlotCfg {
    pub file: PathBuf,
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub benchmark: BenchmarkConfig,
    pub report: Option<PathBuf>,
    pub plot: Option<PlotCfg>,
}

pub fn parse() -> Cfg {
    resolve(Cli::parse())
}

fn resolve(cli: Cli) -> Cfg {
    let mut benchmark = BenchmarkConfig {
        seed: cli.seed,
        queries: cli.queries,
        progress: !cli.quiet,
        ..Default::default()
    };

    if !cli.algorithms.is_empty() {
        benchmark.algorithms = cli.algorithms;
    }

    benchmark.reference = match (cli.no_reference, cli.reference) {
        (true, _) => None,
        (false, Some(ids)) => match ids.as_slice() {
            [start, goal] => Some((start.clone(), goal.clone())),
            _ => None,
        },
        (false, None) => Some((
            REFERENCE_QUERY.0.to_string(),
            REFERENCE_QUERY.1.to_string(),
        )),
    };

    let plot = match (cli.plot, cli.from, cli.to) {
        (Some(file), Some(from), Some(to)) => Some(PlotCfg { file, from, to }),
        _ => None,
    };

    Cfg {
        nodes: cli.nodes,
        edges: cli.edges,
        benchmark,
        report: cli.report,
        plot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> Cfg {
        resolve(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults() {
        let cfg = parse_from(&["benchmark"]);

        assert_eq!(cfg.nodes, PathBuf::from("nodes.csv"));
        assert_eq!(cfg.edges, PathBuf::from("edges.csv"));
        assert_eq!(cfg.benchmark.seed, 42);
        assert_eq!(cfg.benchmark.queries, 200);
        assert_eq!(cfg.benchmark.algorithms, SearchAlgorithm::ALL.to_vec());
        assert_eq!(
            cfg.benchmark.reference,
            Some(("9585187701".to_string(), "5441879433".to_string()))
        );
        assert!(cfg.benchmark.progress);
        assert!(cfg.plot.is_none());
    }

    #[test]
    fn algorithms_and_reference() {
        let cfg = parse_from(&[
            "benchmark",
            "-a",
            "astar",
            "--algorithm",
            "bfs",
            "--reference",
            "1",
            "2",
            "--quiet",
        ]);

        assert_eq!(
            cfg.benchmark.algorithms,
            vec![SearchAlgorithm::AStar, SearchAlgorithm::BreadthFirst]
        );
        assert_eq!(
            cfg.benchmark.reference,
            Some(("1".to_string(), "2".to_string()))
        );
        assert!(!cfg.benchmark.progress);

        let cfg = parse_from(&["benchmark", "--no-reference"]);
        assert!(cfg.benchmark.reference.is_none());
    }

    #[test]
    fn plot_requires_endpoints() {
        assert!(Cli::try_parse_from(["benchmark", "--plot", "path.html"]).is_err());

        let cfg = parse_from(&[
            "benchmark", "--plot", "path.html", "--from", "a", "--to", "b",
        ]);
        let plot = cfg.plot.unwrap();
        assert_eq!(plot.file, PathBuf::from("path.html"));
        assert_eq!((plot.from.as_str(), plot.to.as_str()), ("a", "b"));
    }
}
