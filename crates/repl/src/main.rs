//! Interactive shell to run single queries and benchmarks on a road map.
use std::path::{Path, PathBuf};

use log::info;
use reedline_repl_rs::clap::{value_parser, Arg, ArgMatches, Command};
use reedline_repl_rs::{Repl, Result};
use search_core::{
    benchmark::{run_benchmark, BenchmarkConfig},
    graph::{Graph, NodeIndex},
    plot::write_path_html,
    search::{dijkstra::Dijkstra, PathSearch, SearchAlgorithm},
    statistics::{
        average_in_degree, average_out_degree, degree_in_hist, degree_out_hist, format_histogram,
    },
    validate::validate_search,
};

/// Print graph info
fn info(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let g = &context.graph;
    Ok(Some(format!(
        "{}\nAverage degree: out {:.2}, in {:.2}\nOut degrees:\n{}In degrees:\n{}",
        g,
        average_out_degree(g),
        average_in_degree(g),
        format_histogram(&degree_out_hist(g)),
        format_histogram(&degree_in_hist(g))
    )))
}

fn run_search(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let algorithm = match args.get_one::<String>("algo").unwrap().parse::<SearchAlgorithm>() {
        Ok(algorithm) => algorithm,
        Err(e) => return Ok(Some(e.to_string())),
    };
    let (s, t) = match context.query(&args) {
        Ok(query) => query,
        Err(msg) => return Ok(Some(msg)),
    };

    let g = &context.graph;
    let mut search = algorithm.searcher(g);
    let sp = search.search(s, t);

    let Some(sp) = sp.as_ref() else {
        return Ok(Some(format!(
            "No path from {} to {}\n{}",
            g.id_of(s),
            g.id_of(t),
            search.stats()
        )));
    };

    let mut out = String::new();
    for id in sp.ids(g) {
        out.push_str(&format!("{}\n", id));
    }
    match validate_search(g, s, t, Some(sp)) {
        Ok(length) => out.push_str(&format!("{} hops, length {:.2}\n", sp.hops(), length)),
        Err(e) => out.push_str(&format!("Invalid path: {}\n", e)),
    }
    out.push_str(&format!("{}", search.stats()));
    Ok(Some(out))
}

fn bench(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let mut cfg = BenchmarkConfig {
        progress: true,
        ..Default::default()
    };
    if let Some(n) = args.get_one::<usize>("n") {
        cfg.queries = *n;
    }
    if let Some(seed) = args.get_one::<u64>("seed") {
        cfg.seed = *seed;
    }

    match run_benchmark(&context.graph, &cfg) {
        Ok(reports) => Ok(Some(
            reports
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )),
        Err(e) => Ok(Some(format!("Benchmark failed: {:#}", e))),
    }
}

fn plot(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let (s, t) = match context.query(&args) {
        Ok(query) => query,
        Err(msg) => return Ok(Some(msg)),
    };
    let file = args.get_one::<String>("file").unwrap();

    let g = &context.graph;
    let mut dijkstra = Dijkstra::new(g);
    match dijkstra.search(s, t) {
        Some(sp) => match write_path_html(g, &sp.nodes, Path::new(file)) {
            Ok(()) => Ok(Some(format!(
                "Wrote path with {} nodes and length {:.2} to {}",
                sp.nodes.len(),
                sp.weight,
                file
            ))),
            Err(e) => Ok(Some(format!("Plot failed: {:#}", e))),
        },
        None => Ok(Some(format!("No path from {} to {}", g.id_of(s), g.id_of(t)))),
    }
}

struct Context {
    graph: Graph,
}

impl Context {
    fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Resolves the `src` and `dst` arguments to node indices.
    fn query(&self, args: &ArgMatches) -> std::result::Result<(NodeIndex, NodeIndex), String> {
        let resolve = |name: &str| {
            let id = args.get_one::<String>(name).unwrap();
            self.graph
                .index_of(id)
                .ok_or_else(|| format!("Unknown node {}", id))
        };
        Ok((resolve("src")?, resolve("dst")?))
    }
}

fn node_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).required(true).help(help)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(nodes), Some(edges)) = (args.next(), args.next()) else {
        eprintln!("Usage: repl <nodes.csv> <edges.csv>");
        std::process::exit(2);
    };

    let graph = match Graph::from_csv(Path::new(&nodes), Path::new(&edges)) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Could not load map: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("{}", graph);
    let context = Context::new(graph);

    let mut repl = Repl::new(context)
        .with_name("Pathfinder")
        .with_version("v0.1.0")
        .with_description("Simple REPL to test graph search algorithms")
        .with_banner("Welcome to Pathfinder")
        .with_history(PathBuf::from("history"), 100)
        .with_command(Command::new("info").about("Print graph info"), info)
        .with_command(
            Command::new("search")
                .arg(
                    Arg::new("algo")
                        .required(true)
                        .help("One of dfs, bfs, dijkstra, astar"),
                )
                .arg(node_arg("src", "ID of source node"))
                .arg(node_arg("dst", "ID of destination node"))
                .about("Search a path with the given algorithm"),
            run_search,
        )
        .with_command(
            Command::new("bench")
                .arg(
                    Arg::new("n")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Number of random queries per algorithm"),
                )
                .arg(
                    Arg::new("seed")
                        .value_parser(value_parser!(u64))
                        .required(false)
                        .help("Seed for sampling the queries"),
                )
                .about("Benchmark all algorithms on random queries"),
            bench,
        )
        .with_command(
            Command::new("plot")
                .arg(node_arg("src", "ID of source node"))
                .arg(node_arg("dst", "ID of destination node"))
                .arg(Arg::new("file").required(true).help("HTML file to write"))
                .about("Plot the shortest path into an HTML file"),
            plot,
        );

    repl.run()
}
