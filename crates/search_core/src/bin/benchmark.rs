use std::fs::File;

use anyhow::Context;
use log::info;
use search_core::{
    benchmark::{run_benchmark, write_reports_csv},
    graph::Graph,
    plot::write_path_html,
    search::SearchAlgorithm,
    statistics::{average_out_degree, degree_out_hist, format_histogram},
    util::cli,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse();

    let g = Graph::from_csv(&cfg.nodes, &cfg.edges)?;
    info!("Average out degree: {:.2}", average_out_degree(&g));
    info!("Out degree histogram:\n{}", format_histogram(&degree_out_hist(&g)));

    let reports = run_benchmark(&g, &cfg.benchmark)?;
    for report in reports.iter() {
        println!("{}", report);
    }

    if let Some(path) = cfg.report {
        let file = File::create(&path)
            .with_context(|| format!("Could not create report {}", path.display()))?;
        write_reports_csv(&reports, file)?;
        info!("Wrote report to {}", path.display());
    }

    if let Some(plot) = cfg.plot {
        let s = g
            .index_of(&plot.from)
            .with_context(|| format!("Unknown node {}", plot.from))?;
        let t = g
            .index_of(&plot.to)
            .with_context(|| format!("Unknown node {}", plot.to))?;

        let mut search = SearchAlgorithm::Dijkstra.searcher(&g);
        let sp = search
            .search(s, t)
            .with_context(|| format!("No path from {} to {}", plot.from, plot.to))?;
        println!(
            "Path {} -> {}: {} nodes, length {:.2}",
            plot.from,
            plot.to,
            sp.nodes.len(),
            sp.weight
        );
        write_path_html(&g, &sp.nodes, &plot.file)?;
    }

    Ok(())
}
