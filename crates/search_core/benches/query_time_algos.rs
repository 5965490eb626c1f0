use std::{fs::File, io::Write, path::Path};

use indicatif::ProgressBar;
use plotly::{
    box_plot::BoxPoints,
    common::{Line, Marker, MarkerSymbol, Title},
    layout::{Axis, AxisType, BoxMode},
    BoxPlot, Layout, Plot,
};
use search_core::{
    benchmark::sample_queries, graph::Graph, search::SearchAlgorithm,
    util::test_graphs::fixture_map,
};

// Times every algorithm on the same random queries and draws one box per
// algorithm. Usage: query_time_algos [nodes.csv edges.csv]
fn main() {
    const ITERATIONS: usize = 1_000;

    let args: Vec<String> = std::env::args()
        .skip(1)
        .filter(|p| p.ends_with(".csv"))
        .collect();

    let g = match args.as_slice() {
        [nodes, edges] => {
            Graph::from_csv(Path::new(nodes), Path::new(edges)).expect("Invalid map files")
        }
        _ => fixture_map(),
    };

    let queries = sample_queries(&g, 187, ITERATIONS);

    let mut timings = vec![Vec::with_capacity(ITERATIONS); SearchAlgorithm::ALL.len()];
    let mut nodes_settled = vec![Vec::with_capacity(ITERATIONS); SearchAlgorithm::ALL.len()];

    let pb = ProgressBar::new((ITERATIONS * SearchAlgorithm::ALL.len()) as u64);
    for (i, algorithm) in SearchAlgorithm::ALL.iter().enumerate() {
        let mut search = algorithm.searcher(&g);
        for &(s, t) in queries.iter() {
            search.search(s, t);
            let stats = search.stats();
            timings[i].push(stats.duration.unwrap_or_default().as_micros() as f64);
            nodes_settled[i].push(stats.nodes_settled as f64);
            pb.inc(1);
        }
    }
    pb.finish_with_message("Measurements finished.");

    let mut file = File::create("query_time_algos.csv").expect("Couldn't create file");
    writeln!(&mut file, "algorithm,avg_time_us,avg_nodes_settled").unwrap();
    for (i, algorithm) in SearchAlgorithm::ALL.iter().enumerate() {
        writeln!(
            &mut file,
            "{},{:.2},{:.2}",
            algorithm,
            average(&timings[i]),
            average(&nodes_settled[i])
        )
        .unwrap();
    }

    let marker = Marker::new().symbol(MarkerSymbol::CircleOpen);

    let mut plot = Plot::new();
    for (algorithm, values) in SearchAlgorithm::ALL.iter().zip(timings) {
        let x = vec![algorithm.to_string(); values.len()];
        let trace = BoxPlot::new_xy(x, values)
            .name(algorithm.name())
            .marker(marker.clone())
            .box_points(BoxPoints::Outliers)
            .line(Line::new().width(0.7))
            .whisker_width(8.);
        plot.add_trace(trace);
    }

    let layout = Layout::new()
        .y_axis(
            Axis::new()
                .title(Title::new("Query-Time [μs]"))
                .type_(AxisType::Log),
        )
        .x_axis(Axis::new().title(Title::new("Algorithm")))
        .box_mode(BoxMode::Group);
    plot.set_layout(layout);

    plot.write_html("query_time_algos.html");
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
