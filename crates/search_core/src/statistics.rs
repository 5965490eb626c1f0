use std::{
    fmt::{Debug, Display},
    time::{Duration, Instant},
};

use histogram::Histogram;

use crate::graph::Graph;

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    pub nodes_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.nodes_settled = 0;
        self.duration = None;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} nodes settled in {:?}",
            self.nodes_settled,
            self.duration.unwrap_or_default()
        )
    }
}

fn degree_histogram(g: &Graph, outgoing: bool) -> Histogram {
    let hist = Histogram::new(0, 10, 30).unwrap();
    let adjacency = if outgoing { &g.edges_out } else { &g.edges_in };
    for edges in adjacency {
        hist.increment(edges.len() as u64, 1).unwrap();
    }
    hist
}

pub fn degree_out_hist(g: &Graph) -> Histogram {
    degree_histogram(g, true)
}

pub fn degree_in_hist(g: &Graph) -> Histogram {
    degree_histogram(g, false)
}

/// Renders the non-empty buckets of `hist`, one `[low-high]: count` per line.
pub fn format_histogram(hist: &Histogram) -> String {
    let mut out = String::new();
    for bucket in hist.into_iter().filter(|b| b.count() > 0) {
        out.push_str(&format!(
            "[{}-{}]: {}\n",
            bucket.low(),
            bucket.high(),
            bucket.count()
        ));
    }
    out
}

fn average_degree(adjacency: &[Vec<crate::graph::EdgeIndex>]) -> f64 {
    if adjacency.is_empty() {
        return 0.0;
    }
    let sum: usize = adjacency.iter().map(|edges| edges.len()).sum();
    sum as f64 / adjacency.len() as f64
}

pub fn average_in_degree(g: &Graph) -> f64 {
    average_degree(&g.edges_in)
}

pub fn average_out_degree(g: &Graph) -> f64 {
    average_degree(&g.edges_out)
}
