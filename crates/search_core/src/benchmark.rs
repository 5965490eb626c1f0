//! Times every search on the same set of randomly sampled queries and checks
//! that the returned paths are valid and, for Dijkstra and A*, minimal.
use std::{
    fmt,
    io::Write,
    time::{Duration, Instant},
};

use anyhow::{bail, Context};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::{
    constants::{NodeId, Weight},
    graph::{node_index, Graph, NodeIndex},
    search::SearchAlgorithm,
    validate::{validate_search, weights_match},
};

/// Query every algorithm has to solve before the timed runs
pub const REFERENCE_QUERY: (&str, &str) = ("9585187701", "5441879433");

#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub seed: u64,
    pub queries: usize,
    pub reference: Option<(NodeId, NodeId)>,
    pub algorithms: Vec<SearchAlgorithm>,
    pub progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            seed: 42,
            queries: 200,
            reference: Some((
                REFERENCE_QUERY.0.to_string(),
                REFERENCE_QUERY.1.to_string(),
            )),
            algorithms: SearchAlgorithm::ALL.to_vec(),
            progress: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlgorithmReport {
    pub algorithm: SearchAlgorithm,
    pub queries: usize,
    pub unreachable: usize,
    /// Time spent inside the search calls only
    pub elapsed: Duration,
    pub total_length: Weight,
    pub nodes_settled: usize,
}

impl AlgorithmReport {
    fn new(algorithm: SearchAlgorithm) -> Self {
        AlgorithmReport {
            algorithm,
            queries: 0,
            unreachable: 0,
            elapsed: Duration::ZERO,
            total_length: 0.0,
            nodes_settled: 0,
        }
    }
}

impl fmt::Display for AlgorithmReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed in {:.3}s with total length {:.2}",
            self.algorithm,
            self.elapsed.as_secs_f64(),
            self.total_length
        )?;
        if self.unreachable > 0 {
            write!(
                f,
                " ({} of {} queries unreachable)",
                self.unreachable, self.queries
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ReportRecord<'a> {
    algorithm: &'a str,
    queries: usize,
    unreachable: usize,
    elapsed_s: f64,
    total_length: Weight,
    nodes_settled: usize,
}

/// Writes one CSV row per report.
pub fn write_reports_csv(reports: &[AlgorithmReport], out: impl Write) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for report in reports {
        wtr.serialize(ReportRecord {
            algorithm: report.algorithm.name(),
            queries: report.queries,
            unreachable: report.unreachable,
            elapsed_s: report.elapsed.as_secs_f64(),
            total_length: report.total_length,
            nodes_settled: report.nodes_settled,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Draws `n` (start, goal) pairs uniformly from all nodes. Start and goal may
/// be the same node.
pub fn sample_queries(g: &Graph, seed: u64, n: usize) -> Vec<(NodeIndex, NodeIndex)> {
    let num_nodes = g.num_nodes();
    if num_nodes == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let start = rng.gen_range(0..num_nodes);
            let goal = rng.gen_range(0..num_nodes);
            (node_index(start), node_index(goal))
        })
        .collect()
}

/// What the algorithms run so far found for one query. The first algorithm
/// fixes reachability; the first optimal algorithm fixes the minimal length.
#[derive(Debug, Default, Clone)]
pub(crate) struct QueryOutcome {
    reachable: Option<(bool, SearchAlgorithm)>,
    optimal: Option<(Weight, SearchAlgorithm)>,
    shortest: Option<(Weight, SearchAlgorithm)>,
}

impl QueryOutcome {
    pub(crate) fn record(
        &mut self,
        algorithm: SearchAlgorithm,
        length: Option<Weight>,
    ) -> anyhow::Result<()> {
        let reachable = length.is_some();
        match self.reachable {
            Some((expected, other)) if expected != reachable => bail!(
                "{} reports the goal as {}, {} disagrees",
                algorithm,
                if reachable { "reachable" } else { "unreachable" },
                other
            ),
            Some(_) => {}
            None => self.reachable = Some((reachable, algorithm)),
        }

        let Some(length) = length else {
            return Ok(());
        };

        if let Some((optimal, other)) = self.optimal {
            if length < optimal && !weights_match(length, optimal) {
                bail!(
                    "{} returned length {:.2} but {} found {:.2}",
                    other,
                    optimal,
                    algorithm,
                    length
                );
            }
        }

        if algorithm.is_optimal() {
            if let Some((shortest, other)) = self.shortest {
                if shortest < length && !weights_match(shortest, length) {
                    bail!(
                        "{} returned length {:.2} but {} found {:.2}",
                        algorithm,
                        length,
                        other,
                        shortest
                    );
                }
            }
            if self.optimal.is_none() {
                self.optimal = Some((length, algorithm));
            }
        }

        if self.shortest.map_or(true, |(shortest, _)| length < shortest) {
            self.shortest = Some((length, algorithm));
        }
        Ok(())
    }
}

fn resolve_reference(g: &Graph, cfg: &BenchmarkConfig) -> Option<(NodeIndex, NodeIndex)> {
    let (start, goal) = cfg.reference.as_ref()?;
    match (g.index_of(start), g.index_of(goal)) {
        (Some(s), Some(t)) => Some((s, t)),
        _ => {
            warn!(
                "Skipping reference query {} -> {}: node not in map",
                start, goal
            );
            None
        }
    }
}

/// Runs every configured algorithm on the reference query and on
/// `cfg.queries` sampled queries. Fails on the first invalid path or on
/// results that contradict each other.
pub fn run_benchmark(g: &Graph, cfg: &BenchmarkConfig) -> anyhow::Result<Vec<AlgorithmReport>> {
    let queries = sample_queries(g, cfg.seed, cfg.queries);
    let reference = resolve_reference(g, cfg);
    let mut outcomes = vec![QueryOutcome::default(); queries.len()];

    info!(
        "BEGIN benchmark: {} queries, seed {}, {} algorithms",
        queries.len(),
        cfg.seed,
        cfg.algorithms.len()
    );

    let mut reports = Vec::with_capacity(cfg.algorithms.len());
    for &algorithm in cfg.algorithms.iter() {
        let mut search = algorithm.searcher(g);

        if let Some((s, t)) = reference {
            let sp = search.search(s, t);
            let length = validate_search(g, s, t, sp.as_ref()).with_context(|| {
                format!(
                    "{} failed the reference query {} -> {}",
                    algorithm,
                    g.id_of(s),
                    g.id_of(t)
                )
            })?;
            debug!("{}: reference query has length {:.2}", algorithm, length);
        }

        let mut report = AlgorithmReport::new(algorithm);
        let pb = if cfg.progress {
            ProgressBar::new(queries.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        for (&(s, t), outcome) in queries.iter().zip(outcomes.iter_mut()) {
            let now = Instant::now();
            let sp = search.search(s, t);
            report.elapsed += now.elapsed();

            report.queries += 1;
            report.nodes_settled += search.stats().nodes_settled;

            let length = match sp {
                Some(ref sp) => Some(
                    validate_search(g, s, t, Some(sp))
                        .with_context(|| query_context(g, algorithm, s, t))?,
                ),
                None => {
                    report.unreachable += 1;
                    None
                }
            };
            outcome
                .record(algorithm, length)
                .with_context(|| query_context(g, algorithm, s, t))?;

            if let Some(length) = length {
                report.total_length += length;
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!("{}", report);
        reports.push(report);
    }

    Ok(reports)
}

fn query_context(g: &Graph, algorithm: SearchAlgorithm, s: NodeIndex, t: NodeIndex) -> String {
    format!("{} failed on query {} -> {}", algorithm, g.id_of(s), g.id_of(t))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::util::test_graphs::fixture_map;

    use super::*;

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn report(reports: &[AlgorithmReport], algorithm: SearchAlgorithm) -> &AlgorithmReport {
        reports.iter().find(|r| r.algorithm == algorithm).unwrap()
    }

    #[test]
    fn sampling_is_reproducible() {
        let g = fixture_map();

        let a = sample_queries(&g, 42, 200);
        let b = sample_queries(&g, 42, 200);
        let c = sample_queries(&g, 43, 200);

        assert_eq!(a.len(), 200);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a
            .iter()
            .all(|(s, t)| s.index() < g.num_nodes() && t.index() < g.num_nodes()));
        assert!(sample_queries(&Graph::new(), 42, 10).is_empty());
    }

    #[test]
    fn benchmark_on_fixture_map() {
        init_log();
        let g = fixture_map();

        let reports = run_benchmark(&g, &BenchmarkConfig::default()).unwrap();
        assert_eq!(reports.len(), 4);

        let dijkstra = report(&reports, SearchAlgorithm::Dijkstra);
        let astar = report(&reports, SearchAlgorithm::AStar);
        let bfs = report(&reports, SearchAlgorithm::BreadthFirst);
        let dfs = report(&reports, SearchAlgorithm::DepthFirst);

        for r in reports.iter() {
            assert_eq!(r.queries, 200);
            assert_eq!(r.unreachable, dijkstra.unreachable);
        }
        assert_abs_diff_eq!(dijkstra.total_length, astar.total_length, epsilon = 1e-3);
        assert!(bfs.total_length >= dijkstra.total_length - 1e-3);
        assert!(dfs.total_length >= dijkstra.total_length - 1e-3);
        assert!(astar.nodes_settled <= dijkstra.nodes_settled);
    }

    #[test]
    fn missing_reference_is_skipped() {
        let g = fixture_map();
        let cfg = BenchmarkConfig {
            queries: 10,
            reference: Some(("1".to_string(), "2".to_string())),
            algorithms: vec![SearchAlgorithm::Dijkstra],
            ..Default::default()
        };

        let reports = run_benchmark(&g, &cfg).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].queries, 10);
    }

    #[test]
    fn unreachable_reference_fails() {
        let g = fixture_map();
        let cfg = BenchmarkConfig {
            queries: 1,
            // The island is not connected to the grid
            reference: Some(("9585187701".to_string(), "7700000001".to_string())),
            ..Default::default()
        };

        let err = run_benchmark(&g, &cfg).unwrap_err();
        assert!(err.to_string().contains("reference query"));
    }

    #[test]
    fn outcome_detects_reachability_disagreement() {
        let mut outcome = QueryOutcome::default();
        outcome.record(SearchAlgorithm::DepthFirst, None).unwrap();

        let err = outcome
            .record(SearchAlgorithm::Dijkstra, Some(3.0))
            .unwrap_err();
        assert!(err.to_string().contains("depth_first disagrees"));
    }

    #[test]
    fn outcome_detects_suboptimal_path() {
        let mut outcome = QueryOutcome::default();
        outcome.record(SearchAlgorithm::BreadthFirst, Some(10.0)).unwrap();
        outcome.record(SearchAlgorithm::Dijkstra, Some(8.0)).unwrap();
        outcome.record(SearchAlgorithm::DepthFirst, Some(12.0)).unwrap();

        // Longer than what Dijkstra found
        assert!(outcome.record(SearchAlgorithm::AStar, Some(9.0)).is_err());
        assert!(outcome.record(SearchAlgorithm::AStar, Some(8.0)).is_ok());

        // A non-optimal search must never beat an optimal one
        let mut outcome = QueryOutcome::default();
        outcome.record(SearchAlgorithm::Dijkstra, Some(8.0)).unwrap();
        let err = outcome
            .record(SearchAlgorithm::DepthFirst, Some(7.0))
            .unwrap_err();
        assert!(err.to_string().starts_with("dijkstra returned length 8.00"));
    }

    #[test]
    fn report_formatting() {
        let mut report = AlgorithmReport::new(SearchAlgorithm::AStar);
        report.queries = 200;
        report.elapsed = Duration::from_millis(1234);
        report.total_length = 98765.4321;

        assert_eq!(
            report.to_string(),
            "astar passed in 1.234s with total length 98765.43"
        );

        report.unreachable = 3;
        assert!(report.to_string().ends_with("(3 of 200 queries unreachable)"));

        let mut out = Vec::new();
        write_reports_csv(&[report], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(
            "algorithm,queries,unreachable,elapsed_s,total_length,nodes_settled\nastar,200,3,1.234,"
        ));
    }
}
