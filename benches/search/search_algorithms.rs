use search_core::{
    graph::{node_index, Edge, Graph, Node},
    search::SearchAlgorithm,
    util::test_graphs::fixture_map,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn gen_rand_graph(number_nodes: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(42);

    // 2.5 roads per node on average
    let number_edges: usize = (number_nodes as f32 * 2.5) as usize;

    let mut g = Graph::with_capacity(number_nodes, number_edges);

    for i in 0..number_nodes {
        g.add_node(Node::new(i.to_string(), 0.0, 0.0));
    }

    for _ in 0..number_edges {
        let source = rng.gen_range(0..number_nodes);
        let target = rng.gen_range(0..number_nodes);
        let weight = rng.gen_range(1..100) as f64;
        g.add_edge(Edge::new_bidir(node_index(source), node_index(target), weight));
    }

    g
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut graphs: Vec<Graph> = [1000, 50_000]
        .iter()
        .map(|i| gen_rand_graph(*i))
        .collect();
    graphs.push(fixture_map());

    let mut group = c.benchmark_group("search_algorithms");
    let mut rng = StdRng::seed_from_u64(187);
    for graph in graphs {
        for algorithm in SearchAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), graph.nodes.len()),
                &graph,
                |b, g| {
                    let src = rng.gen_range(0..g.nodes.len());
                    let dst = rng.gen_range(0..g.nodes.len());
                    let mut search = algorithm.searcher(g);
                    b.iter(|| {
                        search.search(node_index(src), node_index(dst));
                    });
                },
            );
        }
    }
    group.finish();
}
