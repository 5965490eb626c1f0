use criterion::{black_box, criterion_group, criterion_main, Criterion};
use map_reader::RoadMap;
use search_core::{graph::Graph, util::test_graphs::fixture_paths};

criterion_group!(benches, parse_fixture, build_graph);
criterion_main!(benches);

fn parse_fixture(c: &mut Criterion) {
    let (nodes, edges) = fixture_paths();

    c.bench_function("parse_fixture", |b| {
        b.iter(|| {
            let _ = RoadMap::from_csv(black_box(&nodes), black_box(&edges));
        })
    });
}

fn build_graph(c: &mut Criterion) {
    let (nodes, edges) = fixture_paths();
    let map = RoadMap::from_csv(&nodes, &edges).unwrap();

    c.bench_function("build_graph", |b| {
        b.iter(|| {
            let _ = Graph::from_road_map(black_box(&map));
        })
    });
}
