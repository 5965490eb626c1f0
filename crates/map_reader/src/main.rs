use std::path::Path;

use anyhow::Context;
use map_reader::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let now = std::time::Instant::now();
    let mut args = std::env::args().skip(1);
    let node_path = args.next().context("No path to node file given")?;
    let edge_path = args.next().context("No path to edge file given")?;

    let map = RoadMap::from_csv(Path::new(&node_path), Path::new(&edge_path))?;

    let elapsed = now.elapsed();

    println!(
        "Finished reading map in {}.{:03} seconds",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );
    println!(
        "Map has {} nodes and {} arcs",
        map.get_nodes().len(),
        map.get_arcs().len()
    );
    Ok(())
}
