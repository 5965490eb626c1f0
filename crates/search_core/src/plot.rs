//! Draws the road network with a highlighted path.
use std::path::Path;

use anyhow::Context;
use log::info;
use plotly::{
    color::Rgb,
    common::{Line, Mode, Title},
    layout::Axis,
    Layout, Plot, Scatter,
};

use crate::graph::{Graph, NodeIndex};

/// All roads in grey, the `path` in blue. x is the longitude, y the latitude.
pub fn plot_path(g: &Graph, path: &[NodeIndex]) -> Plot {
    // Each road is a separate segment, `None` breaks the line between them
    let mut road_lon: Vec<Option<f64>> = Vec::with_capacity(g.num_edges() * 3);
    let mut road_lat: Vec<Option<f64>> = Vec::with_capacity(g.num_edges() * 3);
    for edge in g.edges() {
        let a = &g.nodes[edge.source.index()];
        let b = &g.nodes[edge.target.index()];
        road_lon.extend([Some(a.lon), Some(b.lon), None]);
        road_lat.extend([Some(a.lat), Some(b.lat), None]);
    }

    let (path_lon, path_lat): (Vec<f64>, Vec<f64>) = path
        .iter()
        .filter_map(|node| g.node(*node))
        .map(|node| (node.lon, node.lat))
        .unzip();

    let roads = Scatter::new(road_lon, road_lat)
        .mode(Mode::Lines)
        .name("roads")
        .connect_gaps(false)
        .line(Line::new().color(Rgb::new(160, 160, 160)).width(1.0));

    let route = Scatter::new(path_lon, path_lat)
        .mode(Mode::LinesMarkers)
        .name("path")
        .line(Line::new().color(Rgb::new(39, 136, 229)).width(3.0));

    let mut plot = Plot::new();
    plot.add_trace(roads);
    plot.add_trace(route);

    let layout = Layout::new()
        .title(Title::new(&format!("Path with {} nodes", path.len())))
        .x_axis(Axis::new().title(Title::new("Longitude")))
        .y_axis(Axis::new().title(Title::new("Latitude")));
    plot.set_layout(layout);

    plot
}

/// Writes the plot of `path` to a standalone HTML file.
pub fn write_path_html(g: &Graph, path: &[NodeIndex], file: &Path) -> anyhow::Result<()> {
    let plot = plot_path(g, path);
    std::fs::write(file, plot.to_html())
        .with_context(|| format!("Could not write {}", file.display()))?;
    info!("Wrote path plot to {}", file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        search::{dijkstra::Dijkstra, PathSearch},
        util::test_graphs::fixture_map,
    };

    use super::*;

    #[test]
    fn plot_contains_both_traces() {
        let g = fixture_map();
        let s = g.index_of("9585187701").unwrap();
        let t = g.index_of("5441879433").unwrap();
        let sp = Dijkstra::new(&g).search(s, t).unwrap();

        let html = plot_path(&g, &sp.nodes).to_html();

        assert!(html.contains("\"name\": \"roads\""));
        assert!(html.contains("\"name\": \"path\""));
        assert!(html.contains(&format!("Path with {} nodes", sp.nodes.len())));
    }

    #[test]
    fn empty_path_still_draws_roads() {
        let g = fixture_map();

        let html = plot_path(&g, &[]).to_html();

        assert!(html.contains("\"name\": \"roads\""));
        assert!(html.contains("Path with 0 nodes"));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let g = fixture_map();
        let file = std::env::temp_dir()
            .join("search_core_missing_dir")
            .join("nested")
            .join("path.html");

        let err = write_path_html(&g, &[], &file).unwrap_err();
        assert!(err.to_string().contains("path.html"));
    }

    #[test]
    fn write_html_file() {
        let g = fixture_map();
        let file = std::env::temp_dir().join("search_core_plot_test.html");

        write_path_html(&g, &[], &file).unwrap();

        let html = std::fs::read_to_string(&file).unwrap();
        assert!(html.contains("\"name\": \"roads\""));
        let _ = std::fs::remove_file(&file);
    }
}
