//! Reader for road maps stored as a pair of CSV files.
//!
//! The node file has the columns `id,lat,lon`, the edge file `a,b,length`.
//! Further columns are ignored. Ids are kept as strings.
use anyhow::{bail, Context};
use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawNode {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

/// Road segment between two nodes. Length is given in metres.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Arc {
    #[serde(rename = "a")]
    pub source: String,
    #[serde(rename = "b")]
    pub target: String,
    pub length: f64,
}

impl Arc {
    pub fn new(source: impl Into<String>, target: impl Into<String>, length: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            length,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoadMap {
    nodes: Vec<RawNode>,
    arcs: Vec<Arc>,
}

impl RoadMap {
    pub fn new() -> Self {
        RoadMap {
            nodes: Vec::new(),
            arcs: Vec::new(),
        }
    }

    pub fn add_node(&mut self, id: impl Into<String>, lat: f64, lon: f64) {
        self.nodes.push(RawNode {
            id: id.into(),
            lat,
            lon,
        });
    }

    pub fn add_arc(&mut self, source: impl Into<String>, target: impl Into<String>, length: f64) {
        self.arcs.push(Arc::new(source, target, length));
    }

    /// Nodes in file order.
    pub fn get_nodes(&self) -> &[RawNode] {
        &self.nodes
    }

    pub fn get_arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn from_csv(node_path: &Path, edge_path: &Path) -> anyhow::Result<RoadMap> {
        let now = std::time::Instant::now();
        info!(
            "BEGIN parsing {} and {}",
            node_path.display(),
            edge_path.display()
        );

        let nodes = File::open(node_path)
            .with_context(|| format!("Could not open node file {}", node_path.display()))?;
        let edges = File::open(edge_path)
            .with_context(|| format!("Could not open edge file {}", edge_path.display()))?;

        let map = Self::from_readers(BufReader::new(nodes), BufReader::new(edges))
            .with_context(|| {
                format!(
                    "Could not read map from {} and {}",
                    node_path.display(),
                    edge_path.display()
                )
            })?;

        info!("FINISHED parsing. Took {:?}", now.elapsed());
        info!(
            "Map has {} nodes and {} arcs",
            map.nodes.len(),
            map.arcs.len()
        );
        Ok(map)
    }

    /// Parses a map from any pair of readers. Ids must be unique and every arc
    /// must reference known nodes.
    pub fn from_readers(nodes: impl Read, edges: impl Read) -> anyhow::Result<RoadMap> {
        let mut map = RoadMap::new();
        let mut ids: FxHashSet<String> = FxHashSet::default();

        let mut reader = csv::Reader::from_reader(nodes);
        for (i, result) in reader.deserialize().enumerate() {
            let node: RawNode = result.with_context(|| format!("Failed to parse node #{}", i))?;
            if !node.lat.is_finite() || !node.lon.is_finite() {
                bail!("Node {} has invalid coordinates", node.id);
            }
            if !ids.insert(node.id.clone()) {
                bail!("Duplicate node id {}", node.id);
            }
            map.nodes.push(node);
        }
        debug!("Read {} nodes", map.nodes.len());

        let mut reader = csv::Reader::from_reader(edges);
        for (i, result) in reader.deserialize().enumerate() {
            let arc: Arc = result.with_context(|| format!("Failed to parse arc #{}", i))?;
            for id in [&arc.source, &arc.target] {
                if !ids.contains(id) {
                    bail!("Arc #{} references unknown node {}", i, id);
                }
            }
            if !arc.length.is_finite() || arc.length < 0.0 {
                bail!(
                    "Arc #{} ({} - {}) has invalid length {}",
                    i,
                    arc.source,
                    arc.target,
                    arc.length
                );
            }
            map.arcs.push(arc);
        }
        debug!("Read {} arcs", map.arcs.len());

        Ok(map)
    }

    pub fn write_csv(&self, node_path: &Path, edge_path: &Path) -> anyhow::Result<()> {
        let nodes_file = File::create(node_path)
            .with_context(|| format!("Could not create {}", node_path.display()))?;
        let edges_file = File::create(edge_path)
            .with_context(|| format!("Could not create {}", edge_path.display()))?;

        self.write_csv_to(BufWriter::new(nodes_file), BufWriter::new(edges_file))
    }

    pub fn write_csv_to(&self, nodes: impl Write, edges: impl Write) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(nodes);
        debug!("BEGIN writing nodes");
        for node in self.nodes.iter() {
            wtr.serialize(node)?;
        }
        wtr.flush()?;
        debug!("FINISHED writing nodes");

        let mut wtr = csv::Writer::from_writer(edges);
        debug!("BEGIN writing arcs");
        for arc in self.arcs.iter() {
            wtr.serialize(arc)?;
        }
        wtr.flush()?;
        debug!("FINISHED writing arcs");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data(file: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join(file)
    }

    #[test]
    fn map_from_csv_works() {
        let map = RoadMap::from_csv(&test_data("nodes.csv"), &test_data("edges.csv")).unwrap();

        assert_eq!(map.get_nodes().len(), 3);
        assert_eq!(map.get_arcs().len(), 2);

        assert_eq!(map.get_nodes()[0].id, "A");
        assert_eq!(map.get_nodes()[2].lon, 11.001);
        assert_eq!(map.get_arcs()[1], Arc::new("B", "C", 80.25));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let nodes = "id,highway,lat,lon\n9585187701,residential,48.1,11.5\n5441879433,,48.2,11.6\n";
        let edges = "name,a,b,length\nMain Street,9585187701,5441879433,12\n";

        let map = RoadMap::from_readers(nodes.as_bytes(), edges.as_bytes()).unwrap();

        assert_eq!(map.get_nodes()[0].id, "9585187701");
        assert_eq!(map.get_arcs()[0].length, 12.0);
    }

    #[test]
    fn unknown_node_is_rejected() {
        let err = RoadMap::from_csv(
            &test_data("nodes.csv"),
            &test_data("edges_unknown_node.csv"),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("unknown node Z"));
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let err = RoadMap::from_csv(&test_data("nodes_duplicate.csv"), &test_data("edges.csv"))
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Duplicate node id A"));
    }

    #[test]
    fn negative_length_is_rejected() {
        let nodes = "id,lat,lon\nA,0,0\nB,0,1\n";
        let edges = "a,b,length\nA,B,-1.5\n";

        assert!(RoadMap::from_readers(nodes.as_bytes(), edges.as_bytes()).is_err());
    }

    #[test]
    fn non_finite_length_is_rejected() {
        let nodes = "id,lat,lon\nA,0,0\nB,0,1\n";

        for length in ["NaN", "inf"] {
            let edges = format!("a,b,length\nA,B,{}\n", length);
            let err = RoadMap::from_readers(nodes.as_bytes(), edges.as_bytes()).unwrap_err();
            assert!(err.to_string().contains("invalid length"));
        }
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let nodes = "id,lat,lon\nA,NaN,0\nB,0,1\n";
        let edges = "a,b,length\nA,B,1\n";

        let err = RoadMap::from_readers(nodes.as_bytes(), edges.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Node A has invalid coordinates");
    }

    #[test]
    fn missing_file_names_path() {
        let err = RoadMap::from_csv(&test_data("missing.csv"), &test_data("edges.csv"))
            .unwrap_err();

        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn write_csv_works() {
        let map = RoadMap::from_csv(&test_data("nodes.csv"), &test_data("edges.csv")).unwrap();

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        map.write_csv_to(&mut nodes, &mut edges).unwrap();

        let edges = String::from_utf8(edges).unwrap();
        assert!(edges.starts_with("a,b,length\n"));

        let reread = RoadMap::from_readers(nodes.as_slice(), edges.as_bytes()).unwrap();
        assert_eq!(reread.get_nodes(), map.get_nodes());
        assert_eq!(reread.get_arcs(), map.get_arcs());
    }
}
