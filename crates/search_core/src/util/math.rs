use crate::{
    constants::{Weight, EARTH_RADIUS},
    graph::Node,
};

/// Great-circle distance in metres between two coordinates given in degrees
/// (Haversine formula).
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding may push `a` slightly above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS * c
}

/// Straight line distance between two nodes. A road between two nodes can't
/// be shorter, so this never overestimates.
pub fn straight_line(src: &Node, dst: &Node) -> Weight {
    haversine_distance(src.lat, src.lon, dst.lat, dst.lon)
}

pub fn null_heuristic(_: &Node, _: &Node) -> Weight {
    0.0
}
