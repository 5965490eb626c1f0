/// Edge weight type, road length in metres
pub type Weight = f64;
/// External node identifier as found in the node file
pub type NodeId = String;
/// Mean earth radius in metres
pub const EARTH_RADIUS: f64 = 6_371_000.0;
