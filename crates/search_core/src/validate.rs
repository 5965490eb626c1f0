//! Checks that a path returned by a search is an actual walk through the road
//! network from the start to the goal.
use std::fmt;

use crate::{
    constants::{NodeId, Weight},
    graph::{Graph, NodeIndex},
    search::shortest_path::ShortestPath,
};

/// Relative tolerance when comparing a reported weight with the validated one
pub const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// The search did not return any node
    Empty,
    /// Path does not begin at the start node
    InvalidStart { expected: NodeId, found: NodeId },
    /// Path does not end at the goal node
    MissesGoal { expected: NodeId, found: NodeId },
    /// Two consecutive nodes are not joined by an edge
    Unreachable { from: NodeId, to: NodeId },
    /// The weight reported by the search differs from the summed edge lengths
    WeightMismatch { reported: Weight, actual: Weight },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "Path is empty"),
            PathError::InvalidStart { expected, found } => {
                write!(f, "Invalid start state (expecting {}, found {})", expected, found)
            }
            PathError::MissesGoal { expected, found } => {
                write!(f, "Path misses goal (expecting {}, found {})", expected, found)
            }
            PathError::Unreachable { from, to } => {
                write!(f, "Unable to reach {} from {}", to, from)
            }
            PathError::WeightMismatch { reported, actual } => write!(
                f,
                "Reported weight {} does not match path length {}",
                reported, actual
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// Confirms that `path` leads from `start` to `goal` along existing edges and
/// returns its length. Edges may be used in either direction; if several edges
/// join two nodes the cheapest one counts.
pub fn validate_path(
    g: &Graph,
    start: NodeIndex,
    goal: NodeIndex,
    path: &[NodeIndex],
) -> Result<Weight, PathError> {
    let (first, last) = match (path.first(), path.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(PathError::Empty),
    };

    if first != start {
        return Err(PathError::InvalidStart {
            expected: g.id_of(start).to_owned(),
            found: g.id_of(first).to_owned(),
        });
    }
    if last != goal {
        return Err(PathError::MissesGoal {
            expected: g.id_of(goal).to_owned(),
            found: g.id_of(last).to_owned(),
        });
    }

    let mut length = 0.0;
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        match g.edge_between(a, b) {
            Some((_, edge)) => length += edge.weight,
            None => {
                return Err(PathError::Unreachable {
                    from: g.id_of(a).to_owned(),
                    to: g.id_of(b).to_owned(),
                })
            }
        }
    }

    Ok(length)
}

/// Validates the result of a search and checks that the weight it reports
/// matches the length of the path.
pub fn validate_search(
    g: &Graph,
    start: NodeIndex,
    goal: NodeIndex,
    sp: Option<&ShortestPath>,
) -> Result<Weight, PathError> {
    let sp = sp.ok_or(PathError::Empty)?;
    let length = validate_path(g, start, goal, &sp.nodes)?;

    if !weights_match(sp.weight, length) {
        return Err(PathError::WeightMismatch {
            reported: sp.weight,
            actual: length,
        });
    }
    Ok(length)
}

/// Compares two path lengths with a relative tolerance of [`WEIGHT_EPSILON`].
pub fn weights_match(a: Weight, b: Weight) -> bool {
    (a - b).abs() <= WEIGHT_EPSILON * a.abs().max(b.abs()).max(1.0)
}
