use std::fmt;

use thiserror::Error;

use super::id::{EdgeId, VertexId};

/// Shorthand for results of fallible graph operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error encountered by a graph mutation, query or algorithm.
///
/// Mutations that fail leave the graph unchanged. Outcomes that merely find
/// nothing (an unreachable vertex, a disconnected component) are not errors and
/// are reported through `Option` or forest values instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The vertex does not exist in the graph.
    #[error("vertex {0} does not exist")]
    UnknownVertex(VertexId),

    /// The edge does not exist in the graph.
    #[error("edge {0} does not exist")]
    UnknownEdge(EdgeId),

    /// An edge already exists and the graph does not allow multi edges.
    #[error("edge between {src} and {dst} already exists and the graph does not allow multi edges")]
    DuplicateEdge { src: VertexId, dst: VertexId },

    /// A self-loop was added to a graph that does not allow them.
    #[error("self-loop on {0} is not allowed")]
    SelfLoop(VertexId),

    /// The weight is not a finite number.
    #[error("weight {0} is not a finite number")]
    InvalidWeight(f64),

    /// An edge with negative weight encountered.
    #[error("edge with negative weight encountered")]
    NegativeWeight,

    /// A negative cycle encountered.
    #[error("negative cycle encountered")]
    NegativeCycle,

    /// The mutation would break the tree invariants.
    #[error("invalid tree mutation: {0}")]
    InvalidTreeMutation(TreeViolation),

    /// The vertex has no path to the root of the tree.
    #[error("vertex {0} is not connected to the root")]
    DisconnectedVertices(VertexId),

    /// The algorithm is defined only on undirected graphs.
    #[error("operation requires an undirected graph")]
    DirectedGraph,

    /// The algorithm is defined only on directed graphs.
    #[error("operation requires a directed graph")]
    UndirectedGraph,

    /// A cycle encountered in a graph required to be acyclic.
    #[error("cycle encountered")]
    Cycle,
}

/// The reason of an [`Error::InvalidTreeMutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeViolation {
    /// The mutation would close a cycle.
    Cycle,
    /// The mutation would disconnect a vertex from the root.
    Disconnect,
    /// The root cannot be removed.
    RootRemoval,
    /// The graph is not connected and acyclic.
    NotATree,
}

impl fmt::Display for TreeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            TreeViolation::Cycle => "the mutation would create a cycle",
            TreeViolation::Disconnect => "the mutation would disconnect a vertex from the root",
            TreeViolation::RootRemoval => "the root cannot be removed",
            TreeViolation::NotATree => "the graph is not connected and acyclic",
        };
        f.write_str(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::UnknownVertex(VertexId::from(4)).to_string(),
            "vertex v4 does not exist"
        );
        assert_eq!(
            Error::InvalidTreeMutation(TreeViolation::Cycle).to_string(),
            "invalid tree mutation: the mutation would create a cycle"
        );
    }
}
