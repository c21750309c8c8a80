//! Find a [minimum spanning tree] (or forest) of an undirected graph.
//!
//! See available parameters [here](SpanningTreeBuilder#implementations).
//!
//! Edges of equal weight are considered in the order of their insertion, so
//! the result is deterministic for a given sequence of graph mutations.
//!
//! [minimum spanning tree]: https://en.wikipedia.org/wiki/Minimum_spanning_tree
//!
//! # Examples
//!
//! ```
//! use grove::{algo::SpanningTree, Graph};
//!
//! let mut graph = Graph::new_undirected();
//!
//! let a = graph.add_vertex("a");
//! let b = graph.add_vertex("b");
//! let c = graph.add_vertex("c");
//! let d = graph.add_vertex("d");
//!
//! let edges = graph.extend_with_edges([
//!     (a, b, 1.0),
//!     (b, c, 2.0),
//!     (c, d, 1.0),
//!     (a, d, 4.0),
//! ])?;
//!
//! let mst = SpanningTree::on(&graph).kruskal().run()?;
//!
//! assert_eq!(mst.total_weight(), 4.0);
//! assert_eq!(mst.edges(), &[edges[0], edges[2], edges[1]]);
//! assert!(!mst.contains(edges[3]));
//! # Ok::<(), grove::Error>(())
//! ```

use fixedbitset::FixedBitSet;

use crate::core::{
    error::Result,
    id::{EdgeId, IdType, VertexId},
    EdgeSet, Neighbors, VertexSet,
};

mod builder;
mod kruskal;
mod prim;

pub use builder::SpanningTreeBuilder;

/// Edges of a minimum spanning forest.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    edges: Vec<EdgeId>,
    members: FixedBitSet,
    total_weight: f64,
    component_count: usize,
}

impl SpanningTree {
    fn new(edge_bound: usize) -> Self {
        Self {
            edges: Vec::new(),
            members: FixedBitSet::with_capacity(edge_bound),
            total_weight: 0.0,
            component_count: 0,
        }
    }

    fn accept(&mut self, edge: EdgeId, weight: f64) {
        self.edges.push(edge);
        self.members.insert(edge.as_usize());
        self.total_weight += weight;
    }

    /// Accepted edges in the order the algorithm accepted them.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Returns the number of edges.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.members.contains(edge.as_usize())
    }

    /// Number of trees in the forest. Isolated vertices count as trees with no
    /// edges.
    pub fn component_count(&self) -> usize {
        self.component_count
    }
}

impl<'a> IntoIterator for &'a SpanningTree {
    type Item = &'a EdgeId;
    type IntoIter = std::slice::Iter<'a, EdgeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Algorithm for [`SpanningTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Algo {
    /// [Kruskal's
    /// algorithm](https://en.wikipedia.org/wiki/Kruskal%27s_algorithm).
    ///
    /// Processes all edges from the lightest and accepts those that join two
    /// different trees, tracked by a union-find structure. Produces a spanning
    /// forest on disconnected graphs.
    Kruskal,

    /// [Prim's algorithm](https://en.wikipedia.org/wiki/Prim%27s_algorithm)
    /// grown from the given vertex.
    ///
    /// Repeatedly accepts the lightest edge leaving the tree built so far.
    /// Covers only the component of the start vertex.
    Prim(VertexId),
}

mod algo {
    use crate::core::id::VertexId;

    #[derive(Debug)]
    pub struct AnyAlgo;

    #[derive(Debug)]
    pub struct Kruskal;

    #[derive(Debug)]
    pub struct Prim(pub VertexId);
}

/// Computes a minimum spanning forest of the whole graph using Kruskal's
/// algorithm.
pub fn kruskal<G>(graph: &G) -> Result<SpanningTree>
where
    G: VertexSet + EdgeSet,
{
    SpanningTree::on(graph).kruskal().run()
}

/// Computes a minimum spanning tree of the component containing `start` using
/// Prim's algorithm.
pub fn prim<G>(graph: &G, start: VertexId) -> Result<SpanningTree>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    SpanningTree::on(graph).prim(start).run()
}
