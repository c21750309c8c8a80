//! Graph traversals.
//!
//! All traversal implementations in this module are **iterative**, that is,
//! they don't use recursion. This means that
//!
//! * visitor is lazy and can be stopped at any point,
//! * visitor state is independent on the graph itself, allowing mutations
//!   between individual steps,
//! * traversal is not limited by the size of the program stack.
//!
//! Neighbors of a vertex are discovered in the order in which the connecting
//! edges were inserted into the graph.

pub mod bfs;
pub mod dfs;

pub(crate) mod raw;

#[doc(inline)]
pub use self::{
    bfs::Bfs,
    dfs::{Dfs, DfsEvents},
};

pub use crate::common::VisitSet;

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;

use crate::core::{
    error::{Error, Result},
    id::{EdgeId, VertexId},
    Neighbors, VertexSet,
};

/// Trait for a specific graph traversal approach.
pub trait Visitor<G> {
    /// The type of the elements being visited.
    type Item;

    /// Advances the visitor and returns the next visited element in given
    /// graph.
    ///
    /// The difference from the [`Iterator::next`] is that the visitor doesn't
    /// hold a reference to the graph and thus allows modifications to the graph
    /// between individual visitor steps.
    fn visit_next(&mut self, graph: &G) -> Option<Self::Item>;

    /// Returns an [iterator](Iterator) that uses the visitor to iterate over
    /// the elements in given graph.
    fn iter<'a>(&'a mut self, graph: &'a G) -> Iter<'a, Self, G>
    where
        Self: Sized,
    {
        Iter {
            visitor: self,
            graph,
        }
    }

    /// Converts the visitor into an [iterator](Iterator) to visit the elements
    /// in given graph.
    fn into_iter(self, graph: &G) -> IntoIter<'_, Self, G>
    where
        Self: Sized,
    {
        IntoIter {
            visitor: self,
            graph,
        }
    }
}

/// Visitor iterator returned from [`Visitor::iter`].
pub struct Iter<'a, V, G> {
    visitor: &'a mut V,
    graph: &'a G,
}

impl<V, G> Iterator for Iter<'_, V, G>
where
    V: Visitor<G>,
{
    type Item = V::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.visitor.visit_next(self.graph)
    }
}

/// Visitor iterator returned from [`Visitor::into_iter`].
pub struct IntoIter<'a, V, G> {
    visitor: V,
    graph: &'a G,
}

impl<V, G> Iterator for IntoIter<'_, V, G>
where
    V: Visitor<G>,
{
    type Item = V::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.visitor.visit_next(self.graph)
    }
}

/// A collection of starting vertices for a graph traversal.
///
/// This trait is implemented for any [`Iterator`] of vertex ids.
pub trait VisitRoots {
    /// Returns next vertex to start the traversal from.
    ///
    /// The returned vertex might have already been visited. It is the
    /// responsibility of the visitor to ignore such vertices.
    fn next_root(&mut self) -> Option<VertexId>;

    /// Returns `true` if the collection can determine that all remaining roots
    /// have already been visited.
    fn is_done(&mut self, _visited: &FixedBitSet) -> bool {
        false
    }
}

impl<T> VisitRoots for T
where
    T: Iterator<Item = VertexId>,
{
    fn next_root(&mut self) -> Option<VertexId> {
        self.next()
    }
}

/// A [`VisitRoots`] collection for visiting all vertices in a graph.
pub struct VisitAll<'a, G>
where
    G: VertexSet + 'a,
{
    graph: &'a G,
    ids: G::VertexIdsIter<'a>,
}

impl<'a, G> VisitAll<'a, G>
where
    G: VertexSet,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            ids: graph.vertex_ids(),
        }
    }
}

impl<G> VisitRoots for VisitAll<'_, G>
where
    G: VertexSet,
{
    fn next_root(&mut self) -> Option<VertexId> {
        self.ids.next()
    }

    fn is_done(&mut self, visited: &FixedBitSet) -> bool {
        // The graph is borrowed for the whole traversal, so its vertex count
        // could not have changed.
        visited.count_ones(..) == self.graph.vertex_count()
    }
}

/// Strictly monotonically increasing numbering of graph traversal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub usize);

impl Time {
    /// The largest possible value of time.
    pub const MAX: Time = Time(usize::MAX);
}

/// Depth-first search visitor event.
///
/// Use [`DfsEvents`] visitor to traverse a graph by reporting DFS events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// A new vertex was discovered.
    Discover { vertex: VertexId, time: Time },

    /// An edge of the tree formed by the traversal. Always followed by the
    /// [discovery](DfsEvent::Discover) of `to`.
    TreeEdge {
        from: VertexId,
        to: VertexId,
        edge: EdgeId,
    },

    /// An edge to a discovered but not yet [finished](DfsEvent::Finish)
    /// vertex, that is, to an ancestor in the traversal tree.
    ///
    /// Presence of a back edge indicates a cycle in the graph. In undirected
    /// graphs, the tree edge leading back to the parent is not reported.
    BackEdge {
        from: VertexId,
        to: VertexId,
        edge: EdgeId,
    },

    /// An edge to an already finished vertex. Only reported in directed
    /// graphs.
    CrossForwardEdge {
        from: VertexId,
        to: VertexId,
        edge: EdgeId,
    },

    /// All edges from the vertex have been explored.
    Finish { vertex: VertexId, time: Time },
}

/// Breadth-first order of the vertices reachable from `start`, `start` first.
pub fn bfs<G>(graph: &G, start: VertexId) -> Result<Vec<VertexId>>
where
    G: Neighbors + VertexSet,
{
    if !graph.contains_vertex(start) {
        return Err(Error::UnknownVertex(start));
    }

    Ok(Bfs::new(graph).start(start).iter(graph).collect())
}

/// Depth-first traversal of the vertices reachable from `start`.
pub fn dfs<G>(graph: &G, start: VertexId) -> Result<DfsOrder>
where
    G: Neighbors + VertexSet,
{
    if !graph.contains_vertex(start) {
        return Err(Error::UnknownVertex(start));
    }

    let mut order = DfsOrder::default();

    for event in DfsEvents::new(graph).start(start).iter(graph) {
        match event {
            DfsEvent::Discover { vertex, time } => {
                order.preorder.push(vertex);
                order.discovered.insert(vertex, time);
            }
            DfsEvent::Finish { vertex, time } => {
                order.postorder.push(vertex);
                order.finished.insert(vertex, time);
            }
            _ => {}
        }
    }

    Ok(order)
}

/// Result of [`dfs`]: visitation orders and timestamps.
#[derive(Debug, Clone, Default)]
pub struct DfsOrder {
    preorder: Vec<VertexId>,
    postorder: Vec<VertexId>,
    discovered: FxHashMap<VertexId, Time>,
    finished: FxHashMap<VertexId, Time>,
}

impl DfsOrder {
    /// Vertices in the order of discovery.
    pub fn preorder(&self) -> &[VertexId] {
        &self.preorder
    }

    /// Vertices in the order of finishing.
    pub fn postorder(&self) -> &[VertexId] {
        &self.postorder
    }

    pub fn discovered(&self, vertex: VertexId) -> Option<Time> {
        self.discovered.get(&vertex).copied()
    }

    pub fn finished(&self, vertex: VertexId) -> Option<Time> {
        self.finished.get(&vertex).copied()
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.discovered.contains_key(&vertex)
    }
}
