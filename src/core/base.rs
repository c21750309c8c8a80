use super::{
    id::{EdgeId, VertexId},
    marker::Direction,
};

/// A neighbor of a vertex as reported by [`Neighbors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborRef {
    /// The neighboring vertex.
    pub id: VertexId,
    /// The edge connecting the vertex and the neighbor.
    pub edge: EdgeId,
    /// The vertex whose neighbors are being enumerated.
    pub src: VertexId,
    /// The weight of the edge.
    pub weight: f64,
    /// The direction of the edge relative to `src`. Always
    /// [`Outgoing`](Direction::Outgoing) in undirected graphs.
    pub dir: Direction,
}

/// An edge as reported by [`EdgeSet::edges`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef {
    pub id: EdgeId,
    pub src: VertexId,
    pub dst: VertexId,
    pub weight: f64,
}

impl EdgeRef {
    /// Returns the endpoint opposite to `vertex`.
    pub fn other(&self, vertex: VertexId) -> VertexId {
        if self.src == vertex {
            self.dst
        } else {
            self.src
        }
    }
}

pub trait GraphBase {
    fn is_directed(&self) -> bool;

    /// Number that changes on every structural mutation of the graph.
    fn version(&self) -> u64;
}

pub trait VertexSet: GraphBase {
    type VertexIdsIter<'a>: Iterator<Item = VertexId>
    where
        Self: 'a;

    /// Iterates over vertex ids in ascending (creation) order.
    fn vertex_ids(&self) -> Self::VertexIdsIter<'_>;

    fn vertex_count(&self) -> usize;

    /// Upper bound of `as_usize()` over all vertex ids, both live and removed.
    fn vertex_bound(&self) -> usize;

    fn contains_vertex(&self, id: VertexId) -> bool;
}

pub trait EdgeSet: GraphBase {
    type EdgesIter<'a>: Iterator<Item = EdgeRef>
    where
        Self: 'a;

    /// Iterates over edges in insertion order.
    fn edges(&self) -> Self::EdgesIter<'_>;

    fn edge_count(&self) -> usize;

    /// Upper bound of `as_usize()` over all edge ids, both live and removed.
    fn edge_bound(&self) -> usize;

    fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)>;

    fn weight(&self, id: EdgeId) -> Option<f64>;

    fn contains_edge(&self, id: EdgeId) -> bool {
        self.endpoints(id).is_some()
    }
}

pub trait Neighbors: GraphBase {
    type NeighborsIter<'a>: Iterator<Item = NeighborRef>
    where
        Self: 'a;

    /// Iterates over the neighbors of a vertex in the given direction, in edge
    /// insertion order. Returns `None` if the vertex does not exist.
    ///
    /// The direction is ignored in undirected graphs.
    fn neighbors_directed(&self, src: VertexId, dir: Direction) -> Option<Self::NeighborsIter<'_>>;

    /// Iterates over outgoing neighbors (all neighbors in undirected graphs).
    fn neighbors(&self, src: VertexId) -> Option<Self::NeighborsIter<'_>> {
        self.neighbors_directed(src, Direction::Outgoing)
    }

    fn degree_directed(&self, id: VertexId, dir: Direction) -> Option<usize>;

    fn degree(&self, id: VertexId) -> Option<usize> {
        if self.is_directed() {
            Some(
                self.degree_directed(id, Direction::Outgoing)?
                    + self.degree_directed(id, Direction::Incoming)?,
            )
        } else {
            self.degree_directed(id, Direction::Outgoing)
        }
    }
}

macro_rules! deref_graph {
    ($($ref_kind:tt)*) => {
        impl<G> GraphBase for $($ref_kind)* G
        where
            G: GraphBase,
        {
            fn is_directed(&self) -> bool {
                (**self).is_directed()
            }

            fn version(&self) -> u64 {
                (**self).version()
            }
        }

        impl<G> VertexSet for $($ref_kind)* G
        where
            G: VertexSet,
        {
            type VertexIdsIter<'a> = G::VertexIdsIter<'a>
            where
                Self: 'a;

            fn vertex_ids(&self) -> Self::VertexIdsIter<'_> {
                (**self).vertex_ids()
            }

            fn vertex_count(&self) -> usize {
                (**self).vertex_count()
            }

            fn vertex_bound(&self) -> usize {
                (**self).vertex_bound()
            }

            fn contains_vertex(&self, id: VertexId) -> bool {
                (**self).contains_vertex(id)
            }
        }

        impl<G> EdgeSet for $($ref_kind)* G
        where
            G: EdgeSet,
        {
            type EdgesIter<'a> = G::EdgesIter<'a>
            where
                Self: 'a;

            fn edges(&self) -> Self::EdgesIter<'_> {
                (**self).edges()
            }

            fn edge_count(&self) -> usize {
                (**self).edge_count()
            }

            fn edge_bound(&self) -> usize {
                (**self).edge_bound()
            }

            fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
                (**self).endpoints(id)
            }

            fn weight(&self, id: EdgeId) -> Option<f64> {
                (**self).weight(id)
            }
        }

        impl<G> Neighbors for $($ref_kind)* G
        where
            G: Neighbors,
        {
            type NeighborsIter<'a> = G::NeighborsIter<'a>
            where
                Self: 'a;

            fn neighbors_directed(
                &self,
                src: VertexId,
                dir: Direction,
            ) -> Option<Self::NeighborsIter<'_>> {
                (**self).neighbors_directed(src, dir)
            }

            fn degree_directed(&self, id: VertexId, dir: Direction) -> Option<usize> {
                (**self).degree_directed(id, dir)
            }
        }
    };
}

deref_graph!(&);
deref_graph!(&mut);
