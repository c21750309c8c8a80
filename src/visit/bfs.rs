use fixedbitset::FixedBitSet;

use crate::core::{id::VertexId, Neighbors, VertexSet};

use super::{
    raw::{Queue, RawVisit, RawVisitMulti},
    VisitAll, VisitRoots, Visitor,
};

/// Breadth-first traversal. Vertices are visited in non-decreasing order of
/// their distance (in edges) from the root.
pub struct Bfs {
    raw: RawVisit<Queue>,
}

pub struct BfsRooted<'a> {
    raw: &'a mut RawVisit<Queue>,
}

pub struct BfsMulti<'a, S> {
    raw: &'a mut RawVisit<Queue>,
    multi: RawVisitMulti<S>,
}

impl Bfs {
    pub fn new<G: VertexSet>(graph: &G) -> Self {
        Self {
            raw: RawVisit::new(graph.vertex_bound()),
        }
    }

    pub fn start(&mut self, root: VertexId) -> BfsRooted<'_> {
        self.raw.start(root);
        BfsRooted { raw: &mut self.raw }
    }

    pub fn start_all<'a, G>(&'a mut self, graph: &'a G) -> BfsMulti<'a, VisitAll<'a, G>>
    where
        G: VertexSet,
    {
        self.start_multi(VisitAll::new(graph))
    }

    pub fn start_multi<S>(&mut self, roots: S) -> BfsMulti<'_, S>
    where
        S: VisitRoots,
    {
        BfsMulti {
            raw: &mut self.raw,
            multi: RawVisitMulti::new(roots),
        }
    }

    pub fn reset(&mut self) {
        self.raw.reset();
    }

    pub fn visited(&self) -> &FixedBitSet {
        &self.raw.visited
    }
}

impl<G> Visitor<G> for BfsRooted<'_>
where
    G: Neighbors,
{
    type Item = VertexId;

    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        self.raw.next(graph)
    }
}

impl<S, G> Visitor<G> for BfsMulti<'_, S>
where
    S: VisitRoots,
    G: Neighbors + VertexSet,
{
    type Item = VertexId;

    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        self.multi.next_multi(
            self.raw,
            |raw| raw.next(graph),
            |vertex| graph.contains_vertex(vertex),
        )
    }
}
