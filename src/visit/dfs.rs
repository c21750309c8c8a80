use fixedbitset::FixedBitSet;

use crate::{
    common::VisitSet,
    core::{
        id::{EdgeId, VertexId},
        marker::Direction,
        Neighbors, VertexSet,
    },
};

use super::{
    raw::{RawState, RawVisit, RawVisitMulti, Stack},
    DfsEvent, Time, VisitAll, VisitRoots, Visitor,
};

/// Depth-first traversal reporting vertices in preorder.
pub struct Dfs {
    raw: RawVisit<Stack>,
}

pub struct DfsRooted<'a> {
    raw: &'a mut RawVisit<Stack>,
}

pub struct DfsMulti<'a, S> {
    raw: &'a mut RawVisit<Stack>,
    multi: RawVisitMulti<S>,
}

impl Dfs {
    pub fn new<G: VertexSet>(graph: &G) -> Self {
        Self {
            raw: RawVisit::new(graph.vertex_bound()),
        }
    }

    pub fn start(&mut self, root: VertexId) -> DfsRooted<'_> {
        self.raw.start(root);
        DfsRooted { raw: &mut self.raw }
    }

    pub fn start_all<'a, G>(&'a mut self, graph: &'a G) -> DfsMulti<'a, VisitAll<'a, G>>
    where
        G: VertexSet,
    {
        self.start_multi(VisitAll::new(graph))
    }

    pub fn start_multi<S>(&mut self, roots: S) -> DfsMulti<'_, S>
    where
        S: VisitRoots,
    {
        DfsMulti {
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

impl<G> Visitor<G> for DfsRooted<'_>
where
    G: Neighbors,
{
    type Item = VertexId;

    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        self.raw.next(graph)
    }
}

impl<S, G> Visitor<G> for DfsMulti<'_, S>
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

#[derive(Debug)]
struct Frame {
    vertex: VertexId,
    // The tree edge through which the vertex was discovered.
    via: Option<EdgeId>,
    neighbors: Vec<(VertexId, EdgeId)>,
    next: usize,
}

#[derive(Debug)]
pub(crate) struct RawEvents {
    stack: Vec<Frame>,
    discovered: FixedBitSet,
    finished: FixedBitSet,
    root: Option<VertexId>,
    pending: Option<DfsEvent>,
    time: usize,
    is_directed: bool,
}

impl RawEvents {
    fn new<G: VertexSet>(graph: &G) -> Self {
        Self {
            stack: Vec::new(),
            discovered: FixedBitSet::with_capacity(graph.vertex_bound()),
            finished: FixedBitSet::with_capacity(graph.vertex_bound()),
            root: None,
            pending: None,
            time: 0,
            is_directed: graph.is_directed(),
        }
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.discovered.clear();
        self.finished.clear();
        self.root = None;
        self.pending = None;
        self.time = 0;
    }

    fn tick(&mut self) -> Time {
        let time = Time(self.time);
        self.time += 1;
        time
    }

    fn open<G: Neighbors>(&mut self, graph: &G, vertex: VertexId, via: Option<EdgeId>) -> Option<DfsEvent> {
        let neighbors = graph
            .neighbors_directed(vertex, Direction::Outgoing)?
            .map(|n| (n.id, n.edge))
            .collect();

        self.discovered.visit(vertex);
        self.stack.push(Frame {
            vertex,
            via,
            neighbors,
            next: 0,
        });

        Some(DfsEvent::Discover {
            vertex,
            time: self.tick(),
        })
    }

    fn next<G: Neighbors>(&mut self, graph: &G) -> Option<DfsEvent> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        if let Some(root) = self.root.take() {
            if !self.discovered.is_visited(root) {
                if let Some(event) = self.open(graph, root, None) {
                    return Some(event);
                }
            }
        }

        loop {
            let frame = self.stack.last_mut()?;

            let Some(&(to, edge)) = frame.neighbors.get(frame.next) else {
                let vertex = frame.vertex;
                self.stack.pop();
                self.finished.visit(vertex);

                return Some(DfsEvent::Finish {
                    vertex,
                    time: self.tick(),
                });
            };

            frame.next += 1;
            let from = frame.vertex;
            let via = frame.via;

            if !self.is_directed && via == Some(edge) {
                continue;
            }

            if !self.discovered.is_visited(to) {
                // The neighbor might have been removed in the meantime.
                if let Some(discover) = self.open(graph, to, Some(edge)) {
                    self.pending = Some(discover);
                    return Some(DfsEvent::TreeEdge { from, to, edge });
                }
            } else if !self.finished.is_visited(to) {
                return Some(DfsEvent::BackEdge { from, to, edge });
            } else if self.is_directed {
                return Some(DfsEvent::CrossForwardEdge { from, to, edge });
            }
            // In undirected graphs, an edge to a finished vertex was already
            // reported as a back edge from the other side.
        }
    }
}

impl RawState for RawEvents {
    fn visited(&self) -> &FixedBitSet {
        &self.discovered
    }

    fn start(&mut self, root: VertexId) {
        self.stack.clear();
        self.pending = None;
        self.root = Some(root);
    }
}

/// Depth-first traversal reporting [events](DfsEvent) with discovery and
/// finish times.
pub struct DfsEvents {
    raw: RawEvents,
}

pub struct DfsEventsRooted<'a> {
    raw: &'a mut RawEvents,
}

pub struct DfsEventsMulti<'a, S> {
    raw: &'a mut RawEvents,
    multi: RawVisitMulti<S>,
}

impl DfsEvents {
    pub fn new<G: VertexSet>(graph: &G) -> Self {
        Self {
            raw: RawEvents::new(graph),
        }
    }

    pub fn start(&mut self, root: VertexId) -> DfsEventsRooted<'_> {
        self.raw.start(root);
        DfsEventsRooted { raw: &mut self.raw }
    }

    pub fn start_all<'a, G>(&'a mut self, graph: &'a G) -> DfsEventsMulti<'a, VisitAll<'a, G>>
    where
        G: VertexSet,
    {
        self.start_multi(VisitAll::new(graph))
    }

    pub fn start_multi<S>(&mut self, roots: S) -> DfsEventsMulti<'_, S>
    where
        S: VisitRoots,
    {
        DfsEventsMulti {
            raw: &mut self.raw,
            multi: RawVisitMulti::new(roots),
        }
    }

    pub fn reset(&mut self) {
        self.raw.reset();
    }

    pub fn discovered(&self) -> &FixedBitSet {
        &self.raw.discovered
    }
}

impl<G> Visitor<G> for DfsEventsRooted<'_>
where
    G: Neighbors,
{
    type Item = DfsEvent;

    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        self.raw.next(graph)
    }
}

impl<S, G> Visitor<G> for DfsEventsMulti<'_, S>
where
    S: VisitRoots,
    G: Neighbors + VertexSet,
{
    type Item = DfsEvent;

    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        self.multi.next_multi(
            self.raw,
            |raw| raw.next(graph),
            |vertex| graph.contains_vertex(vertex),
        )
    }
}
