use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::{
    common::VisitSet,
    core::{id::VertexId, marker::Direction, Neighbors},
};

use super::VisitRoots;

pub trait TraversalCollection: Default {
    fn push(&mut self, value: VertexId);
    fn pop(&mut self) -> Option<VertexId>;
    fn clear(&mut self);
}

#[derive(Debug, Default)]
pub struct Queue(pub VecDeque<VertexId>);

impl TraversalCollection for Queue {
    fn push(&mut self, value: VertexId) {
        self.0.push_back(value);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.0.pop_front()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Default)]
pub struct Stack(pub Vec<VertexId>);

impl TraversalCollection for Stack {
    fn push(&mut self, value: VertexId) {
        self.0.push(value);
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.0.pop()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Traversal state shared by breadth-first and depth-first visitors.
///
/// The visited set grows on demand, so the graph may gain vertices between
/// steps.
#[derive(Debug)]
pub(crate) struct RawVisit<C> {
    pub collection: C,
    pub visited: FixedBitSet,
}

impl<C: TraversalCollection> RawVisit<C> {
    pub fn new(bound: usize) -> Self {
        Self {
            collection: C::default(),
            visited: FixedBitSet::with_capacity(bound),
        }
    }

    pub fn reset(&mut self) {
        self.collection.clear();
        self.visited.clear();
    }
}

impl RawVisit<Queue> {
    pub fn start(&mut self, root: VertexId) {
        self.collection.clear();
        // Vertices are marked when enqueued so that each is enqueued once.
        if self.visited.visit(root) {
            self.collection.push(root);
        }
    }

    pub fn next<G: Neighbors>(&mut self, graph: &G) -> Option<VertexId> {
        loop {
            let vertex = self.collection.pop()?;

            // The vertex might have been removed since it was enqueued.
            let Some(neighbors) = graph.neighbors_directed(vertex, Direction::Outgoing) else {
                continue;
            };

            for neighbor in neighbors {
                if self.visited.visit(neighbor.id) {
                    self.collection.push(neighbor.id);
                }
            }

            return Some(vertex);
        }
    }
}

impl RawVisit<Stack> {
    pub fn start(&mut self, root: VertexId) {
        self.collection.clear();
        self.collection.push(root);
    }

    pub fn next<G: Neighbors>(&mut self, graph: &G) -> Option<VertexId> {
        while let Some(vertex) = self.collection.pop() {
            if self.visited.is_visited(vertex) {
                continue;
            }

            let Some(neighbors) = graph.neighbors_directed(vertex, Direction::Outgoing) else {
                continue;
            };

            self.visited.visit(vertex);

            // Pushed in reverse so that the first inserted neighbor is explored
            // first.
            let mark = self.collection.0.len();
            for neighbor in neighbors {
                if !self.visited.is_visited(neighbor.id) {
                    self.collection.push(neighbor.id);
                }
            }
            self.collection.0[mark..].reverse();

            return Some(vertex);
        }

        None
    }
}

/// Traversal state that can be restarted from a new root.
pub(crate) trait RawState {
    fn visited(&self) -> &FixedBitSet;
    fn start(&mut self, root: VertexId);
}

impl RawState for RawVisit<Queue> {
    fn visited(&self) -> &FixedBitSet {
        &self.visited
    }

    fn start(&mut self, root: VertexId) {
        RawVisit::<Queue>::start(self, root)
    }
}

impl RawState for RawVisit<Stack> {
    fn visited(&self) -> &FixedBitSet {
        &self.visited
    }

    fn start(&mut self, root: VertexId) {
        RawVisit::<Stack>::start(self, root)
    }
}

/// Restarts a traversal from roots that have not been visited yet.
pub(crate) struct RawVisitMulti<S> {
    pub roots: S,
}

impl<S: VisitRoots> RawVisitMulti<S> {
    pub fn new(roots: S) -> Self {
        Self { roots }
    }

    pub fn next_multi<T, R, F, V>(&mut self, raw: &mut T, mut get_next: F, is_still_valid: V) -> Option<R>
    where
        T: RawState,
        F: FnMut(&mut T) -> Option<R>,
        V: Fn(VertexId) -> bool,
    {
        if let Some(next) = get_next(raw) {
            return Some(next);
        }

        if self.roots.is_done(raw.visited()) {
            return None;
        }

        let visited = raw.visited();
        let root = std::iter::from_fn(|| self.roots.next_root())
            .find(|&v| !visited.is_visited(v) && is_still_valid(v))?;

        raw.start(root);
        get_next(raw)
    }
}
