//! Rooted trees.
//!
//! A [`Tree`] is an undirected [`Graph`] that is connected and acyclic, with
//! one vertex designated as the root. Mutations that would break these
//! properties fail with [`Error::InvalidTreeMutation`] and leave the tree
//! unchanged.
//!
//! Parent, depth and children relations are derived from the root by a single
//! breadth-first pass and cached until the next mutation.

use std::{
    collections::VecDeque,
    ops::{Index, IndexMut},
    sync::OnceLock,
};

use tracing::debug;

use crate::{
    core::{
        error::{Error, Result, TreeViolation},
        id::{EdgeId, IdType, VertexId},
        marker::Direction,
        weight, EdgeSet, GraphBase, Neighbors, VertexSet,
    },
    graph::Graph,
    storage::registry::{EdgesIter, NeighborsIter, VertexIds},
};

/// Parent pointers, depths and children lists relative to a root, valid for a
/// single version of the underlying graph.
#[derive(Debug, Clone)]
struct Hierarchy {
    version: u64,
    parent: Vec<Option<VertexId>>,
    depth: Vec<Option<usize>>,
    children: Vec<Vec<VertexId>>,
    // Vertices in the order of discovery from the root.
    order: Vec<VertexId>,
}

impl Hierarchy {
    fn build<V>(graph: &Graph<V>, root: VertexId) -> Self {
        let bound = graph.vertex_bound();

        let mut hierarchy = Self {
            version: graph.version(),
            parent: vec![None; bound],
            depth: vec![None; bound],
            children: vec![Vec::new(); bound],
            order: Vec::with_capacity(graph.vertex_count()),
        };

        let mut queue = VecDeque::new();
        hierarchy.depth[root.as_usize()] = Some(0);
        queue.push_back((root, 0));

        while let Some((vertex, depth)) = queue.pop_front() {
            hierarchy.order.push(vertex);

            let Ok(neighbors) = graph.neighbors(vertex) else {
                continue;
            };

            for neighbor in neighbors {
                let slot = &mut hierarchy.depth[neighbor.id.as_usize()];
                if slot.is_none() {
                    *slot = Some(depth + 1);
                    hierarchy.parent[neighbor.id.as_usize()] = Some(vertex);
                    hierarchy.children[vertex.as_usize()].push(neighbor.id);
                    queue.push_back((neighbor.id, depth + 1));
                }
            }
        }

        debug!(
            %root,
            reached = hierarchy.order.len(),
            "tree hierarchy rebuilt"
        );

        hierarchy
    }

    fn depth(&self, id: VertexId) -> Option<usize> {
        self.depth.get(id.as_usize()).copied().flatten()
    }

    fn parent(&self, id: VertexId) -> Option<VertexId> {
        self.parent.get(id.as_usize()).copied().flatten()
    }

    fn children(&self, id: VertexId) -> &[VertexId] {
        self.children
            .get(id.as_usize())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The vertex followed by all its descendants, in preorder.
    fn subtree(&self, id: VertexId) -> Vec<VertexId> {
        let mut subtree = Vec::new();
        let mut stack = vec![id];

        while let Some(vertex) = stack.pop() {
            subtree.push(vertex);
            stack.extend(self.children(vertex).iter().rev());
        }

        subtree
    }
}

/// A rooted tree with vertex payloads of type `V`.
#[derive(Debug, Clone)]
pub struct Tree<V> {
    graph: Graph<V>,
    root: VertexId,
    hierarchy: OnceLock<Hierarchy>,
}

impl<V> Tree<V> {
    /// Creates a tree consisting of the root only.
    pub fn new(root: V) -> Self {
        let mut graph = Graph::new_undirected();
        let root = graph.add_vertex(root);

        Self {
            graph,
            root,
            hierarchy: OnceLock::new(),
        }
    }

    /// Turns a graph into a tree rooted at `root`.
    ///
    /// An undirected graph must be connected and acyclic. A directed graph
    /// must be an arborescence rooted at `root`: the root has no incoming
    /// edge, every other vertex has exactly one and all vertices are reachable
    /// from the root. Its edges are then taken as undirected, with all
    /// identifiers kept.
    pub fn from_graph(graph: Graph<V>, root: VertexId) -> Result<Self> {
        if !graph.contains_vertex(root) {
            return Err(Error::UnknownVertex(root));
        }

        if graph.edge_count() + 1 != graph.vertex_count() {
            return Err(Error::InvalidTreeMutation(TreeViolation::NotATree));
        }

        let graph = if graph.is_directed() {
            Self::check_in_degrees(&graph, root)?;
            graph.into_undirected()
        } else {
            graph
        };

        let hierarchy = Hierarchy::build(&graph, root);

        // With |E| = |V| - 1, being connected implies being acyclic. For an
        // arborescence, the in-degrees then orient every edge away from the
        // root, so all vertices are reachable along edge directions.
        if hierarchy.order.len() != graph.vertex_count() {
            return Err(Error::InvalidTreeMutation(TreeViolation::NotATree));
        }

        Ok(Self {
            graph,
            root,
            hierarchy: OnceLock::from(hierarchy),
        })
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn graph(&self) -> &Graph<V> {
        &self.graph
    }

    pub fn into_graph(self) -> Graph<V> {
        self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.graph.contains_vertex(id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.graph.vertex(id)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut V> {
        // Payloads do not take part in the hierarchy, the cache stays valid.
        self.graph.vertex_mut(id)
    }

    pub fn add_child(&mut self, parent: VertexId, payload: V) -> Result<VertexId> {
        self.add_child_weighted(parent, payload, weight::UNIT)
    }

    pub fn add_child_weighted(&mut self, parent: VertexId, payload: V, weight: f64) -> Result<VertexId> {
        self.check_vertex(parent)?;
        let weight = weight::validate(weight)?;

        let child = self.graph.add_vertex(payload);
        self.graph.add_edge(parent, child, weight)?;
        self.invalidate();

        Ok(child)
    }

    /// Any edge between two vertices of a tree closes a cycle, so this
    /// succeeds never. The vertices are checked for existence first.
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, weight: f64) -> Result<EdgeId> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;
        weight::validate(weight)?;
        Err(Error::InvalidTreeMutation(TreeViolation::Cycle))
    }

    /// Removes a leaf. Removing the root or an inner vertex would disconnect
    /// the tree.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<V> {
        self.check_vertex(id)?;

        if id == self.root {
            return Err(Error::InvalidTreeMutation(TreeViolation::RootRemoval));
        }

        if !self.hierarchy().children(id).is_empty() {
            return Err(Error::InvalidTreeMutation(TreeViolation::Disconnect));
        }

        let payload = self.graph.remove_vertex(id)?;
        self.invalidate();
        Ok(payload)
    }

    /// Removing an edge always splits a tree into two.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<f64> {
        if self.graph.contains_edge(id) {
            Err(Error::InvalidTreeMutation(TreeViolation::Disconnect))
        } else {
            Err(Error::UnknownEdge(id))
        }
    }

    /// Removes the vertex together with all its descendants and returns the
    /// number of removed vertices.
    pub fn remove_subtree(&mut self, id: VertexId) -> Result<usize> {
        self.check_vertex(id)?;

        if id == self.root {
            return Err(Error::InvalidTreeMutation(TreeViolation::RootRemoval));
        }

        let subtree = self.hierarchy().subtree(id);

        // Leaves first, so that every removal is of a single incident edge.
        for &vertex in subtree.iter().rev() {
            self.graph.remove_vertex(vertex)?;
        }

        self.invalidate();
        debug!(vertex = %id, removed = subtree.len(), "subtree removed");

        Ok(subtree.len())
    }

    /// Detaches the subtree of `id` from its parent and hangs it under
    /// `new_parent`, keeping the weight of the connecting edge.
    pub fn move_subtree(&mut self, id: VertexId, new_parent: VertexId) -> Result<()> {
        self.check_vertex(id)?;
        self.check_vertex(new_parent)?;

        // Every vertex lies in the subtree of the root.
        if id == self.root {
            return Err(Error::InvalidTreeMutation(TreeViolation::Cycle));
        }

        let hierarchy = self.hierarchy();
        let old_parent = hierarchy.parent(id).ok_or(Error::DisconnectedVertices(id))?;

        if old_parent == new_parent {
            return Ok(());
        }

        let mut current = Some(new_parent);
        while let Some(vertex) = current {
            if vertex == id {
                return Err(Error::InvalidTreeMutation(TreeViolation::Cycle));
            }
            current = hierarchy.parent(vertex);
        }

        let edge = self
            .graph
            .edge_between(old_parent, id)?
            .ok_or(Error::DisconnectedVertices(id))?;

        let weight = self.graph.remove_edge(edge)?;
        self.graph.add_edge(new_parent, id, weight)?;
        self.invalidate();

        debug!(vertex = %id, from = %old_parent, to = %new_parent, "subtree moved");

        Ok(())
    }

    pub fn set_root(&mut self, id: VertexId) -> Result<()> {
        self.check_vertex(id)?;

        if id != self.root {
            self.root = id;
            self.invalidate();
        }

        Ok(())
    }

    pub fn is_root(&self, id: VertexId) -> Result<bool> {
        self.check_vertex(id)?;
        Ok(id == self.root)
    }

    /// Returns the parent of the vertex, or `None` for the root.
    pub fn parent_of(&self, id: VertexId) -> Result<Option<VertexId>> {
        self.locate(id)?;
        Ok(self.hierarchy().parent(id))
    }

    /// Returns the number of edges between the vertex and the root.
    pub fn depth_of(&self, id: VertexId) -> Result<usize> {
        self.locate(id)
    }

    /// Returns the ancestors of the vertex, the parent first and the root last.
    pub fn ancestors_of(&self, id: VertexId) -> Result<Vec<VertexId>> {
        let depth = self.locate(id)?;
        let hierarchy = self.hierarchy();

        let mut ancestors = Vec::with_capacity(depth);
        let mut current = hierarchy.parent(id);

        while let Some(vertex) = current {
            ancestors.push(vertex);
            current = hierarchy.parent(vertex);
        }

        Ok(ancestors)
    }

    /// Returns the children of the vertex in the order they were attached.
    pub fn children_of(&self, id: VertexId) -> Result<&[VertexId]> {
        self.locate(id)?;
        Ok(self.hierarchy().children(id))
    }

    pub fn is_leaf(&self, id: VertexId) -> Result<bool> {
        self.children_of(id).map(<[_]>::is_empty)
    }

    /// Number of vertices in the subtree of the vertex, the vertex included.
    pub fn subtree_size(&self, id: VertexId) -> Result<usize> {
        self.locate(id)?;
        Ok(self.hierarchy().subtree(id).len())
    }

    /// The greatest depth of a vertex in the tree.
    pub fn height(&self) -> usize {
        self.hierarchy().depth.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Iterates over vertices in breadth-first order from the root.
    pub fn vertices_by_level(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.hierarchy().order.iter().copied()
    }

    pub fn lowest_common_ancestor(&self, a: VertexId, b: VertexId) -> Result<VertexId> {
        let mut depth_a = self.locate(a)?;
        let mut depth_b = self.locate(b)?;

        let hierarchy = self.hierarchy();
        let (mut a, mut b) = (a, b);

        while depth_a > depth_b {
            a = hierarchy.parent(a).ok_or(Error::DisconnectedVertices(a))?;
            depth_a -= 1;
        }

        while depth_b > depth_a {
            b = hierarchy.parent(b).ok_or(Error::DisconnectedVertices(b))?;
            depth_b -= 1;
        }

        while a != b {
            a = hierarchy.parent(a).ok_or(Error::DisconnectedVertices(a))?;
            b = hierarchy.parent(b).ok_or(Error::DisconnectedVertices(b))?;
        }

        Ok(a)
    }

    fn hierarchy(&self) -> &Hierarchy {
        let hierarchy = self
            .hierarchy
            .get_or_init(|| Hierarchy::build(&self.graph, self.root));
        debug_assert_eq!(hierarchy.version, self.graph.version(), "stale tree hierarchy");
        hierarchy
    }

    fn invalidate(&mut self) {
        self.hierarchy = OnceLock::new();
    }

    fn check_in_degrees(graph: &Graph<V>, root: VertexId) -> Result<()> {
        for vertex in graph.vertex_ids() {
            let expected = if vertex == root { 0 } else { 1 };
            if graph.in_degree(vertex)? != expected {
                return Err(Error::InvalidTreeMutation(TreeViolation::NotATree));
            }
        }

        Ok(())
    }

    fn check_vertex(&self, id: VertexId) -> Result<()> {
        if self.graph.contains_vertex(id) {
            Ok(())
        } else {
            Err(Error::UnknownVertex(id))
        }
    }

    /// Returns the depth of the vertex.
    fn locate(&self, id: VertexId) -> Result<usize> {
        self.check_vertex(id)?;
        self.hierarchy()
            .depth(id)
            .ok_or(Error::DisconnectedVertices(id))
    }
}

impl<V> Index<VertexId> for Tree<V> {
    type Output = V;

    fn index(&self, id: VertexId) -> &Self::Output {
        &self.graph[id]
    }
}

impl<V> IndexMut<VertexId> for Tree<V> {
    fn index_mut(&mut self, id: VertexId) -> &mut Self::Output {
        &mut self.graph[id]
    }
}

impl<V> GraphBase for Tree<V> {
    fn is_directed(&self) -> bool {
        false
    }

    fn version(&self) -> u64 {
        self.graph.version()
    }
}

impl<V> VertexSet for Tree<V> {
    type VertexIdsIter<'a> = VertexIds<'a, V>
    where
        Self: 'a;

    fn vertex_ids(&self) -> Self::VertexIdsIter<'_> {
        self.graph.vertex_ids()
    }

    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn vertex_bound(&self) -> usize {
        VertexSet::vertex_bound(&self.graph)
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.graph.contains_vertex(id)
    }
}

impl<V> EdgeSet for Tree<V> {
    type EdgesIter<'a> = EdgesIter<'a, ()>
    where
        Self: 'a;

    fn edges(&self) -> Self::EdgesIter<'_> {
        self.graph.edges()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn edge_bound(&self) -> usize {
        EdgeSet::edge_bound(&self.graph)
    }

    fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.graph.endpoints(id)
    }

    fn weight(&self, id: EdgeId) -> Option<f64> {
        self.graph.weight(id)
    }
}

impl<V> Neighbors for Tree<V> {
    type NeighborsIter<'a> = NeighborsIter<'a, ()>
    where
        Self: 'a;

    fn neighbors_directed(&self, src: VertexId, dir: Direction) -> Option<Self::NeighborsIter<'_>> {
        Neighbors::neighbors_directed(&self.graph, src, dir)
    }

    fn degree_directed(&self, id: VertexId, dir: Direction) -> Option<usize> {
        self.graph.degree_directed(id, dir)
    }
}
