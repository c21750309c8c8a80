use std::ops::{Index, IndexMut};

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::{
    core::{
        config::GraphConfig,
        error::{Error, Result},
        id::{EdgeId, VertexId},
        marker::Direction,
        weight, EdgeSet, GraphBase, Neighbors, VertexSet,
    },
    storage::{
        registry::{EdgesIter, NeighborsIter, VertexIds},
        Registry,
    },
};

/// A directed or undirected weighted graph with vertex payloads of type `V`
/// and edge data of type `E`.
///
/// The structural policy (directedness, multi edges, self-loops) is given by a
/// [`GraphConfig`] at construction and stays fixed for the lifetime of the
/// graph. Every mutation either succeeds or leaves the graph unchanged.
///
/// Every edge has an `f64` weight used by the algorithms. The edge data is
/// an opaque attachment that the algorithms never look at.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<V, E = ()> {
    storage: Registry<V, E>,
    config: GraphConfig,
}

impl<V> Graph<V> {
    pub fn new(config: GraphConfig) -> Self {
        Self::with_config(config)
    }

    pub fn new_directed() -> Self {
        Self::new(GraphConfig::directed())
    }

    pub fn new_undirected() -> Self {
        Self::new(GraphConfig::undirected())
    }
}

impl<V, E> Graph<V, E> {
    /// Creates an empty graph whose edge data type is chosen by the caller.
    ///
    /// ```
    /// use grove::{Graph, GraphConfig};
    ///
    /// let mut graph: Graph<&str, &str> = Graph::with_config(GraphConfig::directed());
    /// let a = graph.add_vertex("a");
    /// let b = graph.add_vertex("b");
    /// let e = graph.add_edge_with(a, b, 2.0, "road")?;
    /// assert_eq!(graph.edge_data(e), Some(&"road"));
    /// # Ok::<(), grove::Error>(())
    /// ```
    pub fn with_config(config: GraphConfig) -> Self {
        Self::with_capacity(config, 0, 0)
    }

    pub fn with_capacity(config: GraphConfig, vertex_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            storage: Registry::with_capacity(
                config.is_directed(),
                config.multi_edges(),
                vertex_capacity,
                edge_capacity,
            ),
            config,
        }
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn is_directed(&self) -> bool {
        self.config.is_directed()
    }

    pub fn version(&self) -> u64 {
        self.storage.version()
    }

    /// Returns `true` if any edge carries a weight different from the unit
    /// weight.
    pub fn is_weighted(&self) -> bool {
        self.storage.edges().any(|edge| edge.weight != weight::UNIT)
    }

    pub fn add_vertex(&mut self, payload: V) -> VertexId {
        let id = self.storage.add_vertex(payload);
        trace!(vertex = %id, "vertex added");
        id
    }

    pub fn extend_with_vertices<I>(&mut self, iter: I) -> Vec<VertexId>
    where
        I: IntoIterator<Item = V>,
    {
        iter.into_iter()
            .map(|payload| self.add_vertex(payload))
            .collect()
    }

    /// Adds an edge carrying the given data.
    pub fn add_edge_with(
        &mut self,
        src: VertexId,
        dst: VertexId,
        weight: f64,
        data: E,
    ) -> Result<EdgeId> {
        let weight = self.check_edge(src, dst, weight)?;
        let id = self.storage.add_edge(src, dst, weight, data)?;
        trace!(edge = %id, %src, %dst, weight, "edge added");
        Ok(id)
    }

    /// Removes the vertex and all its incident edges, returning the payload.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<V> {
        let before = self.storage.edge_count();
        let payload = self.storage.remove_vertex(id)?;
        debug!(
            vertex = %id,
            cascaded_edges = before - self.storage.edge_count(),
            "vertex removed"
        );
        Ok(payload)
    }

    /// Removes the edge, returning its weight. The edge data is dropped.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<f64> {
        let weight = self.storage.remove_edge(id)?;
        debug!(edge = %id, "edge removed");
        Ok(weight)
    }

    /// Removes the first edge between the vertices, if any.
    pub fn remove_edge_between(&mut self, src: VertexId, dst: VertexId) -> Result<Option<f64>> {
        match self.edge_between(src, dst)? {
            Some(id) => self.remove_edge(id).map(Some),
            None => Ok(None),
        }
    }

    /// Replaces the weight of an edge, returning the previous one.
    pub fn update_weight(&mut self, id: EdgeId, weight: f64) -> Result<f64> {
        let previous = self.storage.update_weight(id, weight)?;
        trace!(edge = %id, previous, weight, "edge weight updated");
        Ok(previous)
    }

    pub fn clear(&mut self) {
        debug!(
            vertices = self.storage.vertex_count(),
            edges = self.storage.edge_count(),
            "graph cleared"
        );
        self.storage.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.storage.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.storage.edge_count()
    }

    pub fn vertex_ids(&self) -> VertexIds<'_, V> {
        self.storage.vertex_ids()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.storage.contains_vertex(id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.storage.vertex(id)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut V> {
        self.storage.vertex_mut(id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.storage.vertices()
    }

    pub fn find_vertex(&self, payload: &V) -> Option<VertexId>
    where
        V: PartialEq,
    {
        self.storage
            .vertices()
            .find_map(|(id, v)| (v == payload).then_some(id))
    }

    pub fn edges(&self) -> EdgesIter<'_, E> {
        self.storage.edges()
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.storage.contains_edge(id)
    }

    pub fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.storage.endpoints(id)
    }

    pub fn weight(&self, id: EdgeId) -> Option<f64> {
        self.storage.weight(id)
    }

    pub fn edge_data(&self, id: EdgeId) -> Option<&E> {
        self.storage.edge_data(id)
    }

    pub fn edge_data_mut(&mut self, id: EdgeId) -> Option<&mut E> {
        self.storage.edge_data_mut(id)
    }

    /// Returns `true` if there is an edge from `src` to `dst` (in any
    /// orientation for undirected graphs). Absent vertices have no edges.
    pub fn has_edge(&self, src: VertexId, dst: VertexId) -> bool {
        self.storage.contains_edge_between(src, dst)
    }

    /// Returns the first edge from `src` to `dst` in insertion order.
    pub fn edge_between(&self, src: VertexId, dst: VertexId) -> Result<Option<EdgeId>> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;
        Ok(self.storage.edge_between(src, dst))
    }

    /// Returns the weight of the first edge from `src` to `dst`, or `None` if
    /// the vertices are not adjacent.
    pub fn edge_weight(&self, src: VertexId, dst: VertexId) -> Result<Option<f64>> {
        Ok(self
            .edge_between(src, dst)?
            .and_then(|id| self.storage.weight(id)))
    }

    /// Iterates over the neighbors of a vertex in edge insertion order.
    ///
    /// In directed graphs, only the successors are reported. Use
    /// [`neighbors_directed`](Graph::neighbors_directed) for predecessors.
    pub fn neighbors(&self, id: VertexId) -> Result<NeighborsIter<'_, E>> {
        self.neighbors_directed(id, Direction::Outgoing)
    }

    pub fn neighbors_directed(&self, id: VertexId, dir: Direction) -> Result<NeighborsIter<'_, E>> {
        self.storage
            .neighbors_directed(id, dir)
            .ok_or(Error::UnknownVertex(id))
    }

    /// Number of incident edges. In directed graphs, this is the sum of the
    /// in-degree and out-degree.
    pub fn degree(&self, id: VertexId) -> Result<usize> {
        Neighbors::degree(&self.storage, id).ok_or(Error::UnknownVertex(id))
    }

    pub fn in_degree(&self, id: VertexId) -> Result<usize> {
        self.storage.in_degree(id)
    }

    pub fn out_degree(&self, id: VertexId) -> Result<usize> {
        self.storage.out_degree(id)
    }

    /// Reinterprets every edge as undirected, keeping identifiers, payloads,
    /// weights and edge data.
    pub(crate) fn into_undirected(self) -> Self {
        let config = GraphConfig::undirected();
        let config = if self.config.multi_edges() {
            config.allow_multi_edges()
        } else {
            config
        };
        let config = if self.config.self_loops() {
            config.allow_self_loops()
        } else {
            config
        };

        Self {
            storage: self.storage.into_undirected(),
            config,
        }
    }

    fn check_vertex(&self, id: VertexId) -> Result<()> {
        if self.storage.contains_vertex(id) {
            Ok(())
        } else {
            Err(Error::UnknownVertex(id))
        }
    }

    /// Runs every check of edge insertion against the current graph and
    /// returns the normalized weight.
    fn check_edge(&self, src: VertexId, dst: VertexId, weight: f64) -> Result<f64> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        if src == dst && !self.config.self_loops() {
            return Err(Error::SelfLoop(src));
        }

        let weight = weight::validate(weight)?;

        if !self.config.multi_edges() && self.storage.contains_edge_between(src, dst) {
            return Err(Error::DuplicateEdge { src, dst });
        }

        Ok(weight)
    }

    fn pair_key(&self, src: VertexId, dst: VertexId) -> (VertexId, VertexId) {
        if self.is_directed() || src <= dst {
            (src, dst)
        } else {
            (dst, src)
        }
    }
}

impl<V, E: Default> Graph<V, E> {
    /// Adds an edge with default edge data.
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, weight: f64) -> Result<EdgeId> {
        self.add_edge_with(src, dst, weight, E::default())
    }

    /// Adds an edge with the unit weight.
    pub fn add_edge_unweighted(&mut self, src: VertexId, dst: VertexId) -> Result<EdgeId> {
        self.add_edge(src, dst, weight::UNIT)
    }

    /// Adds all edges or none of them.
    ///
    /// The whole batch is validated before the first insertion, including
    /// duplicates among the batch itself when multi edges are not allowed.
    pub fn extend_with_edges<I>(&mut self, iter: I) -> Result<Vec<EdgeId>>
    where
        I: IntoIterator<Item = (VertexId, VertexId, f64)>,
    {
        let edges = iter.into_iter().collect::<Vec<_>>();

        let mut batch = FxHashSet::default();
        for &(src, dst, weight) in edges.iter() {
            self.check_edge(src, dst, weight)?;

            if !self.config.multi_edges() && !batch.insert(self.pair_key(src, dst)) {
                return Err(Error::DuplicateEdge { src, dst });
            }
        }

        edges
            .into_iter()
            .map(|(src, dst, weight)| self.add_edge(src, dst, weight))
            .collect()
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl<V, E> Index<VertexId> for Graph<V, E> {
    type Output = V;

    fn index(&self, id: VertexId) -> &Self::Output {
        match self.vertex(id) {
            Some(payload) => payload,
            None => panic!("vertex {id} does not exist"),
        }
    }
}

impl<V, E> IndexMut<VertexId> for Graph<V, E> {
    fn index_mut(&mut self, id: VertexId) -> &mut Self::Output {
        match self.vertex_mut(id) {
            Some(payload) => payload,
            None => panic!("vertex {id} does not exist"),
        }
    }
}

impl<V, E> GraphBase for Graph<V, E> {
    fn is_directed(&self) -> bool {
        self.storage.is_directed()
    }

    fn version(&self) -> u64 {
        self.storage.version()
    }
}

impl<V, E> VertexSet for Graph<V, E> {
    type VertexIdsIter<'a> = VertexIds<'a, V>
    where
        Self: 'a;

    fn vertex_ids(&self) -> Self::VertexIdsIter<'_> {
        self.storage.vertex_ids()
    }

    fn vertex_count(&self) -> usize {
        self.storage.vertex_count()
    }

    fn vertex_bound(&self) -> usize {
        self.storage.vertex_bound()
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.storage.contains_vertex(id)
    }
}

impl<V, E> EdgeSet for Graph<V, E> {
    type EdgesIter<'a> = EdgesIter<'a, E>
    where
        Self: 'a;

    fn edges(&self) -> Self::EdgesIter<'_> {
        self.storage.edges()
    }

    fn edge_count(&self) -> usize {
        self.storage.edge_count()
    }

    fn edge_bound(&self) -> usize {
        self.storage.edge_bound()
    }

    fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.storage.endpoints(id)
    }

    fn weight(&self, id: EdgeId) -> Option<f64> {
        self.storage.weight(id)
    }
}

impl<V, E> Neighbors for Graph<V, E> {
    type NeighborsIter<'a> = NeighborsIter<'a, E>
    where
        Self: 'a;

    fn neighbors_directed(&self, src: VertexId, dir: Direction) -> Option<Self::NeighborsIter<'_>> {
        self.storage.neighbors_directed(src, dir)
    }

    fn degree_directed(&self, id: VertexId, dir: Direction) -> Option<usize> {
        self.storage.degree_directed(id, dir)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use proptest::prelude::*;

    use super::*;
    use crate::infra::{proptest::graph_undirected, testing::check_consistency};

    #[test]
    fn add_edge_then_has_edge() {
        let mut graph = Graph::new_undirected();

        let a = graph.add_vertex("a");
        let b = graph.add_vertex("b");
        let c = graph.add_vertex("c");

        graph.add_edge(a, b, 2.5).unwrap();

        assert!(graph.has_edge(a, b));
        assert!(graph.has_edge(b, a));
        assert!(!graph.has_edge(a, c));
        assert_eq!(graph.edge_weight(b, a), Ok(Some(2.5)));
        assert_eq!(graph.edge_weight(a, c), Ok(None));
        assert!(graph.is_weighted());
    }

    #[test]
    fn directed_edge_is_one_way() {
        let mut graph = Graph::new_directed();

        let a = graph.add_vertex(());
        let b = graph.add_vertex(());
        graph.add_edge_unweighted(a, b).unwrap();

        assert!(graph.has_edge(a, b));
        assert!(!graph.has_edge(b, a));
        assert_eq!(graph.out_degree(a), Ok(1));
        assert_eq!(graph.in_degree(a), Ok(0));
        assert_eq!(graph.degree(b), Ok(1));
        assert!(!graph.is_weighted());
        assert_eq!(
            graph
                .neighbors_directed(b, Direction::Incoming)
                .unwrap()
                .map(|n| n.id)
                .collect::<Vec<_>>(),
            vec![a]
        );
    }

    #[test]
    fn invalid_weight_leaves_graph_unchanged() {
        let mut graph = Graph::new_undirected();

        let a = graph.add_vertex(());
        let b = graph.add_vertex(());
        let version = graph.version();

        assert_matches!(graph.add_edge(a, b, f64::NAN), Err(Error::InvalidWeight(w)) if w.is_nan());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.version(), version);
    }

    #[test]
    fn self_loop_policy() {
        let mut graph = Graph::new_undirected();
        let a = graph.add_vertex(());
        assert_eq!(graph.add_edge(a, a, 1.0), Err(Error::SelfLoop(a)));

        let mut graph = Graph::new(GraphConfig::undirected().allow_self_loops());
        let a = graph.add_vertex(());
        graph.add_edge(a, a, 1.0).unwrap();
        assert_eq!(graph.degree(a), Ok(1));
        assert!(graph.has_edge(a, a));
    }

    #[test]
    fn multi_edge_policy() {
        let mut graph = Graph::new_undirected();
        let a = graph.add_vertex(());
        let b = graph.add_vertex(());

        graph.add_edge(a, b, 1.0).unwrap();
        assert_eq!(
            graph.add_edge(b, a, 2.0),
            Err(Error::DuplicateEdge { src: b, dst: a })
        );

        let mut graph = Graph::new(GraphConfig::undirected().allow_multi_edges());
        let a = graph.add_vertex(());
        let b = graph.add_vertex(());

        graph.add_edge(a, b, 1.0).unwrap();
        graph.add_edge(b, a, 2.0).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(a), Ok(2));
        assert_eq!(graph.edge_weight(a, b), Ok(Some(1.0)));
    }

    #[test]
    fn remove_vertex_then_queries_fail() {
        let mut graph = Graph::new_directed();

        let a = graph.add_vertex('a');
        let b = graph.add_vertex('b');
        let c = graph.add_vertex('c');

        graph.add_edge(a, b, 1.0).unwrap();
        graph.add_edge(b, c, 1.0).unwrap();
        graph.add_edge(a, c, 1.0).unwrap();

        assert_eq!(graph.remove_vertex(b), Ok('b'));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(b), Err(Error::UnknownVertex(b)));
        assert_eq!(graph.edge_weight(a, b), Err(Error::UnknownVertex(b)));
        assert_matches!(graph.neighbors(b), Err(Error::UnknownVertex(_)));
        assert_eq!(graph.add_edge(b, c, 1.0), Err(Error::UnknownVertex(b)));
        assert_eq!(graph.remove_vertex(b), Err(Error::UnknownVertex(b)));
        assert!(!graph.has_edge(a, b));

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn remove_edge_between() {
        let mut graph = Graph::new_undirected();

        let a = graph.add_vertex(());
        let b = graph.add_vertex(());
        graph.add_edge(a, b, 3.0).unwrap();

        assert_eq!(graph.remove_edge_between(b, a), Ok(Some(3.0)));
        assert_eq!(graph.remove_edge_between(b, a), Ok(None));
        assert_eq!(graph.degree(a), Ok(0));
    }

    #[test]
    fn payload_access() {
        let mut graph = Graph::new_undirected();

        let ids = graph.extend_with_vertices(["x", "y", "z"]);
        assert_eq!(graph.find_vertex(&"y"), Some(ids[1]));
        assert_eq!(graph.find_vertex(&"w"), None);
        assert_eq!(graph[ids[2]], "z");

        graph[ids[0]] = "u";
        assert_eq!(graph.vertex(ids[0]), Some(&"u"));
    }

    #[test]
    fn extend_with_edges_is_all_or_nothing() {
        let mut graph = Graph::new_undirected();

        let ids = graph.extend_with_vertices([(), (), ()]);
        let version = graph.version();

        let result = graph.extend_with_edges([
            (ids[0], ids[1], 1.0),
            (ids[1], ids[2], f64::INFINITY),
            (ids[0], ids[2], 1.0),
        ]);

        assert_matches!(result, Err(Error::InvalidWeight(_)));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.version(), version);

        assert_eq!(
            graph.extend_with_edges([(ids[0], ids[1], 1.0), (ids[1], ids[1], 1.0)]),
            Err(Error::SelfLoop(ids[1]))
        );
        assert_eq!(graph.edge_count(), 0);

        let edges = graph
            .extend_with_edges([(ids[0], ids[1], 1.0), (ids[1], ids[2], 2.0)])
            .unwrap();
        assert_eq!(edges.len(), 2);
        check_consistency(&graph).unwrap();
    }

    #[test]
    fn extend_with_edges_rejects_duplicates_within_batch() {
        let mut graph = Graph::new_undirected();

        let ids = graph.extend_with_vertices([(), (), ()]);
        assert_eq!(
            graph.extend_with_edges([
                (ids[0], ids[1], 1.0),
                (ids[1], ids[2], 1.0),
                (ids[1], ids[0], 3.0),
            ]),
            Err(Error::DuplicateEdge {
                src: ids[1],
                dst: ids[0]
            })
        );
        assert_eq!(graph.edge_count(), 0);

        let mut graph = Graph::new_directed();

        let ids = graph.extend_with_vertices([(), ()]);
        graph
            .extend_with_edges([(ids[0], ids[1], 1.0), (ids[1], ids[0], 1.0)])
            .unwrap();
        assert_eq!(graph.edge_count(), 2);

        let mut graph = Graph::new(GraphConfig::undirected().allow_multi_edges());

        let ids = graph.extend_with_vertices([(), ()]);
        graph
            .extend_with_edges([(ids[0], ids[1], 1.0), (ids[1], ids[0], 2.0)])
            .unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn edge_data() {
        let mut graph: Graph<&str, Vec<&str>> = Graph::with_config(GraphConfig::undirected());

        let a = graph.add_vertex("a");
        let b = graph.add_vertex("b");
        let c = graph.add_vertex("c");

        let ab = graph.add_edge_with(a, b, 2.0, vec!["bridge"]).unwrap();
        let bc = graph.add_edge(b, c, 1.0).unwrap();

        assert_eq!(graph.edge_data(ab), Some(&vec!["bridge"]));
        assert_eq!(graph.edge_data(bc), Some(&Vec::new()));

        graph.edge_data_mut(bc).unwrap().push("tunnel");
        assert_eq!(graph.edge_data(bc), Some(&vec!["tunnel"]));
        assert_eq!(graph.edge_weight(c, b), Ok(Some(1.0)));

        assert_eq!(
            graph.add_edge_with(b, a, 1.0, vec![]),
            Err(Error::DuplicateEdge { src: b, dst: a })
        );

        graph.remove_vertex(b).unwrap();
        assert_eq!(graph.edge_data(ab), None);
        assert_eq!(graph.edge_data_mut(bc), None);
        check_consistency(&graph).unwrap();
    }

    #[test]
    fn edge_data_is_ignored_by_algorithms() {
        use crate::algo::ShortestPaths;

        let mut graph: Graph<(), char> = Graph::with_config(GraphConfig::directed());

        let a = graph.add_vertex(());
        let b = graph.add_vertex(());
        let c = graph.add_vertex(());

        graph.add_edge_with(a, b, 1.0, 'x').unwrap();
        graph.add_edge_with(b, c, 1.0, 'y').unwrap();
        graph.add_edge_with(a, c, 5.0, 'z').unwrap();

        let paths = ShortestPaths::on(&graph).run(a).unwrap();
        assert_eq!(paths.dist(c), 2.0);
        assert_eq!(paths.path_to(c), Some(vec![a, b, c]));
    }

    #[test]
    fn update_weight_changes_weighted_flag() {
        let mut graph = Graph::new_undirected();

        let a = graph.add_vertex(());
        let b = graph.add_vertex(());
        let e = graph.add_edge_unweighted(a, b).unwrap();

        assert!(!graph.is_weighted());
        assert_eq!(graph.update_weight(e, 0.5), Ok(1.0));
        assert!(graph.is_weighted());
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_remove_vertex_removes_incident_edges(
            graph in graph_undirected().allow_loops().multi_edge_prob(0.05).max_size(64),
            index in any::<prop::sample::Index>(),
        ) {
            let mut graph = graph;
            let vertices = graph.vertex_ids().collect::<Vec<_>>();
            prop_assume!(!vertices.is_empty());

            let removed = *index.get(&vertices);
            let incident = graph
                .edges()
                .filter(|edge| edge.src == removed || edge.dst == removed)
                .map(|edge| edge.id)
                .collect::<Vec<_>>();
            let edge_count = graph.edge_count();

            graph.remove_vertex(removed).unwrap();

            prop_assert_eq!(graph.edge_count(), edge_count - incident.len());
            for edge in incident {
                prop_assert!(!graph.contains_edge(edge));
            }
            prop_assert_eq!(graph.degree(removed), Err(Error::UnknownVertex(removed)));
            check_consistency(&graph).unwrap();
        }
    }
}
