//! Find a [topologically sorted] sequence of vertices of a [directed acyclic
//! graph] (DAG) and detect cycles.
//!
//! The order is the reversed order in which a depth-first search started
//! from every vertex (in id order) finishes the vertices.
//!
//! [topologically sorted]: https://en.wikipedia.org/wiki/Topological_sorting
//! [directed acyclic graph]:
//!     https://en.wikipedia.org/wiki/Directed_acyclic_graph
//!
//! # Examples
//!
//! ```
//! use grove::{algo::toposort, Graph};
//!
//! let mut dependency_tree = Graph::new_directed();
//!
//! let cargo = dependency_tree.add_vertex("cargo");
//! let cargo_credential = dependency_tree.add_vertex("cargo_credential");
//! let serde = dependency_tree.add_vertex("serde");
//! let serde_json = dependency_tree.add_vertex("serde_json");
//! let time = dependency_tree.add_vertex("time");
//! let libc = dependency_tree.add_vertex("libc");
//!
//! // Edge direction in "must be compiled before" relation.
//! dependency_tree.extend_with_edges([
//!     (cargo_credential, cargo, 1.0),
//!     (serde, cargo_credential, 1.0),
//!     (serde_json, cargo_credential, 1.0),
//!     (serde, serde_json, 1.0),
//!     (time, cargo_credential, 1.0),
//!     (libc, time, 1.0),
//!     (serde, time, 1.0),
//! ])?;
//!
//! let order = toposort(&dependency_tree)?
//!     .into_iter()
//!     .map(|v| dependency_tree[v])
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(order.first(), Some(&"libc"));
//! assert_eq!(order.last(), Some(&"cargo"));
//! # Ok::<(), grove::Error>(())
//! ```

use tracing::debug;

use crate::{
    core::{
        error::{Error, Result},
        id::VertexId,
        Neighbors, VertexSet,
    },
    visit::{DfsEvent, DfsEvents, Visitor},
};

/// Returns the vertices of a directed graph in topological order, that is,
/// every vertex precedes all vertices reachable from it.
///
/// Fails with [`Error::Cycle`] if the graph contains a cycle (including a
/// self-loop) and with [`Error::UndirectedGraph`] for undirected graphs.
#[tracing::instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count()))]
pub fn toposort<G>(graph: &G) -> Result<Vec<VertexId>>
where
    G: Neighbors + VertexSet,
{
    if !graph.is_directed() {
        return Err(Error::UndirectedGraph);
    }

    let mut finished = Vec::with_capacity(graph.vertex_count());
    let mut dfs = DfsEvents::new(graph);

    for event in dfs.start_all(graph).into_iter(graph) {
        match event {
            DfsEvent::Finish { vertex, .. } => finished.push(vertex),
            DfsEvent::BackEdge { from, to, .. } => {
                debug!(%from, %to, "cycle detected");
                return Err(Error::Cycle);
            }
            _ => {}
        }
    }

    finished.reverse();
    Ok(finished)
}

/// Returns `true` if the graph contains a cycle.
///
/// In undirected graphs, the edge leading back to the vertex it was traversed
/// from does not form a cycle, but a parallel edge or a self-loop does.
pub fn is_cyclic<G>(graph: &G) -> bool
where
    G: Neighbors + VertexSet,
{
    let mut dfs = DfsEvents::new(graph);

    // Any back edge closes a cycle. The iterator borrows `dfs` and has to be
    // dropped before it.
    #[allow(clippy::let_and_return)]
    let cyclic = dfs
        .start_all(graph)
        .into_iter(graph)
        .any(|event| matches!(event, DfsEvent::BackEdge { .. }));
    cyclic
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use crate::{
        core::{config::GraphConfig, id::IdType},
        graph::Graph,
        infra::proptest::{graph_directed, graph_undirected},
    };

    use super::*;

    fn assert_valid<V>(order: &[VertexId], graph: &Graph<V>) {
        let mut position = vec![usize::MAX; graph.vertex_bound()];
        for (i, v) in order.iter().enumerate() {
            position[v.as_usize()] = i;
        }

        assert_eq!(order.len(), graph.vertex_count());

        for edge in graph.edges() {
            assert!(
                position[edge.src.as_usize()] < position[edge.dst.as_usize()],
                "edge {} -> {} violates the order",
                edge.src,
                edge.dst
            );
        }
    }

    fn create_dag() -> Graph<()> {
        let mut graph = Graph::new_directed();
        let v = graph.extend_with_vertices([(); 6]);

        graph
            .extend_with_edges([
                (v[5], v[2], 1.0),
                (v[5], v[0], 1.0),
                (v[4], v[0], 1.0),
                (v[4], v[1], 1.0),
                (v[2], v[3], 1.0),
                (v[3], v[1], 1.0),
            ])
            .unwrap();

        graph
    }

    #[test]
    fn toposort_basic() {
        let graph = create_dag();
        let order = toposort(&graph).unwrap();

        assert_valid(&order, &graph);
        assert!(!is_cyclic(&graph));
    }

    #[test]
    fn toposort_deterministic() {
        let mut graph = Graph::new_directed();
        let v = graph.extend_with_vertices([(); 3]);
        graph.add_edge(v[0], v[1], 1.0).unwrap();

        // Roots are tried in id order and finished vertices are reversed.
        assert_eq!(toposort(&graph), Ok(vec![v[2], v[0], v[1]]));
    }

    #[test]
    fn toposort_cycle() {
        let mut graph = create_dag();
        let v = graph.vertex_ids().collect::<Vec<_>>();
        graph.add_edge(v[1], v[5], 1.0).unwrap();

        assert_matches!(toposort(&graph), Err(Error::Cycle));
        assert!(is_cyclic(&graph));
    }

    #[test]
    fn toposort_self_loop() {
        let mut graph = Graph::new(GraphConfig::directed().allow_self_loops());
        let v = graph.add_vertex(());
        graph.add_edge(v, v, 1.0).unwrap();

        assert_matches!(toposort(&graph), Err(Error::Cycle));
    }

    #[test]
    fn toposort_undirected() {
        let graph = Graph::<()>::new_undirected();

        assert_matches!(toposort(&graph), Err(Error::UndirectedGraph));
    }

    #[test]
    fn toposort_after_removal() {
        let mut graph = create_dag();
        graph.remove_vertex(VertexId::from(2)).unwrap();

        let order = toposort(&graph).unwrap();
        assert_valid(&order, &graph);
    }

    #[test]
    fn undirected_cycles() {
        let mut graph = Graph::new(GraphConfig::undirected().allow_multi_edges());
        let v = graph.extend_with_vertices([(); 3]);

        graph
            .extend_with_edges([(v[0], v[1], 1.0), (v[1], v[2], 1.0)])
            .unwrap();
        assert!(!is_cyclic(&graph));

        // Parallel edge.
        graph.add_edge(v[2], v[1], 1.0).unwrap();
        assert!(is_cyclic(&graph));

        let mut graph = Graph::new_undirected();
        let v = graph.extend_with_vertices([(); 3]);

        graph
            .extend_with_edges([(v[0], v[1], 1.0), (v[1], v[2], 1.0), (v[2], v[0], 1.0)])
            .unwrap();
        assert!(is_cyclic(&graph));
    }

    #[test]
    fn directed_diamond_is_acyclic() {
        let mut graph = Graph::new_directed();
        let v = graph.extend_with_vertices([(); 4]);

        graph
            .extend_with_edges([
                (v[0], v[1], 1.0),
                (v[0], v[2], 1.0),
                (v[1], v[3], 1.0),
                (v[2], v[3], 1.0),
            ])
            .unwrap();

        assert!(!is_cyclic(&graph));
        assert_eq!(toposort(&graph), Ok(vec![v[0], v[2], v[1], v[3]]));
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_toposort_any_directed(graph in graph_directed()) {
            match toposort(&graph) {
                Ok(order) => {
                    assert_valid(&order, &graph);
                    prop_assert!(!is_cyclic(&graph));
                }
                Err(error) => {
                    prop_assert_eq!(error, Error::Cycle);
                    prop_assert!(is_cyclic(&graph));
                }
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_undirected_forest_iff_acyclic(graph in graph_undirected()) {
            let components = crate::algo::connected_components(&graph).len();
            let is_forest = graph.edge_count() + components == graph.vertex_count();

            prop_assert_eq!(is_forest, !is_cyclic(&graph));
        }
    }
}
