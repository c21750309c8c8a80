//! Check [connectivity] of a graph and split it into connected components.
//!
//! Directed graphs are checked for weak connectivity, that is, edge
//! orientation is ignored.
//!
//! # Examples
//!
//! ```
//! use grove::{algo::{connected_components, is_connected}, Graph};
//!
//! let mut graph = Graph::new_directed();
//!
//! let a = graph.add_vertex("a");
//! let b = graph.add_vertex("b");
//! let c = graph.add_vertex("c");
//! let d = graph.add_vertex("d");
//!
//! graph.add_edge(a, b, 1.0)?;
//! graph.add_edge(c, b, 1.0)?;
//!
//! assert!(!is_connected(&graph));
//! assert_eq!(connected_components(&graph), vec![vec![a, b, c], vec![d]]);
//!
//! graph.add_edge(d, a, 1.0)?;
//! assert!(is_connected(&graph));
//! # Ok::<(), grove::Error>(())
//! ```
//!
//! [connectivity]: https://en.wikipedia.org/wiki/Connectivity_(graph_theory)

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::{
    common::VisitSet,
    core::{
        error::{Error, Result},
        id::VertexId,
        marker::Direction,
        Neighbors, VertexSet,
    },
    visit::{Bfs, Visitor},
};

/// Returns `true` if every vertex can be reached from every other vertex,
/// ignoring edge orientation. The empty graph is connected.
pub fn is_connected<G>(graph: &G) -> bool
where
    G: Neighbors + VertexSet,
{
    let Some(start) = graph.vertex_ids().next() else {
        return true;
    };

    let mut visited = FixedBitSet::with_capacity(graph.vertex_bound());
    collect_component(graph, start, &mut visited).len() == graph.vertex_count()
}

/// Returns `true` if `dst` can be reached from `src` following the edge
/// orientation.
pub fn is_path_between<G>(graph: &G, src: VertexId, dst: VertexId) -> Result<bool>
where
    G: Neighbors + VertexSet,
{
    for vertex in [src, dst] {
        if !graph.contains_vertex(vertex) {
            return Err(Error::UnknownVertex(vertex));
        }
    }

    if src == dst {
        // A vertex is trivially connected with itself.
        return Ok(true);
    }

    let found = Bfs::new(graph).start(src).into_iter(graph).any(|v| v == dst);
    Ok(found)
}

/// Splits the graph into (weakly) connected components.
///
/// Vertices in each component are sorted by id and the components are ordered
/// by their smallest vertex.
pub fn connected_components<G>(graph: &G) -> Vec<Vec<VertexId>>
where
    G: Neighbors + VertexSet,
{
    let mut visited = FixedBitSet::with_capacity(graph.vertex_bound());
    let mut components = Vec::new();

    for root in graph.vertex_ids() {
        if visited.is_visited(root) {
            continue;
        }

        let mut component = collect_component(graph, root, &mut visited);
        component.sort_unstable();
        components.push(component);
    }

    components
}

fn collect_component<G>(graph: &G, root: VertexId, visited: &mut FixedBitSet) -> Vec<VertexId>
where
    G: Neighbors,
{
    let dirs: &[Direction] = if graph.is_directed() {
        &[Direction::Outgoing, Direction::Incoming]
    } else {
        &[Direction::Outgoing]
    };

    let mut component = Vec::new();
    let mut queue = VecDeque::from([root]);
    visited.visit(root);

    while let Some(vertex) = queue.pop_front() {
        component.push(vertex);

        for &dir in dirs {
            let Some(neighbors) = graph.neighbors_directed(vertex, dir) else {
                continue;
            };

            for neighbor in neighbors {
                if visited.visit(neighbor.id) {
                    queue.push_back(neighbor.id);
                }
            }
        }
    }

    component
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use crate::{
        graph::Graph,
        infra::proptest::{graph_directed, graph_undirected},
    };

    use super::*;

    #[test]
    fn empty_and_single() {
        let mut graph = Graph::<()>::new_undirected();
        assert!(is_connected(&graph));
        assert!(connected_components(&graph).is_empty());

        let v = graph.add_vertex(());
        assert!(is_connected(&graph));
        assert_eq!(connected_components(&graph), vec![vec![v]]);
    }

    #[test]
    fn undirected_components() {
        let mut graph = Graph::new_undirected();
        let v = graph.extend_with_vertices([(); 6]);

        graph
            .extend_with_edges([(v[4], v[0], 1.0), (v[1], v[5], 1.0), (v[5], v[2], 1.0)])
            .unwrap();

        assert!(!is_connected(&graph));
        assert_eq!(
            connected_components(&graph),
            vec![vec![v[0], v[4]], vec![v[1], v[2], v[5]], vec![v[3]]]
        );

        graph.add_edge(v[3], v[4], 1.0).unwrap();
        graph.add_edge(v[0], v[2], 1.0).unwrap();
        assert!(is_connected(&graph));
    }

    #[test]
    fn directed_weak_connectivity() {
        let mut graph = Graph::new_directed();
        let v = graph.extend_with_vertices([(); 3]);

        graph
            .extend_with_edges([(v[0], v[1], 1.0), (v[2], v[1], 1.0)])
            .unwrap();

        assert!(is_connected(&graph));
        assert_eq!(is_path_between(&graph, v[0], v[1]), Ok(true));
        assert_eq!(is_path_between(&graph, v[0], v[2]), Ok(false));
        assert_eq!(is_path_between(&graph, v[2], v[2]), Ok(true));
    }

    #[test]
    fn removed_vertices_are_skipped() {
        let mut graph = Graph::new_undirected();
        let v = graph.extend_with_vertices([(); 3]);

        graph
            .extend_with_edges([(v[0], v[1], 1.0), (v[1], v[2], 1.0)])
            .unwrap();
        graph.remove_vertex(v[1]).unwrap();

        assert_eq!(connected_components(&graph), vec![vec![v[0]], vec![v[2]]]);
        assert_eq!(
            is_path_between(&graph, v[0], v[1]),
            Err(Error::UnknownVertex(v[1]))
        );
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_connected_components_partition_vertices(graph in graph_undirected()) {
            let components = connected_components(&graph);

            prop_assert_eq!(
                components.iter().flatten().copied().collect::<BTreeSet<_>>(),
                graph.vertex_ids().collect::<BTreeSet<_>>()
            );
            prop_assert_eq!(
                components.iter().map(Vec::len).sum::<usize>(),
                graph.vertex_count()
            );
            prop_assert_eq!(components.len() <= 1, is_connected(&graph));

            for pair in components.windows(2) {
                prop_assert!(pair[0][0] < pair[1][0]);
                prop_assert_eq!(is_path_between(&graph, pair[0][0], pair[1][0]), Ok(false));
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_connected_strategy_is_connected(graph in graph_directed().connected()) {
            prop_assert!(is_connected(&graph));
        }
    }
}
