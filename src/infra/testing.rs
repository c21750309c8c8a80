use thiserror::Error;

use crate::{
    core::{
        config::GraphConfig,
        id::VertexId,
        marker::Direction,
        EdgeSet, Neighbors, VertexSet,
    },
    graph::Graph,
    tree::Tree,
};

pub fn create_complete(config: GraphConfig, vertex_count: usize) -> Graph<()> {
    let edge_count = if config.is_directed() {
        vertex_count * vertex_count.saturating_sub(1)
    } else {
        vertex_count * vertex_count.saturating_sub(1) / 2
    };

    let mut graph = Graph::with_capacity(config, vertex_count, edge_count);
    let vertices = graph.extend_with_vertices(std::iter::repeat(()).take(vertex_count));

    for (i, &u) in vertices.iter().enumerate() {
        for (j, &v) in vertices.iter().enumerate() {
            if i == j || (!config.is_directed() && j < i) {
                continue;
            }

            graph
                .add_edge(u, v, 1.0)
                .expect("distinct existing vertices with a unit weight");
        }
    }

    graph
}

pub fn create_path(config: GraphConfig, vertex_count: usize) -> Graph<()> {
    let mut graph = Graph::with_capacity(config, vertex_count, vertex_count.saturating_sub(1));
    let vertices = graph.extend_with_vertices(std::iter::repeat(()).take(vertex_count));

    for pair in vertices.windows(2) {
        graph
            .add_edge(pair[0], pair[1], 1.0)
            .expect("consecutive existing vertices with a unit weight");
    }

    graph
}

fn degree_dir(dir: Direction) -> &'static str {
    match dir {
        Direction::Outgoing => "out",
        Direction::Incoming => "in",
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("vertex ids iterator count ({0}) is not equal to vertex count ({1})")]
    VertexIdsVertexCountMismatch(usize, usize),
    #[error("vertex bound ({0}) is less than vertex count ({1})")]
    VertexBoundInvalid(usize, usize),
    #[error("edges iterator count ({0}) is not equal to edge count ({1})")]
    EdgesEdgeCountMismatch(usize, usize),
    #[error("edge bound ({0}) is less than edge count ({1})")]
    EdgeBoundInvalid(usize, usize),
    #[error("edge {0} (zero-based) has a removed endpoint or differs from its id lookup")]
    EdgeInvalid(usize),
    #[error("edge {0} (zero-based) is missing in the adjacency of its endpoints")]
    EdgeNotAdjacent(usize),
    #[error("sum of directed degrees ({0}) is not equal to sum of undirected degrees ({1})")]
    DirectedUndirectedDegreeMismatch(usize, usize),
    #[error("sum of degrees ({0}) is not equal to doubled edge count without self-loops ({1})")]
    HandshakingLemma(usize, usize),
    #[error("sum of {} degrees ({0}) is not equal to edge count ({1})", degree_dir(*.2))]
    HandshakingLemmaDirected(usize, usize, Direction),
    #[error("tree has {0} edges for {1} vertices")]
    TreeEdgeCount(usize, usize),
    #[error("only {0} of {1} tree vertices are reachable from the root")]
    TreeDisconnected(usize, usize),
    #[error("tree root {0} does not exist")]
    TreeRootMissing(VertexId),
    #[error("depth of {0} is not one more than the depth of its parent")]
    TreeDepthInvalid(VertexId),
}

/// Checks that the counts, iterators and adjacency lists of a graph agree
/// with each other.
pub fn check_consistency<G>(graph: &G) -> Result<(), ConsistencyCheckError>
where
    G: VertexSet + EdgeSet + Neighbors,
{
    enum Ordering {
        Equal,
        GreaterOrEqual,
    }

    impl Ordering {
        fn cmp(self, lhs: usize, rhs: usize) -> bool {
            match self {
                Equal => lhs == rhs,
                GreaterOrEqual => lhs >= rhs,
            }
        }
    }

    fn cmp<F, E>(actual: usize, expected: usize, ord: Ordering, error: F) -> Result<(), E>
    where
        F: FnOnce(usize, usize) -> E,
    {
        if ord.cmp(actual, expected) {
            Ok(())
        } else {
            Err(error(actual, expected))
        }
    }

    use Ordering::*;

    let vertex_count = graph.vertex_count();

    cmp(
        graph.vertex_ids().count(),
        vertex_count,
        Equal,
        ConsistencyCheckError::VertexIdsVertexCountMismatch,
    )?;
    cmp(
        graph.vertex_bound(),
        vertex_count,
        GreaterOrEqual,
        ConsistencyCheckError::VertexBoundInvalid,
    )?;

    let edge_count = graph.edge_count();

    cmp(
        graph.edges().count(),
        edge_count,
        Equal,
        ConsistencyCheckError::EdgesEdgeCountMismatch,
    )?;
    cmp(
        graph.edge_bound(),
        edge_count,
        GreaterOrEqual,
        ConsistencyCheckError::EdgeBoundInvalid,
    )?;

    let mut self_loops = 0;

    for (i, edge) in graph.edges().enumerate() {
        let valid = graph.contains_vertex(edge.src)
            && graph.contains_vertex(edge.dst)
            && graph.endpoints(edge.id) == Some((edge.src, edge.dst))
            && graph.weight(edge.id) == Some(edge.weight);

        if !valid {
            return Err(ConsistencyCheckError::EdgeInvalid(i));
        }

        let adjacent = |vertex, dir| {
            graph
                .neighbors_directed(vertex, dir)
                .is_some_and(|mut neighbors| neighbors.any(|n| n.edge == edge.id))
        };

        if !adjacent(edge.src, Direction::Outgoing) || !adjacent(edge.dst, Direction::Incoming) {
            return Err(ConsistencyCheckError::EdgeNotAdjacent(i));
        }

        if edge.src == edge.dst {
            self_loops += 1;
        }
    }

    let degree = |dir: Option<Direction>| {
        graph
            .vertex_ids()
            .filter_map(|id| match dir {
                Some(dir) => graph.degree_directed(id, dir),
                None => graph.degree(id),
            })
            .sum::<usize>()
    };

    let deg_sum = degree(None);
    let out_deg_sum = degree(Some(Direction::Outgoing));
    let in_deg_sum = degree(Some(Direction::Incoming));

    if graph.is_directed() {
        cmp(
            out_deg_sum + in_deg_sum,
            deg_sum,
            Equal,
            ConsistencyCheckError::DirectedUndirectedDegreeMismatch,
        )?;

        fn handshaking_lemma_directed(
            dir: Direction,
        ) -> impl FnOnce(usize, usize) -> ConsistencyCheckError {
            move |actual, expected| {
                ConsistencyCheckError::HandshakingLemmaDirected(actual, expected, dir)
            }
        }

        // https://en.wikipedia.org/wiki/Handshaking_lemma
        cmp(
            in_deg_sum,
            edge_count,
            Equal,
            handshaking_lemma_directed(Direction::Incoming),
        )?;

        cmp(
            out_deg_sum,
            edge_count,
            Equal,
            handshaking_lemma_directed(Direction::Outgoing),
        )?;
    } else {
        cmp(
            out_deg_sum + in_deg_sum,
            2 * deg_sum,
            Equal,
            ConsistencyCheckError::DirectedUndirectedDegreeMismatch,
        )?;

        // An undirected self-loop is listed once in the adjacency of its
        // vertex.
        cmp(
            deg_sum,
            2 * edge_count - self_loops,
            Equal,
            ConsistencyCheckError::HandshakingLemma,
        )?;
    }

    Ok(())
}

/// Checks the graph of the tree and that parent links and depths derived from
/// the root describe a spanning tree of it.
pub fn check_tree_consistency<V>(tree: &Tree<V>) -> Result<(), ConsistencyCheckError> {
    let graph = tree.graph();
    check_consistency(graph)?;

    let vertex_count = graph.vertex_count();

    if !graph.contains_vertex(tree.root()) {
        return Err(ConsistencyCheckError::TreeRootMissing(tree.root()));
    }

    if graph.edge_count() + 1 != vertex_count {
        return Err(ConsistencyCheckError::TreeEdgeCount(
            graph.edge_count(),
            vertex_count,
        ));
    }

    let reached = tree.vertices_by_level().count();
    if reached != vertex_count {
        return Err(ConsistencyCheckError::TreeDisconnected(reached, vertex_count));
    }

    for vertex in graph.vertex_ids() {
        let valid = match (tree.parent_of(vertex), tree.depth_of(vertex)) {
            (Ok(None), Ok(depth)) => vertex == tree.root() && depth == 0,
            (Ok(Some(parent)), Ok(depth)) => {
                tree.depth_of(parent).map(|d| d + 1) == Ok(depth)
                    && graph.has_edge(parent, vertex)
            }
            _ => false,
        };

        if !valid {
            return Err(ConsistencyCheckError::TreeDepthInvalid(vertex));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_and_path() {
        let graph = create_complete(GraphConfig::undirected(), 5);
        assert_eq!(graph.edge_count(), 10);
        check_consistency(&graph).unwrap();

        let graph = create_complete(GraphConfig::directed(), 5);
        assert_eq!(graph.edge_count(), 20);
        check_consistency(&graph).unwrap();

        let graph = create_path(GraphConfig::directed(), 4);
        assert_eq!(graph.edge_count(), 3);
        check_consistency(&graph).unwrap();

        let graph = create_path(GraphConfig::undirected(), 0);
        assert_eq!(graph.vertex_count(), 0);
        check_consistency(&graph).unwrap();
    }

    #[test]
    fn tree_consistency() {
        let mut tree = Tree::new("r");
        let a = tree.add_child(tree.root(), "a").unwrap();
        tree.add_child(a, "b").unwrap();
        check_tree_consistency(&tree).unwrap();

        let graph = create_path(GraphConfig::undirected(), 5);
        let tree = Tree::from_graph(graph, VertexId::from(2)).unwrap();
        check_tree_consistency(&tree).unwrap();
    }
}
