use tracing::debug;

use crate::{
    common::UnionFind,
    core::{
        error::{Error, Result},
        id::VertexId,
        weight::OrderedFloat,
        EdgeSet, VertexSet,
    },
};

use super::SpanningTree;

#[tracing::instrument(level = "debug", skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn kruskal<G>(graph: &G) -> Result<SpanningTree>
where
    G: VertexSet + EdgeSet,
{
    if graph.is_directed() {
        return Err(Error::DirectedGraph);
    }

    // Edges come in insertion order and the sort is stable, so equal weights
    // keep that order.
    let mut edges = graph.edges().collect::<Vec<_>>();
    edges.sort_by_key(|edge| OrderedFloat(edge.weight));

    let mut sets = UnionFind::<VertexId>::new(graph.vertex_bound());
    let mut tree = SpanningTree::new(graph.edge_bound());
    let target = graph.vertex_count().saturating_sub(1);

    for edge in edges {
        if tree.len() == target {
            break;
        }

        if sets.union(edge.src, edge.dst) {
            tree.accept(edge.id, edge.weight);
        }
    }

    tree.component_count = graph.vertex_count() - tree.len();

    debug!(
        accepted = tree.len(),
        components = tree.component_count,
        "kruskal finished"
    );

    Ok(tree)
}
