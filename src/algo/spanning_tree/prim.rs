use std::{cmp::Reverse, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use tracing::debug;

use crate::{
    common::VisitSet,
    core::{
        error::{Error, Result},
        id::{IdType, VertexId},
        marker::Direction,
        weight::Weighted,
        EdgeSet, Neighbors, VertexSet,
    },
};

use super::SpanningTree;

#[tracing::instrument(level = "debug", skip(graph))]
pub fn prim<G>(graph: &G, start: VertexId) -> Result<SpanningTree>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    if graph.is_directed() {
        return Err(Error::DirectedGraph);
    }

    if !graph.contains_vertex(start) {
        return Err(Error::UnknownVertex(start));
    }

    let mut visited = FixedBitSet::with_capacity(graph.vertex_bound());
    let mut tree = SpanningTree::new(graph.edge_bound());
    // Frontier edges keyed by (weight, edge id).
    let mut queue = BinaryHeap::new();

    let grow = |vertex: VertexId, visited: &mut FixedBitSet, queue: &mut BinaryHeap<_>| {
        visited.visit(vertex);

        let Some(neighbors) = graph.neighbors_directed(vertex, Direction::Outgoing) else {
            return;
        };

        for neighbor in neighbors {
            if !visited.is_visited(neighbor.id) {
                let seq = neighbor.edge.as_usize() as u64;
                queue.push(Reverse(Weighted::new(
                    (neighbor.edge, neighbor.id),
                    neighbor.weight,
                    seq,
                )));
            }
        }
    };

    grow(start, &mut visited, &mut queue);

    while let Some(Reverse(frontier)) = queue.pop() {
        let (edge, vertex) = frontier.item;

        // Both endpoints might have been reached since the edge was pushed.
        if visited.is_visited(vertex) {
            continue;
        }

        tree.accept(edge, frontier.weight.into());
        grow(vertex, &mut visited, &mut queue);
    }

    tree.component_count = 1;

    debug!(accepted = tree.len(), "prim finished");

    Ok(tree)
}
