use std::{cmp::Reverse, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    common::VisitSet,
    core::{
        error::{Error, Result},
        id::VertexId,
        marker::Direction,
        weight::{Weighted, UNIT},
        EdgeSet, Neighbors, VertexSet,
    },
};

use super::{check_endpoints, ShortestPaths};

#[tracing::instrument(level = "debug", skip(graph), fields(directed = graph.is_directed()))]
pub fn dijkstra<G>(
    graph: &G,
    source: VertexId,
    goal: Option<VertexId>,
    unit_weight: bool,
) -> Result<ShortestPaths>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    check_endpoints(graph, source, goal)?;

    // Every edge is checked, not only the reachable ones, so that the outcome
    // does not depend on the source.
    if !unit_weight && graph.edges().any(|edge| edge.weight < 0.0) {
        return Err(Error::NegativeWeight);
    }

    let mut visited = FixedBitSet::with_capacity(graph.vertex_bound());
    let mut dist = FxHashMap::default();
    let mut pred = FxHashMap::default();
    let mut queue = BinaryHeap::new();
    let mut seq = 0;

    dist.insert(source, 0.0);
    queue.push(Reverse(Weighted::new(source, 0.0, seq)));

    while let Some(Reverse(Weighted { item: vertex, .. })) = queue.pop() {
        // This can happen due to duplication of vertices when doing relaxation
        // in our implementation.
        if !visited.visit(vertex) {
            continue;
        }

        if goal == Some(vertex) {
            break;
        }

        let Some(neighbors) = graph.neighbors_directed(vertex, Direction::Outgoing) else {
            continue;
        };

        let vertex_dist = dist[&vertex];

        for neighbor in neighbors {
            let next = neighbor.id;

            if visited.is_visited(next) {
                continue;
            }

            let edge_dist = if unit_weight { UNIT } else { neighbor.weight };
            let next_dist = vertex_dist + edge_dist;

            // Only a strict improvement replaces the predecessor, so ties are
            // won by the first discovered path.
            let improved = match dist.get(&next) {
                Some(&curr) => next_dist < curr,
                None => true,
            };

            if improved {
                dist.insert(next, next_dist);
                pred.insert(next, vertex);

                seq += 1;
                queue.push(Reverse(Weighted::new(next, next_dist, seq)));
            }
        }
    }

    debug!(settled = visited.count_ones(..), "dijkstra finished");

    Ok(ShortestPaths { source, dist, pred })
}
