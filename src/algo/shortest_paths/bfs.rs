use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{
    error::Result,
    id::VertexId,
    marker::Direction,
    weight::UNIT,
    Neighbors, VertexSet,
};

use super::{check_endpoints, ShortestPaths};

#[tracing::instrument(level = "debug", skip(graph))]
pub fn bfs<G>(graph: &G, source: VertexId, goal: Option<VertexId>) -> Result<ShortestPaths>
where
    G: Neighbors + VertexSet,
{
    check_endpoints(graph, source, goal)?;

    let mut dist = FxHashMap::default();
    let mut pred = FxHashMap::default();
    let mut queue = VecDeque::new();

    dist.insert(source, 0.0);
    queue.push_back(source);

    'outer: while let Some(vertex) = queue.pop_front() {
        if goal == Some(vertex) {
            break;
        }

        let Some(neighbors) = graph.neighbors_directed(vertex, Direction::Outgoing) else {
            continue;
        };

        let next_dist = dist[&vertex] + UNIT;

        for neighbor in neighbors {
            let next = neighbor.id;

            if dist.contains_key(&next) {
                continue;
            }

            dist.insert(next, next_dist);
            pred.insert(next, vertex);

            // The distance of the goal is final as soon as it is discovered.
            if goal == Some(next) {
                break 'outer;
            }

            queue.push_back(next);
        }
    }

    debug!(reached = dist.len(), "bfs finished");

    Ok(ShortestPaths { source, dist, pred })
}
