use tracing::debug;

use crate::core::{
    error::{Error, Result},
    id::{IdType, VertexId},
    weight::UNIT,
    EdgeSet, VertexSet,
};

use super::{check_endpoints, ShortestPaths};

#[tracing::instrument(level = "debug", skip(graph), fields(directed = graph.is_directed()))]
pub fn bellman_ford<G>(
    graph: &G,
    source: VertexId,
    goal: Option<VertexId>,
    unit_weight: bool,
) -> Result<ShortestPaths>
where
    G: VertexSet + EdgeSet,
{
    check_endpoints(graph, source, goal)?;

    let bound = graph.vertex_bound();
    let mut dist = vec![f64::INFINITY; bound];
    let mut pred = vec![VertexId::sentinel(); bound];

    dist[source.as_usize()] = 0.0;

    // Undirected edges are relaxed in both directions.
    let mut arcs = Vec::with_capacity(graph.edge_count() * 2);
    for edge in graph.edges() {
        let weight = if unit_weight { UNIT } else { edge.weight };
        arcs.push((edge.src, edge.dst, weight));

        if !graph.is_directed() && edge.src != edge.dst {
            arcs.push((edge.dst, edge.src, weight));
        }
    }

    let relax = |dist: &mut [f64], pred: &mut [VertexId]| {
        let mut relaxed = false;

        for &(u, v, weight) in arcs.iter() {
            let u_dist = dist[u.as_usize()];

            // Vertices not reached yet must not propagate anything, otherwise
            // negative cycles unreachable from the source would be reported.
            if u_dist == f64::INFINITY {
                continue;
            }

            let next_dist = u_dist + weight;

            if next_dist < dist[v.as_usize()] {
                dist[v.as_usize()] = next_dist;
                pred[v.as_usize()] = u;
                relaxed = true;
            }
        }

        relaxed
    };

    let mut terminated_early = false;
    let mut rounds = 0;

    // Try to relax edges |V| - 1 times.
    for _ in 1..graph.vertex_count() {
        rounds += 1;

        // If no distance was improved, then subsequent iterations would not
        // improve as well. So we can terminate early.
        if !relax(&mut dist, &mut pred) {
            terminated_early = true;
            break;
        }
    }

    debug!(rounds, terminated_early, "bellman-ford relaxation finished");

    // Check for negative cycles. If the main loop was terminated early, then
    // the absence of cycle is guaranteed.
    if !terminated_early && relax(&mut dist, &mut pred) {
        return Err(Error::NegativeCycle);
    }

    let dist = dist
        .into_iter()
        .enumerate()
        .filter(|(_, d)| d.is_finite())
        .map(|(i, d)| (VertexId::from_usize(i), d))
        .collect();

    let pred = pred
        .into_iter()
        .enumerate()
        .filter(|(_, p)| !p.is_sentinel())
        .map(|(i, p)| (VertexId::from_usize(i), p))
        .collect();

    Ok(ShortestPaths { source, dist, pred })
}
