//! Find [single source shortest paths] and their distances in a graph.
//!
//! See available parameters [here](ShortestPathsBuilder#implementations).
//!
//! Unless chosen explicitly, the algorithm is selected from the graph: BFS when
//! [unit weights](ShortestPathsBuilder::unit_weight) are requested,
//! Bellman-Ford for directed graphs with a negative edge and Dijkstra
//! otherwise.
//!
//! [single source shortest paths]:
//!     https://en.wikipedia.org/wiki/Shortest_path_problem#Single-source_shortest_paths
//!
//! # Examples
//!
//! ```
//! use grove::{algo::ShortestPaths, Graph};
//!
//! let mut graph = Graph::new_undirected();
//!
//! let prague = graph.add_vertex("Prague");
//! let bratislava = graph.add_vertex("Bratislava");
//! let vienna = graph.add_vertex("Vienna");
//! let munich = graph.add_vertex("Munich");
//! let nuremberg = graph.add_vertex("Nuremberg");
//! let florence = graph.add_vertex("Florence");
//! let rome = graph.add_vertex("Rome");
//!
//! graph.extend_with_edges([
//!     (prague, bratislava, 328.0),
//!     (prague, nuremberg, 297.0),
//!     (prague, vienna, 293.0),
//!     (bratislava, vienna, 79.0),
//!     (nuremberg, munich, 170.0),
//!     (vienna, munich, 402.0),
//!     (vienna, florence, 863.0),
//!     (munich, florence, 646.0),
//!     (florence, rome, 278.0),
//! ])?;
//!
//! let shortest_paths = ShortestPaths::on(&graph).goal(prague).run(rome)?;
//! let distance = shortest_paths[prague];
//! let path = shortest_paths
//!     .reconstruct(prague)
//!     .map(|v| graph[v])
//!     .collect::<Vec<_>>()
//!     .join(" - ");
//!
//! assert_eq!(distance, 1391.0);
//! assert_eq!(path, "Nuremberg - Munich - Florence - Rome");
//! # Ok::<(), grove::Error>(())
//! ```

use std::ops::Index;

use rustc_hash::FxHashMap;

use crate::core::{
    error::{Error, Result},
    id::VertexId,
    EdgeSet, Neighbors, VertexSet,
};

mod bellman_ford;
mod bfs;
mod builder;
mod dijkstra;

pub use builder::ShortestPathsBuilder;

/// Shortest paths and their distances from a single source vertex.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: VertexId,
    // Using HashMaps because the algorithm supports early termination when
    // reaching given goal. It is likely that reaching goal means visiting a
    // subgraph which is significantly smaller than the original graph.
    dist: FxHashMap<VertexId, f64>,
    pred: FxHashMap<VertexId, VertexId>,
}

impl ShortestPaths {
    /// Source vertex where the search was started.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the path distance between the source vertex and the given
    /// vertex, or positive infinity if it's not known.
    ///
    /// There are two causes why the distance between two vertices is not known:
    /// (1) the vertices are not connected, or (2) the
    /// [goal](ShortestPathsBuilder::goal) was reached before visiting the given
    /// vertex.
    pub fn dist(&self, to: VertexId) -> f64 {
        self.dist.get(&to).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, to: VertexId) -> bool {
        self.dist.contains_key(&to)
    }

    /// Returns the vertex preceding the given one on its shortest path.
    pub fn pred(&self, to: VertexId) -> Option<VertexId> {
        self.pred.get(&to).copied()
    }

    /// Returns an iterator over vertices on the path from the given vertex to
    /// the source vertex, in this order. The vertex itself is not included, the
    /// source is. The iterator is empty if the vertex was not reached.
    pub fn reconstruct(&self, to: VertexId) -> PathReconstruction<'_> {
        PathReconstruction {
            curr: to,
            pred: &self.pred,
        }
    }

    /// Returns the path from the source to the given vertex, both included, or
    /// `None` if the vertex was not reached.
    pub fn path_to(&self, to: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(to) {
            return None;
        }

        let mut path = vec![to];
        path.extend(self.reconstruct(to));
        path.reverse();
        Some(path)
    }
}

impl Index<VertexId> for ShortestPaths {
    type Output = f64;

    fn index(&self, index: VertexId) -> &Self::Output {
        self.dist.get(&index).unwrap_or(&f64::INFINITY)
    }
}

/// Algorithm for [`ShortestPaths`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Algo {
    /// [Dijkstra's
    /// algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
    ///
    /// Works on graphs with non-negative edge weights. It iteratively settles
    /// the vertex with the smallest known distance from the source and relaxes
    /// the edges to its neighbors.
    Dijkstra,

    /// [Bellman–Ford
    /// algorithm](https://en.wikipedia.org/wiki/Bellman%E2%80%93Ford_algorithm).
    ///
    /// Handles negative edge weights and detects negative cycles reachable
    /// from the source, at the cost of a worse running time than Dijkstra's
    /// algorithm.
    BellmanFord,
}

mod algo {
    use super::Algo;

    #[derive(Debug)]
    pub struct AnyAlgo;

    #[derive(Debug)]
    pub struct SpecificAlgo(pub Option<Algo>);

    #[derive(Debug)]
    pub struct Dijkstra;

    #[derive(Debug)]
    pub struct BellmanFord;

    #[derive(Debug)]
    pub struct Bfs;
}

/// Iterator over the vertices on the path from a vertex to the source vertex.
///
/// Returned by [`ShortestPaths::reconstruct`].
pub struct PathReconstruction<'a> {
    curr: VertexId,
    pred: &'a FxHashMap<VertexId, VertexId>,
}

impl Iterator for PathReconstruction<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.curr = self.pred.get(&self.curr).copied()?;
        Some(self.curr)
    }
}

/// Runs Dijkstra's algorithm from `source` over the whole graph.
pub fn dijkstra<G>(graph: &G, source: VertexId) -> Result<ShortestPaths>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    ShortestPaths::on(graph).dijkstra().run(source)
}

/// Runs Bellman-Ford algorithm from `source` over the whole graph.
pub fn bellman_ford<G>(graph: &G, source: VertexId) -> Result<ShortestPaths>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    ShortestPaths::on(graph).bellman_ford().run(source)
}

/// Returns the vertices of a shortest path from `start` to `end`, both
/// included, or `None` if `end` is not reachable from `start`.
pub fn shortest_path<G>(graph: &G, start: VertexId, end: VertexId) -> Result<Option<Vec<VertexId>>>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    let paths = ShortestPaths::on(graph).goal(end).run(start)?;
    Ok(paths.path_to(end))
}

fn check_endpoints<G>(graph: &G, source: VertexId, goal: Option<VertexId>) -> Result<()>
where
    G: VertexSet,
{
    if !graph.contains_vertex(source) {
        return Err(Error::UnknownVertex(source));
    }

    match goal {
        Some(goal) if !graph.contains_vertex(goal) => Err(Error::UnknownVertex(goal)),
        _ => Ok(()),
    }
}
