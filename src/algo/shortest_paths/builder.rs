use crate::core::{error::Result, id::VertexId, EdgeSet, GraphBase, Neighbors, VertexSet};

use super::{algo, bellman_ford::bellman_ford, bfs::bfs, dijkstra::dijkstra, Algo, ShortestPaths};

enum AlgoExt {
    Algo(Algo),
    Bfs,
}

pub struct ShortestPathsBuilder<'a, G, A> {
    graph: &'a G,
    goal: Option<VertexId>,
    unit_weight: bool,
    algo: A,
}

impl ShortestPaths {
    pub fn on<G>(graph: &G) -> ShortestPathsBuilder<'_, G, algo::AnyAlgo>
    where
        G: GraphBase,
    {
        ShortestPathsBuilder {
            graph,
            goal: None,
            unit_weight: false,
            algo: algo::AnyAlgo,
        }
    }
}

impl<'a, G, A> ShortestPathsBuilder<'a, G, A>
where
    G: GraphBase,
{
    /// Stops the search as soon as the distance to `goal` is final.
    ///
    /// Distances of other vertices are not guaranteed to be final then.
    pub fn goal(self, goal: VertexId) -> Self {
        Self {
            goal: Some(goal),
            ..self
        }
    }

    /// Treats every edge as having weight `1.0`, regardless of its actual
    /// weight.
    pub fn unit_weight(self) -> Self {
        Self {
            unit_weight: true,
            ..self
        }
    }

    pub fn dijkstra(self) -> ShortestPathsBuilder<'a, G, algo::Dijkstra>
    where
        G: Neighbors + VertexSet + EdgeSet,
    {
        self.with_algo(algo::Dijkstra)
    }

    pub fn bellman_ford(self) -> ShortestPathsBuilder<'a, G, algo::BellmanFord>
    where
        G: VertexSet + EdgeSet,
    {
        self.with_algo(algo::BellmanFord)
    }

    /// Uses breadth-first search, which implies [unit
    /// weights](Self::unit_weight).
    pub fn bfs(self) -> ShortestPathsBuilder<'a, G, algo::Bfs>
    where
        G: Neighbors + VertexSet,
    {
        ShortestPathsBuilder {
            unit_weight: true,
            ..self.with_algo(algo::Bfs)
        }
    }

    pub fn using(self, algo: Algo) -> ShortestPathsBuilder<'a, G, algo::SpecificAlgo>
    where
        G: Neighbors + VertexSet + EdgeSet,
    {
        self.with_algo(algo::SpecificAlgo(Some(algo)))
    }

    pub fn using_opt(self, algo: Option<Algo>) -> ShortestPathsBuilder<'a, G, algo::SpecificAlgo>
    where
        G: Neighbors + VertexSet + EdgeSet,
    {
        self.with_algo(algo::SpecificAlgo(algo))
    }

    fn with_algo<A2>(self, algo: A2) -> ShortestPathsBuilder<'a, G, A2> {
        ShortestPathsBuilder {
            graph: self.graph,
            goal: self.goal,
            unit_weight: self.unit_weight,
            algo,
        }
    }
}

impl<'a, G> ShortestPathsBuilder<'a, G, algo::AnyAlgo>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    pub fn run(self, source: VertexId) -> Result<ShortestPaths> {
        let algo = choose_algo(self.graph, self.unit_weight);
        run_algo(self.graph, source, self.goal, self.unit_weight, algo)
    }
}

impl<'a, G> ShortestPathsBuilder<'a, G, algo::SpecificAlgo>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    pub fn run(self, source: VertexId) -> Result<ShortestPaths> {
        let algo = match self.algo.0 {
            Some(algo) => AlgoExt::Algo(algo),
            None => choose_algo(self.graph, self.unit_weight),
        };

        run_algo(self.graph, source, self.goal, self.unit_weight, algo)
    }
}

impl<'a, G> ShortestPathsBuilder<'a, G, algo::Dijkstra>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    pub fn run(self, source: VertexId) -> Result<ShortestPaths> {
        dijkstra(self.graph, source, self.goal, self.unit_weight)
    }
}

impl<'a, G> ShortestPathsBuilder<'a, G, algo::BellmanFord>
where
    G: VertexSet + EdgeSet,
{
    pub fn run(self, source: VertexId) -> Result<ShortestPaths> {
        bellman_ford(self.graph, source, self.goal, self.unit_weight)
    }
}

impl<'a, G> ShortestPathsBuilder<'a, G, algo::Bfs>
where
    G: Neighbors + VertexSet,
{
    pub fn run(self, source: VertexId) -> Result<ShortestPaths> {
        bfs(self.graph, source, self.goal)
    }
}

fn run_algo<G>(
    graph: &G,
    source: VertexId,
    goal: Option<VertexId>,
    unit_weight: bool,
    algo: AlgoExt,
) -> Result<ShortestPaths>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    match algo {
        AlgoExt::Algo(Algo::Dijkstra) => dijkstra(graph, source, goal, unit_weight),
        AlgoExt::Algo(Algo::BellmanFord) => bellman_ford(graph, source, goal, unit_weight),
        AlgoExt::Bfs => bfs(graph, source, goal),
    }
}

fn choose_algo<G>(graph: &G, unit_weight: bool) -> AlgoExt
where
    G: EdgeSet,
{
    if unit_weight {
        // BFS is optimal for unit weights.
        AlgoExt::Bfs
    } else if graph.is_directed() && graph.edges().any(|edge| edge.weight < 0.0) {
        // Negative edges in undirected graphs form trivial negative cycles, so
        // Bellman-Ford would fail on them anyway.
        AlgoExt::Algo(Algo::BellmanFord)
    } else {
        AlgoExt::Algo(Algo::Dijkstra)
    }
}
