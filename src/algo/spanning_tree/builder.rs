use crate::core::{error::Result, id::VertexId, EdgeSet, GraphBase, Neighbors, VertexSet};

use super::{algo, kruskal::kruskal, prim::prim, Algo, SpanningTree};

pub struct SpanningTreeBuilder<'a, G, A> {
    graph: &'a G,
    algo: A,
}

impl SpanningTree {
    pub fn on<G>(graph: &G) -> SpanningTreeBuilder<'_, G, algo::AnyAlgo>
    where
        G: GraphBase,
    {
        SpanningTreeBuilder {
            graph,
            algo: algo::AnyAlgo,
        }
    }
}

impl<'a, G, A> SpanningTreeBuilder<'a, G, A>
where
    G: GraphBase,
{
    pub fn kruskal(self) -> SpanningTreeBuilder<'a, G, algo::Kruskal>
    where
        G: VertexSet + EdgeSet,
    {
        SpanningTreeBuilder {
            graph: self.graph,
            algo: algo::Kruskal,
        }
    }

    pub fn prim(self, start: VertexId) -> SpanningTreeBuilder<'a, G, algo::Prim>
    where
        G: Neighbors + VertexSet + EdgeSet,
    {
        SpanningTreeBuilder {
            graph: self.graph,
            algo: algo::Prim(start),
        }
    }

    pub fn using(self, algo: Algo) -> SpanningTreeBuilder<'a, G, Algo>
    where
        G: Neighbors + VertexSet + EdgeSet,
    {
        SpanningTreeBuilder {
            graph: self.graph,
            algo,
        }
    }
}

impl<'a, G> SpanningTreeBuilder<'a, G, algo::AnyAlgo>
where
    G: VertexSet + EdgeSet,
{
    /// Runs Kruskal's algorithm, which covers every component of the graph.
    pub fn run(self) -> Result<SpanningTree> {
        kruskal(self.graph)
    }
}

impl<'a, G> SpanningTreeBuilder<'a, G, algo::Kruskal>
where
    G: VertexSet + EdgeSet,
{
    pub fn run(self) -> Result<SpanningTree> {
        kruskal(self.graph)
    }
}

impl<'a, G> SpanningTreeBuilder<'a, G, algo::Prim>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    pub fn run(self) -> Result<SpanningTree> {
        prim(self.graph, self.algo.0)
    }
}

impl<'a, G> SpanningTreeBuilder<'a, G, Algo>
where
    G: Neighbors + VertexSet + EdgeSet,
{
    pub fn run(self) -> Result<SpanningTree> {
        match self.algo {
            Algo::Kruskal => kruskal(self.graph),
            Algo::Prim(start) => prim(self.graph, start),
        }
    }
}
