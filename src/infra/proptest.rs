//! [Proptest](https://docs.rs/proptest) strategies generating random graphs.
//!
//! Vertices carry no payload and edge weights are small integers stored as
//! `f64`, so that sums of weights are exact and results of different
//! algorithms can be compared with `==`.

use std::fmt;

use proptest::{
    prelude::Rng,
    strategy::{NewTree, Strategy, ValueTree},
    test_runner::TestRunner,
};
use rustc_hash::FxHashSet;

use crate::{
    common::UnionFind,
    core::{config::GraphConfig, id::VertexId},
    graph::Graph,
};

pub fn graph(directed: bool) -> GraphStrategy {
    GraphStrategy::new(directed)
}

pub fn graph_undirected() -> GraphStrategy {
    GraphStrategy::new(false)
}

pub fn graph_directed() -> GraphStrategy {
    GraphStrategy::new(true)
}

#[derive(Debug, Clone)]
pub struct GraphStrategy {
    directed: bool,
    params: StrategyParams,
}

macro_rules! delegate_builder_fn {
    ($name:ident$(, $param:ident: $param_type:ty)*) => {
        #[doc = concat!("See [StrategyParams::", stringify!($name), "](StrategyParams::", stringify!($name), ") for details.")]
        pub fn $name(self, $($param: $param_type),*) -> Self {
            Self {
                params: self.params.$name($($param,)*),
                ..self
            }
        }
    }
}

impl GraphStrategy {
    pub fn new(directed: bool) -> Self {
        Self::with_params(directed, StrategyParams::default())
    }

    pub fn with_params(directed: bool, params: StrategyParams) -> Self {
        Self { directed, params }
    }

    // Builder pattern on the strategy itself to allow usage as in
    // `graph_undirected().max_size(100).connected()`.
    delegate_builder_fn!(max_size, max_size: usize);
    delegate_builder_fn!(connected);
    delegate_builder_fn!(allow_loops);
    delegate_builder_fn!(multi_edge_prob, multi_edge_prob: f32);
    delegate_builder_fn!(negative_weights);
    delegate_builder_fn!(density, density: f32);
    delegate_builder_fn!(sparse);

    fn config(&self) -> GraphConfig {
        let mut config = if self.directed {
            GraphConfig::directed()
        } else {
            GraphConfig::undirected()
        };

        if self.params.allow_loops {
            config = config.allow_self_loops();
        }

        if self.params.multi_edge_prob > 0.0 {
            config = config.allow_multi_edges();
        }

        config
    }
}

#[derive(Debug, Clone)]
pub struct StrategyParams {
    max_size: usize,
    connected: bool,
    allow_loops: bool,
    multi_edge_prob: f32,
    negative_weights: bool,
    // (0, 1] - 1 means no limitation in choosing p, lower values artificially decrease chosen p
    density: f32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_size: 256,
            connected: false,
            allow_loops: false,
            multi_edge_prob: 0.0,
            negative_weights: false,
            density: 1.0,
        }
    }
}

impl StrategyParams {
    pub fn max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    /// Adds edges between the (weakly) connected components of the generated
    /// graph. Disables shrinking.
    pub fn connected(self) -> Self {
        Self {
            connected: true,
            ..self
        }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            allow_loops: true,
            ..self
        }
    }

    pub fn multi_edge_prob(self, multi_edge_prob: f32) -> Self {
        assert!(
            (0.0..=0.1).contains(&multi_edge_prob),
            "multi edge probability must be in [0, 0.1] range"
        );
        Self {
            multi_edge_prob,
            ..self
        }
    }

    /// Generates weights from `-10..=10` instead of `0..=10`.
    pub fn negative_weights(self) -> Self {
        Self {
            negative_weights: true,
            ..self
        }
    }

    pub fn density(self, density: f32) -> Self {
        assert!(
            density > 0.0 && density <= 1.0,
            "density must be in (0, 1] range"
        );
        Self { density, ..self }
    }

    pub fn sparse(self) -> Self {
        self.density(0.05)
    }
}

impl GraphStrategy {
    fn weight(&self, runner: &mut TestRunner) -> f64 {
        let min = if self.params.negative_weights { -10 } else { 0 };
        runner.rng().gen_range(min..=10) as f64
    }
}

impl Strategy for GraphStrategy {
    type Tree = GraphValueTree;
    type Value = Graph<()>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let n = runner.rng().gen_range(0..=self.params.max_size);
        let p = runner.rng().gen::<f32>() * self.params.density;

        // Efficient generation of large random networks
        // http://vlado.fmf.uni-lj.si/pub/networks/doc/ms/rndgen.pdf

        let m_guess = if n > 0 {
            ((n * (n - 1) / 2) as f32 * p).round() as usize
        } else {
            0
        };
        let mut edges = Vec::with_capacity(m_guess);

        let mut v = 1;
        let mut w = usize::MAX; // -1

        while v < n {
            let r: f32 = runner.rng().gen();
            w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

            if self.params.allow_loops {
                // Using `w > v` instead of `w >= v` to allow loops.
                while w > v && v < n {
                    w -= v;
                    v += 1;
                }
            } else {
                while w >= v && v < n {
                    w -= v;
                    v += 1;
                }
            }

            if v < n {
                // In half of the cases, swap the vertices so that a directed
                // cycle is possible.
                let (s, t) = if runner.rng().gen_bool(0.5) { (w, v) } else { (v, w) };

                edges.push((s, t, self.weight(runner)));

                // Possibly add multi edges.
                while runner.rng().gen_bool(self.params.multi_edge_prob as f64) {
                    edges.push((s, t, self.weight(runner)));
                }
            }
        }

        // Connecting components later would be undone by shrinking.
        let no_shrink = self.params.connected;

        if self.params.connected && n > 1 {
            let mut sets = UnionFind::<VertexId>::new(n);

            for &(s, t, _) in edges.iter() {
                sets.union(VertexId::from(s), VertexId::from(t));
            }

            for v in 1..n {
                if sets.union(VertexId::from(v - 1), VertexId::from(v)) {
                    edges.push((v - 1, v, self.weight(runner)));
                }
            }
        }

        Ok(GraphValueTree {
            config: self.config(),
            vertices: n,
            edges,
            current: Removed::default(),
            previous: None,
            command: Shrink::Vertex(0),
            no_shrink,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shrink {
    Vertex(usize),
    Edge(usize),
    Done,
}

#[derive(Debug, Clone, Default)]
struct Removed {
    vertices: FxHashSet<usize>,
    edges: FxHashSet<usize>,
}

/// Shrinks the generated graph by removing vertices one by one and then edges
/// one by one, keeping each removal for which the test still fails.
#[derive(Clone)]
pub struct GraphValueTree {
    config: GraphConfig,
    vertices: usize,
    edges: Vec<(usize, usize, f64)>,
    current: Removed,
    previous: Option<Removed>,
    command: Shrink,
    no_shrink: bool,
}

impl fmt::Debug for GraphValueTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphValueTree")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges.len())
            .field("removed_vertices", &self.current.vertices.len())
            .field("removed_edges", &self.current.edges.len())
            .field("command", &self.command)
            .finish()
    }
}

impl GraphValueTree {
    fn edge_exists(&self, e: usize) -> bool {
        let (src, dst, _) = self.edges[e];

        !(self.current.edges.contains(&e)
            || self.current.vertices.contains(&src)
            || self.current.vertices.contains(&dst))
    }
}

impl ValueTree for GraphValueTree {
    type Value = Graph<()>;

    fn current(&self) -> Self::Value {
        let mut graph = Graph::with_capacity(
            self.config,
            self.vertices - self.current.vertices.len(),
            self.edges.len(),
        );

        let ids = (0..self.vertices)
            .map(|v| (!self.current.vertices.contains(&v)).then(|| graph.add_vertex(())))
            .collect::<Vec<_>>();

        for (e, &(src, dst, weight)) in self.edges.iter().enumerate() {
            if !self.edge_exists(e) {
                continue;
            }

            if let (Some(src), Some(dst)) = (ids[src], ids[dst]) {
                // The configuration matches the generated structure.
                let _ = graph.add_edge(src, dst, weight);
            }
        }

        graph
    }

    fn simplify(&mut self) -> bool {
        if self.no_shrink {
            return false;
        }

        loop {
            match self.command {
                Shrink::Vertex(v) => {
                    if v >= self.vertices {
                        self.command = Shrink::Edge(0);
                    } else if self.current.vertices.contains(&v) {
                        self.command = Shrink::Vertex(v + 1);
                    } else {
                        self.previous = Some(self.current.clone());
                        self.current.vertices.insert(v);
                        self.command = Shrink::Vertex(v + 1);
                        return true;
                    }
                }
                Shrink::Edge(e) => {
                    if e >= self.edges.len() {
                        self.command = Shrink::Done;
                    } else if !self.edge_exists(e) {
                        self.command = Shrink::Edge(e + 1);
                    } else {
                        self.previous = Some(self.current.clone());
                        self.current.edges.insert(e);
                        self.command = Shrink::Edge(e + 1);
                        return true;
                    }
                }
                Shrink::Done => return false,
            }
        }
    }

    fn complicate(&mut self) -> bool {
        match self.previous.take() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::strategy::check_strategy_sanity;

    use crate::algo::is_connected;

    use super::*;

    #[test]
    #[ignore = "takes too long, run it only when the strategy is changed"]
    fn graph_strategy_sanity() {
        check_strategy_sanity(graph_undirected().max_size(16), None);
    }

    #[test]
    fn simplifies_structure() {
        let strategy = graph_undirected().max_size(64);
        let mut runner = TestRunner::deterministic();

        // Find a graph with at least one edge first.
        let mut tree = loop {
            let tree = strategy.new_tree(&mut runner).unwrap();
            if tree.current().edge_count() > 0 {
                break tree;
            }
        };

        loop {
            let graph = tree.current();

            if graph.vertex_count() < 1 || graph.edge_count() < 1 {
                if !tree.complicate() {
                    break;
                }
            } else if !tree.simplify() {
                break;
            }
        }

        let graph = tree.current();

        // No loops and multi edges => two vertices connected with one edge.
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn cloned_value_tree_shrinks_independently() {
        let strategy = graph_undirected().max_size(32);
        let mut runner = TestRunner::deterministic();

        let mut tree = loop {
            let tree = strategy.new_tree(&mut runner).unwrap();
            if tree.current().vertex_count() > 1 {
                break tree;
            }
        };

        let snapshot = tree.clone();
        assert_eq!(snapshot.current(), tree.current());

        assert!(tree.simplify());
        assert!(tree.current().vertex_count() < snapshot.current().vertex_count());
    }

    #[test]
    fn connected_graphs() {
        let strategy = graph_directed().max_size(32).sparse().connected();
        let mut runner = TestRunner::deterministic();

        for _ in 0..16 {
            let mut tree = strategy.new_tree(&mut runner).unwrap();
            assert!(is_connected(&tree.current()));
            assert!(!tree.simplify());
        }
    }

    #[test]
    fn weights_are_in_range() {
        let strategy = graph_directed().max_size(32).negative_weights();
        let mut runner = TestRunner::deterministic();

        for _ in 0..16 {
            let graph = strategy.new_tree(&mut runner).unwrap().current();

            for edge in graph.edges() {
                assert!((-10.0..=10.0).contains(&edge.weight));
                assert_eq!(edge.weight.fract(), 0.0);
            }
        }
    }
}
