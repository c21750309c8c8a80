//! Graph and rooted tree data structures with traversals, shortest paths and
//! minimum spanning trees.
//!
//! # Examples
//!
//! ```
//! use grove::{algo::ShortestPaths, Graph, Tree};
//!
//! let mut graph = Graph::new_undirected();
//!
//! let a = graph.add_vertex("a");
//! let b = graph.add_vertex("b");
//! let c = graph.add_vertex("c");
//!
//! graph.add_edge(a, b, 2.0)?;
//! graph.add_edge(b, c, 3.0)?;
//! graph.add_edge(a, c, 7.0)?;
//!
//! let paths = ShortestPaths::on(&graph).goal(c).run(a)?;
//! assert_eq!(paths.dist(c), 5.0);
//! assert_eq!(paths.path_to(c), Some(vec![a, b, c]));
//!
//! let mut tree = Tree::new("root");
//! let child = tree.add_child(tree.root(), "child")?;
//! assert_eq!(tree.parent_of(child)?, Some(tree.root()));
//! # Ok::<(), grove::Error>(())
//! ```

pub mod algo;
pub mod common;
pub mod core;
pub mod graph;
pub mod infra;
pub mod storage;
pub mod tree;
pub mod visit;

pub use crate::{
    core::{EdgeId, Error, GraphConfig, Result, TreeViolation, VertexId},
    graph::Graph,
    tree::Tree,
};

pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        core::{EdgeRef, EdgeSet, GraphBase, IdType, NeighborRef, Neighbors, VertexSet},
        visit::Visitor,
    };
}
