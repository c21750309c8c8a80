pub mod connected;
pub mod shortest_paths;
pub mod spanning_tree;
pub mod toposort;

pub use connected::{connected_components, is_connected, is_path_between};
pub use shortest_paths::{bellman_ford, dijkstra, shortest_path, ShortestPaths};
pub use spanning_tree::{kruskal, prim, SpanningTree};
pub use toposort::{is_cyclic, toposort};
