pub mod union_find;
pub mod visit_set;

pub use union_find::UnionFind;
pub use visit_set::VisitSet;
