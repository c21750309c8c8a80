//! Identifiers of vertices and edges.
//!
//! Both [`VertexId`] and [`EdgeId`] are integer handles into the arena of a
//! [`Registry`](crate::storage::Registry). They are allocated monotonically and
//! never reused within one graph, so an identifier is stable for the lifetime
//! of the element it refers to and comparing two edge identifiers compares
//! their insertion order.

use std::fmt;

/// A unique identification of a vertex or edge in a graph.
///
/// Algorithms rely on the integer representation to index contiguous arrays
/// and bit sets sized by [`VertexSet::vertex_bound`] or
/// [`EdgeSet::edge_bound`].
///
/// [`VertexSet::vertex_bound`]: crate::core::VertexSet::vertex_bound
/// [`EdgeSet::edge_bound`]: crate::core::EdgeSet::edge_bound
pub trait IdType: Copy + Ord + std::hash::Hash + fmt::Debug {
    /// Conceptually `None` in `Option<ID>`, but without using `Option`.
    fn sentinel() -> Self;

    /// Converts an ID into the corresponding `usize`.
    fn as_usize(&self) -> usize;

    /// Converts an `usize` into the corresponding ID.
    fn from_usize(index: usize) -> Self;

    /// Returns `true` if the value represents the sentinel value.
    fn is_sentinel(&self) -> bool {
        self == &Self::sentinel()
    }
}

/// Stable identifier of a vertex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u64);

/// Stable identifier of an edge.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u64);

macro_rules! impl_int_id {
    ($id_ty:ident, $prefix:literal) => {
        impl IdType for $id_ty {
            fn sentinel() -> Self {
                Self(u64::MAX)
            }

            fn as_usize(&self) -> usize {
                self.0 as usize
            }

            fn from_usize(index: usize) -> Self {
                Self(index as u64)
            }
        }

        impl From<usize> for $id_ty {
            fn from(index: usize) -> Self {
                Self::from_usize(index)
            }
        }

        impl From<$id_ty> for usize {
            fn from(id: $id_ty) -> Self {
                id.as_usize()
            }
        }

        impl fmt::Debug for $id_ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl fmt::Display for $id_ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

impl_int_id!(VertexId, "v");
impl_int_id!(EdgeId, "e");
