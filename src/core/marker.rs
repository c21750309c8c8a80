#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

pub use Direction::*;

impl Direction {
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Direction::Outgoing => 0,
            Direction::Incoming => 1,
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }

    #[inline]
    #[must_use]
    pub fn opposite(&self) -> Self {
        match self {
            Outgoing => Incoming,
            Incoming => Outgoing,
        }
    }

    /// Directions in which the adjacency of a graph is stored.
    ///
    /// Undirected graphs keep a single (outgoing) list per vertex.
    pub fn stored(is_directed: bool) -> &'static [Direction] {
        if is_directed {
            &[Outgoing, Incoming]
        } else {
            &[Outgoing]
        }
    }
}
