use std::{collections::HashSet, hash::BuildHasher};

use fixedbitset::FixedBitSet;

use crate::core::id::IdType;

/// A set of visited vertices or edges.
pub trait VisitSet<I: IdType> {
    /// Marks the element as visited.
    ///
    /// Returns `true` when this is the first time the element is visited.
    fn visit(&mut self, id: I) -> bool;

    /// Returns `true` if the element is marked as visited.
    fn is_visited(&self, id: I) -> bool;

    /// Returns the number of visited elements.
    fn visited_count(&self) -> usize;

    /// Resets the set of visited elements to be empty.
    fn reset_visited(&mut self);
}

impl<I: IdType, S: BuildHasher> VisitSet<I> for HashSet<I, S> {
    fn visit(&mut self, id: I) -> bool {
        self.insert(id)
    }

    fn is_visited(&self, id: I) -> bool {
        self.contains(&id)
    }

    fn visited_count(&self) -> usize {
        self.len()
    }

    fn reset_visited(&mut self) {
        self.clear()
    }
}

impl<I: IdType> VisitSet<I> for FixedBitSet {
    fn visit(&mut self, id: I) -> bool {
        // Vertices may be added to the graph between visitor steps.
        if self.len() <= id.as_usize() {
            self.grow(id.as_usize() + 1);
        }
        !self.put(id.as_usize())
    }

    fn is_visited(&self, id: I) -> bool {
        self.contains(id.as_usize())
    }

    fn visited_count(&self) -> usize {
        self.count_ones(..)
    }

    fn reset_visited(&mut self) {
        self.clear()
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::core::id::VertexId;

    fn check<S: VisitSet<VertexId>>(mut set: S) {
        let v = VertexId::from(5);

        assert!(!set.is_visited(v));
        assert!(set.visit(v));
        assert!(!set.visit(v));
        assert!(set.is_visited(v));
        assert_eq!(set.visited_count(), 1);

        set.reset_visited();
        assert!(!set.is_visited(v));
        assert_eq!(set.visited_count(), 0);
    }

    #[test]
    fn bit_set_grows() {
        check(FixedBitSet::with_capacity(2));
    }

    #[test]
    fn hash_set() {
        check(FxHashSet::default());
    }
}
