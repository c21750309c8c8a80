use std::marker::PhantomData;

use crate::core::id::IdType;

/// Disjoint sets over integer identifiers, with path halving and union by
/// rank.
#[derive(Debug, Clone)]
pub struct UnionFind<I> {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
    ty: PhantomData<fn() -> I>,
}

impl<I: IdType> UnionFind<I> {
    /// Creates `bound` singleton sets, one for every identifier below the bound.
    pub fn new(bound: usize) -> Self {
        Self {
            parent: (0..bound).collect(),
            rank: vec![0; bound],
            sets: bound,
            ty: PhantomData,
        }
    }

    /// Returns the index of the representative of the set containing `id`.
    pub fn find(&mut self, id: I) -> usize {
        let mut x = id.as_usize();

        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }

        x
    }

    /// Merges the sets of `a` and `b`. Returns `false` if they were already in
    /// the same set.
    pub fn union(&mut self, a: I, b: I) -> bool {
        let a = self.find(a);
        let b = self.find(b);

        if a == b {
            return false;
        }

        match self.rank[a].cmp(&self.rank[b]) {
            std::cmp::Ordering::Less => self.parent[a] = b,
            std::cmp::Ordering::Greater => self.parent[b] = a,
            std::cmp::Ordering::Equal => {
                self.parent[b] = a;
                self.rank[a] += 1;
            }
        }

        self.sets -= 1;
        true
    }

    pub fn same_set(&mut self, a: I, b: I) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets, including singletons of unused identifiers.
    pub fn set_count(&self) -> usize {
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::VertexId;

    #[test]
    fn union_and_find() {
        let v = |i: usize| VertexId::from(i);
        let mut sets = UnionFind::<VertexId>::new(6);

        assert!(sets.union(v(0), v(1)));
        assert!(sets.union(v(2), v(3)));
        assert!(sets.union(v(1), v(3)));
        assert!(!sets.union(v(0), v(2)));

        assert!(sets.same_set(v(0), v(3)));
        assert!(!sets.same_set(v(0), v(4)));
        assert_eq!(sets.set_count(), 3);
    }

    #[test]
    fn long_chain() {
        let mut sets = UnionFind::<VertexId>::new(1000);

        for i in 1..1000 {
            sets.union(VertexId::from(i - 1), VertexId::from(i));
        }

        assert_eq!(sets.set_count(), 1);
        assert!(sets.same_set(VertexId::from(0), VertexId::from(999)));
    }
}
