//! Edge weights.
//!
//! Weights are `f64`. A graph is "unweighted" purely by convention, in which
//! case every edge carries the [`UNIT`] weight.

use std::cmp::Ordering;

use super::error::{Error, Result};

/// The weight of an edge in an unweighted graph.
pub const UNIT: f64 = 1.0;

/// Checks that the weight is a finite number.
///
/// Negative zero is returned as positive zero, so that both compare equal
/// under [`OrderedFloat`].
pub fn validate(weight: f64) -> Result<f64> {
    if weight.is_finite() {
        Ok(weight + 0.0)
    } else {
        Err(Error::InvalidWeight(weight))
    }
}

/// Total order over `f64` based on [`f64::total_cmp`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for OrderedFloat {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<OrderedFloat> for f64 {
    fn from(value: OrderedFloat) -> Self {
        value.0
    }
}

/// Priority queue item ordered by its weight and, for equal weights, by the
/// sequence number of its insertion.
///
/// Use with [`std::cmp::Reverse`] in a [`BinaryHeap`](std::collections::BinaryHeap)
/// to pop the lightest, earliest inserted item first.
#[derive(Debug, Clone, Copy)]
pub struct Weighted<T> {
    pub item: T,
    pub weight: OrderedFloat,
    pub seq: u64,
}

impl<T> Weighted<T> {
    pub fn new(item: T, weight: f64, seq: u64) -> Self {
        Self {
            item,
            weight: OrderedFloat(weight),
            seq,
        }
    }
}

impl<T> PartialEq for Weighted<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<T> Eq for Weighted<T> {}

impl<T> PartialOrd for Weighted<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Weighted<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[cfg(test)]
mod tests {
    use std::{cmp::Reverse, collections::BinaryHeap};

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn validate_rejects_non_finite() {
        assert_eq!(validate(2.5), Ok(2.5));
        assert_eq!(validate(-1.0), Ok(-1.0));
        assert_matches!(validate(f64::NAN), Err(Error::InvalidWeight(w)) if w.is_nan());
        assert_matches!(validate(f64::INFINITY), Err(Error::InvalidWeight(_)));
        assert_matches!(validate(f64::NEG_INFINITY), Err(Error::InvalidWeight(_)));
    }

    #[test]
    fn validate_normalizes_negative_zero() {
        let zero = validate(-0.0).unwrap();
        assert!(zero.is_sign_positive());
        assert_eq!(OrderedFloat(zero), OrderedFloat(0.0));
        assert!(OrderedFloat(-0.0) < OrderedFloat(0.0));
    }

    #[test]
    fn weighted_ties_broken_by_sequence() {
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(Weighted::new('c', 2.0, 0)));
        queue.push(Reverse(Weighted::new('a', 1.0, 2)));
        queue.push(Reverse(Weighted::new('b', 1.0, 3)));
        queue.push(Reverse(Weighted::new('z', 1.0, 1)));

        let order = std::iter::from_fn(|| queue.pop().map(|Reverse(w)| w.item)).collect::<String>();
        assert_eq!(order, "zabc");
    }
}
