//! Totally ordered floating-point costs for priority queues

use std::cmp::Ordering;

/// Heap entry ordering a node by its tentative distance
///
/// Ordering is reversed so `BinaryHeap` pops the smallest distance first.
/// Equal distances pop the lowest node index first, which fixes the
/// tie-break between equal-cost augmenting paths.
#[derive(Debug, Clone, Copy)]
pub struct MinCostEntry {
    /// Tentative distance from the source
    pub distance: f64,
    /// Node the distance belongs to
    pub node: usize,
}

impl PartialEq for MinCostEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MinCostEntry {}

impl PartialOrd for MinCostEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinCostEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Sum costs in iteration order
///
/// Summation order is fixed so identical inputs give bit-identical totals.
pub fn ordered_sum<I>(costs: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    costs.into_iter().fold(0.0, |acc, cost| acc + cost)
}
