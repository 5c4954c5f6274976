//! Tests for heap ordering of path costs and fixed-order summation

#[cfg(test)]
mod tests {
    use piecemosaic::math::ordered::{MinCostEntry, ordered_sum};
    use std::collections::BinaryHeap;

    // Tests the heap pops the smallest distance first
    // Verified by removing the reversal in Ord
    #[test]
    fn test_heap_pops_smallest_distance() {
        let mut heap = BinaryHeap::new();
        heap.push(MinCostEntry {
            distance: 3.0,
            node: 0,
        });
        heap.push(MinCostEntry {
            distance: 1.0,
            node: 1,
        });
        heap.push(MinCostEntry {
            distance: 2.0,
            node: 2,
        });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    // Tests equal distances pop the lowest node first
    // Verified by comparing nodes in natural order
    #[test]
    fn test_equal_distances_prefer_lowest_node() {
        let mut heap = BinaryHeap::new();
        for node in [7, 3, 5] {
            heap.push(MinCostEntry {
                distance: 4.0,
                node,
            });
        }

        assert_eq!(heap.pop().map(|e| e.node), Some(3));
        assert_eq!(heap.pop().map(|e| e.node), Some(5));
        assert_eq!(heap.pop().map(|e| e.node), Some(7));
    }

    // Tests NaN distances sort after every finite distance
    // Verified by using partial_cmp with a default
    #[test]
    fn test_nan_is_totally_ordered() {
        let mut heap = BinaryHeap::new();
        heap.push(MinCostEntry {
            distance: f64::NAN,
            node: 0,
        });
        heap.push(MinCostEntry {
            distance: 1.0e300,
            node: 1,
        });

        assert_eq!(heap.pop().map(|e| e.node), Some(1));
    }

    // Tests summation follows iteration order exactly
    // Verified by summing in sorted order
    #[test]
    fn test_ordered_sum_is_reproducible() {
        let costs = vec![1.0e16, 1.0, -1.0e16, 1.0];
        let first = ordered_sum(costs.iter().copied());
        let second = ordered_sum(costs.iter().copied());

        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(first, 1.0);
        assert_eq!(ordered_sum(Vec::new()), 0.0);
    }
}
