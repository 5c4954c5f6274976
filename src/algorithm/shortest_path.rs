//! Dijkstra search over reduced costs with node potentials

use crate::algorithm::network::FlowNetwork;
use crate::math::ordered::MinCostEntry;
use bitvec::prelude::{BitVec, bitvec};
use std::collections::BinaryHeap;

/// Reusable shortest-path state for successive augmentations
///
/// Buffers are allocated once per solve and reset between searches.
pub struct PathSearch {
    distance: Vec<f64>,
    parent_edge: Vec<Option<usize>>,
    settled: BitVec,
    heap: BinaryHeap<MinCostEntry>,
}

impl PathSearch {
    /// Allocate buffers for a network of `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            distance: vec![f64::INFINITY; node_count],
            parent_edge: vec![None; node_count],
            settled: bitvec![0; node_count],
            heap: BinaryHeap::with_capacity(node_count),
        }
    }

    fn reset(&mut self) {
        self.distance.fill(f64::INFINITY);
        self.parent_edge.fill(None);
        self.settled.fill(false);
        self.heap.clear();
    }

    /// Shortest reduced-cost distance from `source` to `sink` over edges with capacity
    ///
    /// The search stops as soon as the sink is settled. Reduced costs
    /// `cost + potential[from] - potential[to]` that round below zero are
    /// treated as zero. A label is only replaced by a strictly shorter one,
    /// and equal distances leave the heap lowest node first.
    ///
    /// Returns `None` if the sink is unreachable.
    pub fn run(
        &mut self,
        network: &FlowNetwork,
        potentials: &[f64],
        source: usize,
        sink: usize,
    ) -> Option<f64> {
        self.reset();
        *self.distance.get_mut(source)? = 0.0;
        self.heap.push(MinCostEntry {
            distance: 0.0,
            node: source,
        });

        while let Some(MinCostEntry { distance, node }) = self.heap.pop() {
            if self.settled.get(node).as_deref() == Some(&true) {
                continue;
            }
            self.settled.set(node, true);
            if node == sink {
                return Some(distance);
            }

            let node_potential = potentials.get(node).copied().unwrap_or(0.0);
            for &edge_id in network.outgoing(node) {
                let Some(edge) = network.edge(edge_id) else {
                    continue;
                };
                if edge.capacity == 0 || self.settled.get(edge.to).as_deref() == Some(&true) {
                    continue;
                }
                let head_potential = potentials.get(edge.to).copied().unwrap_or(0.0);
                let reduced = (edge.cost + node_potential - head_potential).max(0.0);
                let candidate = distance + reduced;
                if let Some(best) = self.distance.get_mut(edge.to)
                    && candidate < *best
                {
                    *best = candidate;
                    if let Some(parent) = self.parent_edge.get_mut(edge.to) {
                        *parent = Some(edge_id);
                    }
                    self.heap.push(MinCostEntry {
                        distance: candidate,
                        node: edge.to,
                    });
                }
            }
        }

        None
    }

    /// Raise potentials by the distances of the last search
    ///
    /// Nodes farther than the sink, or not reached, are raised by the sink
    /// distance, which keeps every residual reduced cost non-negative.
    pub fn update_potentials(&self, potentials: &mut [f64], sink_distance: f64) {
        for (potential, &distance) in potentials.iter_mut().zip(&self.distance) {
            *potential += distance.min(sink_distance);
        }
    }

    /// Edge ids of the path found by the last search, from source to `sink`
    pub fn path_to(&self, network: &FlowNetwork, sink: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = sink;
        while let Some(Some(edge_id)) = self.parent_edge.get(node).copied() {
            path.push(edge_id);
            match network.tail(edge_id) {
                Some(tail) => node = tail,
                None => break,
            }
            if path.len() > network.node_count() {
                break;
            }
        }
        path.reverse();
        path
    }
}
