//! Residual flow network for the bipartite transportation problem
//!
//! Edges are stored in pairs: an edge with id `e` has its reverse at `e ^ 1`.
//! Pushing flow along an edge moves capacity onto its reverse, so the flow on
//! a forward edge is the residual capacity of its reverse.

use crate::analysis::cost::CostMatrix;
use crate::analysis::demand::DemandVector;
use crate::io::error::{Result, computation_error};

/// Directed edge with residual capacity and unit cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowEdge {
    /// Head node
    pub to: usize,
    /// Remaining capacity
    pub capacity: usize,
    /// Cost per unit of flow
    pub cost: f64,
}

/// Adjacency-list residual graph
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    edges: Vec<FlowEdge>,
    adjacency: Vec<Vec<usize>>,
}

impl FlowNetwork {
    /// Create a network with `node_count` isolated nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Add an edge and its zero-capacity reverse, returning the forward edge id
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is not a node of the network
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: usize, cost: f64) -> Result<usize> {
        let node_count = self.adjacency.len();
        if from >= node_count || to >= node_count {
            return Err(computation_error(
                "flow network",
                &format!("edge {from} -> {to} leaves the {node_count} nodes"),
            ));
        }
        let id = self.edges.len();
        self.edges.push(FlowEdge { to, capacity, cost });
        self.edges.push(FlowEdge {
            to: from,
            capacity: 0,
            cost: -cost,
        });
        if let Some(outgoing) = self.adjacency.get_mut(from) {
            outgoing.push(id);
        }
        if let Some(incoming) = self.adjacency.get_mut(to) {
            incoming.push(id ^ 1);
        }
        Ok(id)
    }

    /// Number of nodes
    pub const fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges including reverses
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edge by id
    pub fn edge(&self, id: usize) -> Option<&FlowEdge> {
        self.edges.get(id)
    }

    /// Tail node of an edge
    pub fn tail(&self, id: usize) -> Option<usize> {
        self.edges.get(id ^ 1).map(|reverse| reverse.to)
    }

    /// Ids of the edges leaving a node, in insertion order
    pub fn outgoing(&self, node: usize) -> &[usize] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Flow currently carried by a forward edge
    pub fn flow(&self, id: usize) -> usize {
        self.edges.get(id ^ 1).map_or(0, |reverse| reverse.capacity)
    }

    /// Move `amount` units of capacity from an edge onto its reverse
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the network unchanged, if the edge does not
    /// exist or lacks the capacity
    pub fn push(&mut self, id: usize, amount: usize) -> Result<()> {
        let Some(edge) = self.edges.get_mut(id) else {
            return Err(computation_error("flow network", &format!("no edge {id}")));
        };
        if edge.capacity < amount {
            return Err(computation_error(
                "flow network",
                &format!("edge {id} has {} of {amount} units left", edge.capacity),
            ));
        }
        edge.capacity -= amount;
        if let Some(reverse) = self.edges.get_mut(id ^ 1) {
            reverse.capacity += amount;
        }
        Ok(())
    }
}

/// Node numbering of a transportation network
///
/// Nodes are ordered source, variants, cells, sink, so lower node indices
/// correspond to lower variant and cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportLayout {
    /// Number of variant nodes
    pub variants: usize,
    /// Number of cell nodes
    pub cells: usize,
}

impl TransportLayout {
    /// Source node
    pub const fn source(&self) -> usize {
        0
    }

    /// Node of a variant
    pub const fn variant_node(&self, variant: usize) -> usize {
        1 + variant
    }

    /// Node of a cell
    pub const fn cell_node(&self, cell: usize) -> usize {
        1 + self.variants + cell
    }

    /// Sink node
    pub const fn sink(&self) -> usize {
        1 + self.variants + self.cells
    }

    /// Total number of nodes
    pub const fn node_count(&self) -> usize {
        2 + self.variants + self.cells
    }

    /// Variant index of a node, if it is a variant node
    pub const fn variant_of_node(&self, node: usize) -> Option<usize> {
        if node >= 1 && node <= self.variants {
            Some(node - 1)
        } else {
            None
        }
    }
}

/// Build the transportation network for a cost matrix and demand vector
///
/// Source to variant edges carry the variant's demand at zero cost, every
/// variant connects to every cell with capacity one at the matrix cost, and
/// every cell connects to the sink with capacity one at zero cost.
///
/// # Errors
///
/// Returns an error if the demand lists more variants than the matrix has
pub fn build_transport_network(
    cost: &CostMatrix,
    demand: &DemandVector,
) -> Result<(FlowNetwork, TransportLayout)> {
    let layout = TransportLayout {
        variants: cost.variant_count(),
        cells: cost.cell_count(),
    };
    let mut network = FlowNetwork::new(layout.node_count());

    for (variant, &supply) in demand.as_slice().iter().enumerate() {
        network.add_edge(layout.source(), layout.variant_node(variant), supply, 0.0)?;
    }

    let costs = cost.as_array();
    for variant in 0..layout.variants {
        for (cell, &edge_cost) in costs.column(variant).iter().enumerate() {
            network.add_edge(
                layout.variant_node(variant),
                layout.cell_node(cell),
                1,
                edge_cost,
            )?;
        }
    }

    for cell in 0..layout.cells {
        network.add_edge(layout.cell_node(cell), layout.sink(), 1, 0.0)?;
    }

    Ok((network, layout))
}
