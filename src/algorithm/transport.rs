//! Exact transportation solver by successive shortest augmenting paths
//!
//! The assignment of cells to piece variants is solved as a minimum-cost
//! flow on a bipartite network (see [`build_transport_network`]). Each
//! augmentation routes one more cell to a variant along the cheapest
//! residual path, found by Dijkstra over reduced costs. Node potentials are
//! raised by the search distances after every augmentation so that reduced
//! costs stay non-negative and the next search remains valid.
//!
//! Between equal-cost paths the search prefers lower node indices, so ties
//! resolve towards the lowest-indexed variant and cell and repeated solves of
//! the same matrix return the same assignment.

use crate::algorithm::assignment::Assignment;
use crate::algorithm::network::{FlowNetwork, TransportLayout, build_transport_network};
use crate::algorithm::shortest_path::PathSearch;
use crate::analysis::cost::CostMatrix;
use crate::analysis::demand::DemandVector;
use crate::io::error::{MosaicError, Result, computation_error, infeasible};
use crate::pieces::variant::PieceVariant;
use crate::spatial::grid::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receives solver progress once per augmentation
pub trait SolveProgress {
    /// Called before the first augmentation
    fn on_start(&self, _total: usize) {}

    /// Called after each augmentation with the number of cells routed so far
    fn on_augmentation(&self, completed: usize, total: usize);

    /// Called once every cell is routed
    fn on_finish(&self) {}
}

/// Progress sink that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl SolveProgress for NoProgress {
    fn on_augmentation(&self, _completed: usize, _total: usize) {}
}

/// Shared flag a caller sets to stop a running solve
///
/// The solver checks the flag once per augmentation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create an unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Minimum-cost assignment of cells to variants under exact demand
#[derive(Debug, Clone, Default)]
pub struct TransportationSolver {
    cancellation: Option<CancellationToken>,
}

impl TransportationSolver {
    /// Create a solver without cancellation
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Solve for the cheapest assignment using each variant exactly its demand
    ///
    /// # Errors
    ///
    /// Returns an infeasibility error if the demand length differs from the
    /// matrix width or the demand total differs from the cell count
    pub fn solve(&self, cost: &CostMatrix, demand: &DemandVector) -> Result<Assignment> {
        self.solve_with_progress(cost, demand, &NoProgress)
    }

    /// Build the cost matrix and demand from cell and variant records, then solve
    ///
    /// # Errors
    ///
    /// Returns an error if any brightness is invalid or supply and demand differ
    pub fn solve_mosaic(&self, cells: &[Cell], variants: &[PieceVariant]) -> Result<Assignment> {
        let demand = DemandVector::new(variants.iter().map(|v| v.demand).collect());
        check_balance(cells.len(), variants.len(), &demand)?;
        let cost = CostMatrix::build(cells, variants)?;
        self.solve(&cost, &demand)
    }

    /// Solve, reporting each augmentation to `progress`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The demand length differs from the number of variants
    /// - The demand total differs from the number of cells
    /// - The cancellation token is set before the solve completes
    pub fn solve_with_progress(
        &self,
        cost: &CostMatrix,
        demand: &DemandVector,
        progress: &dyn SolveProgress,
    ) -> Result<Assignment> {
        check_balance(cost.cell_count(), cost.variant_count(), demand)?;

        let total = cost.cell_count();
        tracing::debug!(
            cells = total,
            variants = cost.variant_count(),
            "Starting transportation solve"
        );

        let (mut network, layout) = build_transport_network(cost, demand)?;
        let mut potentials = vec![0.0; layout.node_count()];
        let mut search = PathSearch::new(layout.node_count());
        let source = layout.source();
        let sink = layout.sink();

        progress.on_start(total);
        let mut routed = 0;
        while routed < total {
            if self.is_cancelled() {
                return Err(MosaicError::Cancelled {
                    completed: routed,
                    total,
                });
            }

            let sink_distance = search.run(&network, &potentials, source, sink).ok_or_else(|| {
                computation_error(
                    "transportation solve",
                    &format!("no augmenting path after routing {routed} of {total} cells"),
                )
            })?;
            search.update_potentials(&mut potentials, sink_distance);

            let path = search.path_to(&network, sink);
            let bottleneck = path
                .iter()
                .filter_map(|&edge_id| network.edge(edge_id).map(|edge| edge.capacity))
                .min()
                .unwrap_or(0)
                .min(total - routed);
            if bottleneck == 0 {
                return Err(computation_error(
                    "transportation solve",
                    &"augmenting path has no residual capacity",
                ));
            }
            for &edge_id in &path {
                network.push(edge_id, bottleneck)?;
            }

            routed += bottleneck;
            progress.on_augmentation(routed, total);
        }
        progress.on_finish();

        let variants = extract_assignment(&network, layout)?;
        let assignment = Assignment::new(variants, cost)?;
        tracing::info!(
            cells = total,
            total_cost = assignment.total_cost(),
            "Solved transportation problem"
        );
        Ok(assignment)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

fn check_balance(cells: usize, variants: usize, demand: &DemandVector) -> Result<()> {
    if demand.len() != variants {
        return Err(infeasible(&format!(
            "demand lists {} variants but there are {variants}",
            demand.len()
        )));
    }
    let supply = demand
        .total()
        .ok_or_else(|| infeasible(&format!("total demand overflows for {cells} cells")))?;
    if supply != cells {
        return Err(infeasible(&format!(
            "total demand {supply} does not equal the {cells} cells"
        )));
    }
    Ok(())
}

// Each cell's assigned variant is the variant whose edge into the cell carries flow
fn extract_assignment(
    network: &FlowNetwork,
    layout: TransportLayout,
) -> Result<Vec<usize>> {
    (0..layout.cells)
        .map(|cell| {
            let node = layout.cell_node(cell);
            network
                .outgoing(node)
                .iter()
                .filter(|&&edge_id| edge_id % 2 == 1)
                .find_map(|&edge_id| {
                    let edge = network.edge(edge_id)?;
                    let variant = layout.variant_of_node(edge.to)?;
                    (edge.capacity > 0).then_some(variant)
                })
                .ok_or_else(|| {
                    computation_error(
                        "assignment extraction",
                        &format!("cell {cell} received no flow"),
                    )
                })
        })
        .collect()
}
