//! Solved mapping from cells to piece variants

use crate::analysis::cost::CostMatrix;
use crate::analysis::demand::DemandVector;
use crate::io::error::{Result, computation_error, infeasible};
use crate::math::ordered::ordered_sum;

/// One variant index per cell, with the total cost of the mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    variants: Vec<usize>,
    total_cost: f64,
}

impl Assignment {
    /// Price a per-cell variant list against a cost matrix
    ///
    /// The total is summed in cell order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list length differs from the matrix's cell
    /// count or a variant index is outside the matrix
    pub fn new(variants: Vec<usize>, cost: &CostMatrix) -> Result<Self> {
        if variants.len() != cost.cell_count() {
            return Err(computation_error(
                "assignment",
                &format!(
                    "{} cells assigned but the cost matrix has {}",
                    variants.len(),
                    cost.cell_count()
                ),
            ));
        }
        let costs = variants
            .iter()
            .enumerate()
            .map(|(cell, &variant)| {
                cost.get(cell, variant).ok_or_else(|| {
                    computation_error(
                        "assignment",
                        &format!("variant {variant} of cell {cell} is outside the cost matrix"),
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(Self {
            variants,
            total_cost: ordered_sum(costs),
        })
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether no cell is assigned
    pub const fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variant assigned to a cell
    pub fn variant_of(&self, cell: usize) -> Option<usize> {
        self.variants.get(cell).copied()
    }

    /// Variant indices in cell order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.variants.iter().copied()
    }

    /// Variant indices in cell order
    pub const fn as_slice(&self) -> &[usize] {
        self.variants.as_slice()
    }

    /// Sum of the costs of every (cell, assigned variant) pair
    pub const fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of cells assigned to each of `variant_count` variants
    pub fn counts(&self, variant_count: usize) -> Vec<usize> {
        let mut counts = vec![0; variant_count];
        for variant in self.iter() {
            if let Some(count) = counts.get_mut(variant) {
                *count += 1;
            }
        }
        counts
    }

    /// Check that every variant is used exactly its demanded number of times
    ///
    /// # Errors
    ///
    /// Returns an infeasibility error naming the first variant whose usage
    /// differs from its demand
    pub fn verify(&self, demand: &DemandVector) -> Result<()> {
        let counts = self.counts(demand.len());
        if counts.iter().sum::<usize>() != self.len() {
            return Err(infeasible(&"assignment references a variant without demand"));
        }
        for (variant, (&used, &required)) in counts.iter().zip(demand.as_slice()).enumerate() {
            if used != required {
                return Err(infeasible(&format!(
                    "variant {variant} used {used} times but {required} are required"
                )));
            }
        }
        Ok(())
    }
}
