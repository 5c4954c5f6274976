//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use piecemosaic::MosaicError;
    use piecemosaic::io::error::{
        BrightnessSubject, WithContext, computation_error, configuration_error, infeasible,
        invalid_parameter,
    };
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = MosaicError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(infeasible(&"x").source().is_none());
    }

    // Tests brightness errors name the cell or variant
    // Verified by omitting the subject from the message
    #[test]
    fn test_invalid_brightness_message() {
        let cell = MosaicError::InvalidBrightness {
            subject: BrightnessSubject::Cell { row: 2, col: 5 },
            value: 300.0,
        };
        assert!(cell.to_string().contains("cell (2, 5)"));
        assert!(cell.to_string().contains("300"));

        let variant = MosaicError::InvalidBrightness {
            subject: BrightnessSubject::Variant { index: 7 },
            value: f64::NAN,
        };
        assert!(variant.to_string().contains("variant 7"));

        let sample = MosaicError::InvalidBrightness {
            subject: BrightnessSubject::Sample { index: 4 },
            value: -1.0,
        };
        assert!(sample.to_string().contains("cell 4"));
    }

    // Tests configuration errors carry the rule and reason
    // Verified by omitting the rule from the message
    #[test]
    fn test_configuration_error() {
        let error = configuration_error(&"pawn=-1", &"multiplicity must not be negative");
        let message = error.to_string();
        assert!(message.contains("pawn=-1"));
        assert!(message.contains("negative"));
    }

    // Tests cancellation reports progress made
    // Verified by omitting the completed count
    #[test]
    fn test_cancelled_message() {
        let error = MosaicError::Cancelled {
            completed: 12,
            total: 40,
        };
        assert!(error.to_string().contains("12 of 40"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let message = invalid_parameter("tile_size", &0, &"must be positive").to_string();
        assert!(message.contains("tile_size"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
    }

    // Tests the operation name is replaced on computation errors only
    // Verified by replacing the operation on every variant
    #[test]
    fn test_with_operation() {
        let failing: Result<(), MosaicError> = Err(computation_error("inner", &"bad"));
        match failing.with_operation("outer") {
            Err(MosaicError::Computation { operation, .. }) => assert_eq!(operation, "outer"),
            other => panic!("unexpected {other:?}"),
        }

        let other: Result<(), MosaicError> = Err(infeasible(&"mismatch"));
        assert!(matches!(
            other.with_operation("outer"),
            Err(MosaicError::Infeasible { .. })
        ));
    }

    // Tests foreign errors convert into the crate error
    // Verified by removing the From implementations
    #[test]
    fn test_conversions() {
        let io: MosaicError = std::io::Error::other("disk").into();
        assert!(matches!(io, MosaicError::FileSystem { .. }));

        let shape = ndarray::Array2::<f64>::from_shape_vec((2, 2), vec![0.0]).unwrap_err();
        let converted: MosaicError = shape.into();
        assert!(matches!(converted, MosaicError::Computation { .. }));
    }
}
