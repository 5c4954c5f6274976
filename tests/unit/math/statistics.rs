//! Tests for sample means, squared differences and brightness validation

#[cfg(test)]
mod tests {
    use piecemosaic::math::statistics::{is_valid_brightness, mean, squared_difference};

    // Tests mean of integer pixel samples
    // Verified by dividing by count minus one
    #[test]
    fn test_mean_of_pixels() {
        let pixels: Vec<u8> = vec![0, 255, 255, 0];
        assert_eq!(mean(&pixels), Some(127.5));
    }

    // Tests empty input has no mean
    // Verified by returning zero for empty input
    #[test]
    fn test_mean_of_empty_is_none() {
        let pixels: Vec<u8> = Vec::new();
        assert_eq!(mean(&pixels), None);
    }

    // Tests squared difference is symmetric and non-negative
    // Verified by returning the signed difference
    #[test]
    fn test_squared_difference() {
        assert_eq!(squared_difference(10.0, 4.0), 36.0);
        assert_eq!(squared_difference(4.0, 10.0), 36.0);
        assert_eq!(squared_difference(7.5, 7.5), 0.0);
    }

    // Tests the brightness domain boundaries
    // Verified by using an exclusive upper bound
    #[test]
    fn test_brightness_domain() {
        assert!(is_valid_brightness(0.0, 255.0));
        assert!(is_valid_brightness(255.0, 255.0));
        assert!(!is_valid_brightness(-0.5, 255.0));
        assert!(!is_valid_brightness(255.5, 255.0));
        assert!(!is_valid_brightness(f64::NAN, 255.0));
        assert!(!is_valid_brightness(f64::INFINITY, 255.0));
    }
}
