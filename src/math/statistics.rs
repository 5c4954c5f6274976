//! Intensity statistics over pixel samples

use num_traits::ToPrimitive;

/// Arithmetic mean of a sequence of samples
///
/// Returns `None` for an empty sequence or a sample that cannot be
/// represented as `f64`.
pub fn mean<'a, T, I>(samples: I) -> Option<f64>
where
    T: ToPrimitive + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for sample in samples {
        total += sample.to_f64()?;
        count += 1;
    }
    (count > 0).then(|| total / count as f64)
}

/// Squared difference between two brightness values
pub const fn squared_difference(a: f64, b: f64) -> f64 {
    let delta = a - b;
    delta * delta
}

/// Whether a brightness lies in the valid `[0, max]` domain
pub fn is_valid_brightness(value: f64, max: f64) -> bool {
    value.is_finite() && (0.0..=max).contains(&value)
}
