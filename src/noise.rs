//! Robust global noise estimation using the median absolute deviation.
use num_traits::Float;

/// Added to the MAD before scaling so the estimate is never zero
pub const NOISE_FLOOR: f64 = 1e-12;

/// The MAD of a standard normal distribution, used to rescale the MAD into
/// a standard deviation estimate
pub const MAD_TO_SIGMA: f64 = 0.6745;

/// Compute the median of `values`, averaging the two middle values for
/// even-length input. Returns `None` for an empty slice.
pub fn median<F: Float>(values: &[F]) -> Option<F> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / F::from(2.0).unwrap())
    }
}

/// Compute the median absolute deviation of `values` about their median
pub fn median_absolute_deviation<F: Float>(values: &[F]) -> Option<F> {
    let center = median(values)?;
    let deviations: Vec<F> = values.iter().map(|v| (*v - center).abs()).collect();
    median(&deviations)
}

/// Estimate the noise scale of `values` as `(MAD + 1e-12) / 0.6745`.
///
/// Large peaks occupy few samples and barely move the median, so they do
/// not inflate the estimate. The result is strictly positive for any
/// input, including empty, constant, or all-zero arrays.
pub fn estimate_noise<F: Float>(values: &[F]) -> F {
    let mad = median_absolute_deviation(values).unwrap_or_else(F::zero);
    (mad + F::from(NOISE_FLOOR).unwrap()) / F::from(MAD_TO_SIGMA).unwrap()
}
