//! Gaussian kernel smoothing of a 1D intensity array.
//!
//! The smoothed signal always has the same length as its source. Samples
//! whose kernel window hangs past either end of the array are computed
//! against an implicit extension of the signal selected with [`EdgeMode`].
use std::str::FromStr;

use cfg_if::cfg_if;
use num_traits::Float;
#[cfg(feature = "parallelism")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the signal is extended past its ends during convolution
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeMode {
    /// Mirror the signal about its first and last samples without repeating
    /// them, so `y[-1] == y[1]`
    #[default]
    Reflect,
    /// Treat everything outside the array as zero. Intensities within one
    /// kernel radius of either end are pulled down towards zero.
    Zero,
}

impl FromStr for EdgeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reflect" => Ok(Self::Reflect),
            "zero" => Ok(Self::Zero),
            other => Err(format!("Unknown edge mode {other:?}, expected reflect or zero")),
        }
    }
}

/// Build a normalized, symmetric Gaussian kernel with standard deviation `sigma`
/// measured in samples.
///
/// The kernel has radius `floor(3 * sigma)` and so `2 * radius + 1` weights which
/// sum to one. A non-positive `sigma` produces the unit kernel `[1]`.
pub fn gaussian_kernel<F: Float>(sigma: F) -> Vec<F> {
    if !(sigma > F::zero()) {
        return vec![F::one()];
    }
    let radius = (sigma * F::from(3.0).unwrap())
        .floor()
        .to_usize()
        .unwrap_or(0);
    let two_sigma_sq = F::from(2.0).unwrap() * sigma * sigma;

    let mut kernel: Vec<F> = (0..=2 * radius)
        .map(|i| {
            let j = F::from(i as isize - radius as isize).unwrap();
            (-(j * j) / two_sigma_sq).exp()
        })
        .collect();

    let total = kernel.iter().fold(F::zero(), |acc, w| acc + *w);
    kernel.iter_mut().for_each(|w| *w = *w / total);
    kernel
}

/// Map a possibly out-of-bounds index onto the array under [`EdgeMode::Reflect`]
#[inline]
fn reflect_index(index: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let k = index.rem_euclid(period);
    if k >= n as isize {
        (period - k) as usize
    } else {
        k as usize
    }
}

#[inline]
fn convolve_at<F: Float>(values: &[F], kernel: &[F], index: usize, edge: EdgeMode) -> F {
    let n = values.len();
    let radius = (kernel.len() / 2) as isize;
    let center = index as isize;
    kernel
        .iter()
        .enumerate()
        .fold(F::zero(), |acc, (offset, weight)| {
            let i = center + offset as isize - radius;
            let value = if i >= 0 && (i as usize) < n {
                values[i as usize]
            } else {
                match edge {
                    EdgeMode::Reflect => values[reflect_index(i, n)],
                    EdgeMode::Zero => F::zero(),
                }
            };
            acc + value * *weight
        })
}

/// Convolve `values` with `kernel`, producing an array of the same length.
///
/// `kernel` must have odd length and is applied centered on each sample.
pub fn convolve_same<F: Float + Send + Sync>(values: &[F], kernel: &[F], edge: EdgeMode) -> Vec<F> {
    if values.is_empty() {
        return Vec::new();
    }
    cfg_if! {
        if #[cfg(feature = "parallelism")] {
            return (0..values.len())
                .into_par_iter()
                .map(|i| convolve_at(values, kernel, i, edge))
                .collect();
        } else {
            return (0..values.len())
                .map(|i| convolve_at(values, kernel, i, edge))
                .collect();
        }
    }
}

/// Smooth `values` with a Gaussian kernel of width `sigma` samples.
///
/// When `sigma <= 0` the input is returned unchanged.
pub fn gaussian_smooth<F: Float + Send + Sync>(values: &[F], sigma: F, edge: EdgeMode) -> Vec<F> {
    if !(sigma > F::zero()) {
        return values.to_vec();
    }
    let kernel = gaussian_kernel(sigma);
    convolve_same(values, &kernel, edge)
}
