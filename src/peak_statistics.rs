//! Per-peak measurements on a smoothed signal: apex detection, width windows
//! and signal-to-noise scores.
use std::str::FromStr;

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::noise::NOISE_FLOOR;

/// Find the strict interior local maxima of `values`, in ascending order.
///
/// An index `i` qualifies when `values[i] > values[i - 1]` and `values[i] > values[i + 1]`.
/// The first and last samples never qualify. Flat-topped maxima, where two or
/// more adjacent samples share the highest value, produce no candidate at all.
pub fn find_local_maxima<F: PartialOrd>(values: &[F]) -> Vec<usize> {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2])
        .map(|(i, _)| i + 1)
        .collect()
}

/// How the width window is walked outward from an apex
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidthPolicy {
    /// Step outward while the current sample is above the threshold
    Threshold,
    /// Step outward while the current sample is above the threshold and the
    /// next sample is no higher than the current one. A shoulder that starts
    /// rising again stops the walk, so neighboring peaks are not absorbed.
    #[default]
    Monotonic,
}

impl FromStr for WidthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "threshold" => Ok(Self::Threshold),
            "monotonic" => Ok(Self::Monotonic),
            other => Err(format!(
                "Unknown width policy {other:?}, expected threshold or monotonic"
            )),
        }
    }
}

/// The inclusive index window around a peak apex
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WidthBounds {
    pub left: usize,
    pub right: usize,
}

impl WidthBounds {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// The number of samples in the window, never less than 1
    pub fn width_points(&self) -> usize {
        (self.right + 1).saturating_sub(self.left).max(1)
    }

    /// The distance between the two shoulders along `positions`
    pub fn width<F: Float>(&self, positions: &[F]) -> F {
        positions[self.right] - positions[self.left]
    }
}

/// Walk outward from `index` until the signal falls to `values[index] * fraction`.
///
/// The shoulder samples where each walk stops are included in the window. Walks
/// always stop at the ends of the array.
pub fn resolve_width<F: Float>(
    values: &[F],
    index: usize,
    fraction: F,
    policy: WidthPolicy,
) -> WidthBounds {
    let threshold = values[index] * fraction;
    let last = values.len() - 1;

    let mut left = index;
    let mut right = index;
    match policy {
        WidthPolicy::Threshold => {
            while left > 0 && values[left] > threshold {
                left -= 1;
            }
            while right < last && values[right] > threshold {
                right += 1;
            }
        }
        WidthPolicy::Monotonic => {
            while left > 0 && values[left] > threshold && values[left - 1] <= values[left] {
                left -= 1;
            }
            while right < last && values[right] > threshold && values[right + 1] <= values[right] {
                right += 1;
            }
        }
    }
    WidthBounds::new(left, right)
}

/// How a peak's reported signal-to-noise ratio is computed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignalToNoiseMode {
    /// The apex height above the mean of its two shoulders, over the noise.
    /// Broad low-contrast bumps score lower than sharp peaks of equal height.
    #[default]
    ShoulderAdjusted,
    /// The apex height over the noise
    Height,
}

impl FromStr for SignalToNoiseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "shoulder-adjusted" | "shoulder" => Ok(Self::ShoulderAdjusted),
            "height" => Ok(Self::Height),
            other => Err(format!(
                "Unknown signal-to-noise mode {other:?}, expected shoulder-adjusted or height"
            )),
        }
    }
}

/// Score the peak at `index` whose width window is `bounds` against `noise`
pub fn signal_to_noise<F: Float>(
    values: &[F],
    index: usize,
    bounds: &WidthBounds,
    noise: F,
    mode: SignalToNoiseMode,
) -> F {
    let denominator = noise + F::from(NOISE_FLOOR).unwrap();
    match mode {
        SignalToNoiseMode::ShoulderAdjusted => {
            let half = F::from(0.5).unwrap();
            let shoulders = half * (values[bounds.left] + values[bounds.right]);
            (values[index] - shoulders) / denominator
        }
        SignalToNoiseMode::Height => values[index] / denominator,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_local_maxima() {
        let values = [0.0, 1.0, 0.5, 0.5, 2.0, 1.0, 3.0];
        assert_eq!(find_local_maxima(&values), vec![1, 4]);
    }

    #[test]
    fn test_local_maxima_plateau_ignored() {
        let values = [0.0, 2.0, 2.0, 0.0, 1.0, 3.0, 3.0, 3.0, 1.0];
        assert!(find_local_maxima(&values).is_empty());
    }

    #[rstest]
    #[case(vec![1.0, 2.0, 3.0, 4.0, 5.0])]
    #[case(vec![5.0, 4.0, 3.0, 2.0, 1.0])]
    #[case(vec![1.0, 2.0])]
    #[case(vec![])]
    fn test_local_maxima_none(#[case] values: Vec<f64>) {
        assert!(find_local_maxima(&values).is_empty());
    }

    #[test]
    fn test_width_threshold() {
        let values = [0.0, 1.0, 4.0, 10.0, 6.0, 5.5, 2.0, 0.0];
        let bounds = resolve_width(&values, 3, 0.5, WidthPolicy::Threshold);
        assert_eq!(bounds, WidthBounds::new(2, 6));
        assert_eq!(bounds.width_points(), 5);
    }

    #[test]
    fn test_width_monotonic_stops_on_rising_shoulder() {
        // The right side rises again at index 5 before crossing half height
        let values = [0.0, 2.0, 7.0, 10.0, 6.0, 8.0, 2.0, 0.0];
        let threshold = resolve_width(&values, 3, 0.5, WidthPolicy::Threshold);
        let monotonic = resolve_width(&values, 3, 0.5, WidthPolicy::Monotonic);
        assert_eq!(threshold, WidthBounds::new(1, 6));
        assert_eq!(monotonic, WidthBounds::new(1, 4));
    }

    #[test]
    fn test_width_stops_at_array_ends() {
        let values = [9.0, 9.5, 10.0, 9.5, 9.0];
        for policy in [WidthPolicy::Threshold, WidthPolicy::Monotonic] {
            let bounds = resolve_width(&values, 2, 0.5, policy);
            assert_eq!(bounds, WidthBounds::new(0, 4));
            assert_eq!(bounds.width(&[1.0, 2.0, 3.0, 4.0, 5.5]), 4.5);
        }
    }

    #[test]
    fn test_width_points_floor() {
        assert_eq!(WidthBounds::new(3, 3).width_points(), 1);
    }

    #[test]
    fn test_signal_to_noise() {
        let values = [0.0, 2.0, 10.0, 4.0, 0.0];
        let bounds = WidthBounds::new(1, 3);
        let snr = signal_to_noise(&values, 2, &bounds, 2.0, SignalToNoiseMode::ShoulderAdjusted);
        assert!((snr - 3.5).abs() < 1e-9);
        let snr = signal_to_noise(&values, 2, &bounds, 2.0, SignalToNoiseMode::Height);
        assert!((snr - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Threshold".parse::<WidthPolicy>().unwrap(), WidthPolicy::Threshold);
        assert_eq!(
            "shoulder_adjusted".parse::<SignalToNoiseMode>().unwrap(),
            SignalToNoiseMode::ShoulderAdjusted
        );
        assert!("fwhm".parse::<WidthPolicy>().is_err());
    }
}
