//! Ranked peak picking over a smoothed 1D signal.
//!
//! The pipeline is a single forward pass:
//!
//! 1. Smooth the intensities with a Gaussian kernel ([`gaussian_smooth`])
//! 2. Estimate the global noise scale from the smoothed signal ([`estimate_noise`])
//! 3. Scan for strict local maxima ([`find_local_maxima`])
//! 4. Gate each maximum on `height > signal_to_noise_threshold * noise`, then walk out
//!    its width window ([`resolve_width`]) and score it ([`signal_to_noise`])
//! 5. Rank the accepted peaks by height and truncate to [`PeakPicker::max_peaks`]
//!
//! Flat-topped maxima are never reported, see [`find_local_maxima`].
use log::{debug, trace};

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arrayops::first_non_increasing;
use crate::noise::estimate_noise;
use crate::peak::Peak;
use crate::peak_statistics::{
    find_local_maxima, resolve_width, signal_to_noise, SignalToNoiseMode, WidthPolicy,
};
use crate::smooth::{gaussian_smooth, EdgeMode};

/// All the ways peak picking can fail.
///
/// Every variant describes malformed input or configuration and is raised
/// before any computation happens. Finding no peaks is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeakPickerError {
    #[error("The m/z and intensity arrays do not match in length ({0} != {1})")]
    MZIntensityMismatch(usize, usize),
    #[error("At least 3 points are required to pick peaks, received {0}")]
    TooFewPoints(usize),
    #[error("The m/z array is not strictly increasing at index {0}")]
    MZNotSorted(usize),
    #[error("The signal to noise threshold must be finite and non-negative, received {0}")]
    InvalidSignalToNoiseThreshold(f64),
    #[error("The smoothing width must be finite and non-negative, received {0}")]
    InvalidSmoothingWidth(f64),
    #[error("The width fraction must lie strictly between 0 and 1, received {0}")]
    InvalidWidthFraction(f64),
}

pub const DEFAULT_SIGNAL_TO_NOISE_THRESHOLD: f64 = 3.0;
pub const DEFAULT_SMOOTHING_WIDTH: f64 = 2.0;
pub const DEFAULT_WIDTH_FRACTION: f64 = 0.5;

/// A peak picker for profile mass spectra
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PeakPicker {
    /// A local maximum is accepted when its smoothed height exceeds this multiple
    /// of the noise estimate
    pub signal_to_noise_threshold: f64,
    /// The standard deviation of the Gaussian smoothing kernel, in samples. Zero
    /// disables smoothing.
    pub smoothing_width: f64,
    /// The fraction of the apex height at which the width window is measured
    pub width_fraction: f64,
    /// Keep only this many of the highest peaks
    pub max_peaks: Option<usize>,
    pub width_policy: WidthPolicy,
    pub signal_to_noise_mode: SignalToNoiseMode,
    pub edge_mode: EdgeMode,
}

impl Default for PeakPicker {
    fn default() -> Self {
        Self {
            signal_to_noise_threshold: DEFAULT_SIGNAL_TO_NOISE_THRESHOLD,
            smoothing_width: DEFAULT_SMOOTHING_WIDTH,
            width_fraction: DEFAULT_WIDTH_FRACTION,
            max_peaks: None,
            width_policy: WidthPolicy::default(),
            signal_to_noise_mode: SignalToNoiseMode::default(),
            edge_mode: EdgeMode::default(),
        }
    }
}

/// A builder for configuring [`PeakPicker`]
#[derive(Debug, Clone, Default)]
pub struct PeakPickerBuilder {
    picker: PeakPicker,
}

impl PeakPickerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal_to_noise_threshold(&mut self, signal_to_noise_threshold: f64) -> &mut Self {
        self.picker.signal_to_noise_threshold = signal_to_noise_threshold;
        self
    }

    pub fn smoothing_width(&mut self, smoothing_width: f64) -> &mut Self {
        self.picker.smoothing_width = smoothing_width;
        self
    }

    pub fn width_fraction(&mut self, width_fraction: f64) -> &mut Self {
        self.picker.width_fraction = width_fraction;
        self
    }

    pub fn max_peaks(&mut self, max_peaks: Option<usize>) -> &mut Self {
        self.picker.max_peaks = max_peaks;
        self
    }

    pub fn width_policy(&mut self, width_policy: WidthPolicy) -> &mut Self {
        self.picker.width_policy = width_policy;
        self
    }

    pub fn signal_to_noise_mode(&mut self, signal_to_noise_mode: SignalToNoiseMode) -> &mut Self {
        self.picker.signal_to_noise_mode = signal_to_noise_mode;
        self
    }

    pub fn edge_mode(&mut self, edge_mode: EdgeMode) -> &mut Self {
        self.picker.edge_mode = edge_mode;
        self
    }

    /// Validate the configuration and produce a [`PeakPicker`]
    pub fn build(&self) -> Result<PeakPicker, PeakPickerError> {
        self.picker.validate()?;
        Ok(self.picker.clone())
    }
}

/// The full output of one peak picking pass, including the intermediate
/// smoothed signal and noise estimate
#[derive(Debug, Clone, PartialEq)]
pub struct PickedSignal {
    /// The accepted peaks, ranked by descending height
    pub peaks: Vec<Peak>,
    /// The smoothed intensity array the peaks were measured on
    pub smoothed: Vec<f64>,
    /// The global noise estimate of `smoothed`
    pub noise: f64,
}

/// Check that `mz_array` and `intensity_array` describe a signal that can be picked
pub fn validate_signal(mz_array: &[f64], intensity_array: &[f64]) -> Result<(), PeakPickerError> {
    if mz_array.len() != intensity_array.len() {
        return Err(PeakPickerError::MZIntensityMismatch(
            mz_array.len(),
            intensity_array.len(),
        ));
    }
    if mz_array.len() < 3 {
        return Err(PeakPickerError::TooFewPoints(mz_array.len()));
    }
    if let Some(index) = first_non_increasing(mz_array) {
        return Err(PeakPickerError::MZNotSorted(index));
    }
    Ok(())
}

/// Sort `peaks` by descending intensity, breaking ties by ascending index, and keep
/// at most `max_peaks` of them.
pub fn rank_peaks(peaks: &mut Vec<Peak>, max_peaks: Option<usize>) {
    peaks.sort_by(|a, b| {
        b.intensity
            .total_cmp(&a.intensity)
            .then_with(|| a.index.cmp(&b.index))
    });
    if let Some(k) = max_peaks {
        peaks.truncate(k);
    }
}

impl PeakPicker {
    /// Create a new peak picker with the default width and scoring policies
    pub fn new(
        signal_to_noise_threshold: f64,
        smoothing_width: f64,
        width_fraction: f64,
        max_peaks: Option<usize>,
    ) -> Self {
        Self {
            signal_to_noise_threshold,
            smoothing_width,
            width_fraction,
            max_peaks,
            ..Self::default()
        }
    }

    pub fn builder() -> PeakPickerBuilder {
        PeakPickerBuilder::new()
    }

    /// Check the configured parameters without looking at any signal
    pub fn validate(&self) -> Result<(), PeakPickerError> {
        let snr = self.signal_to_noise_threshold;
        if !(snr.is_finite() && snr >= 0.0) {
            return Err(PeakPickerError::InvalidSignalToNoiseThreshold(snr));
        }
        let sigma = self.smoothing_width;
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(PeakPickerError::InvalidSmoothingWidth(sigma));
        }
        let fraction = self.width_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(PeakPickerError::InvalidWidthFraction(fraction));
        }
        Ok(())
    }

    /// Pick peaks from `mz_array` and `intensity_array`, returning them ranked by height
    pub fn pick(
        &self,
        mz_array: &[f64],
        intensity_array: &[f64],
    ) -> Result<Vec<Peak>, PeakPickerError> {
        self.discover_peaks_with_trace(mz_array, intensity_array)
            .map(|picked| picked.peaks)
    }

    /// Pick peaks from `mz_array` and `intensity_array`, pushing new peaks into `peak_accumulator`
    /// in ranked order.
    ///
    /// Returns the number of peaks picked if successful.
    pub fn discover_peaks(
        &self,
        mz_array: &[f64],
        intensity_array: &[f64],
        peak_accumulator: &mut Vec<Peak>,
    ) -> Result<usize, PeakPickerError> {
        let picked = self.discover_peaks_with_trace(mz_array, intensity_array)?;
        let count = picked.peaks.len();
        peak_accumulator.extend(picked.peaks);
        Ok(count)
    }

    /// Pick peaks like [`PeakPicker::pick`], also returning the smoothed signal and
    /// noise estimate that the peaks were measured against.
    pub fn discover_peaks_with_trace(
        &self,
        mz_array: &[f64],
        intensity_array: &[f64],
    ) -> Result<PickedSignal, PeakPickerError> {
        self.validate()?;
        validate_signal(mz_array, intensity_array)?;

        let smoothed = gaussian_smooth(intensity_array, self.smoothing_width, self.edge_mode);
        let noise = estimate_noise(&smoothed);
        let peaks = self.peaks_from_smoothed(mz_array, &smoothed, noise);
        Ok(PickedSignal {
            peaks,
            smoothed,
            noise,
        })
    }

    fn peaks_from_smoothed(&self, mz_array: &[f64], smoothed: &[f64], noise: f64) -> Vec<Peak> {
        let height_threshold = (self.signal_to_noise_threshold * noise).max(0.0);
        let candidates = find_local_maxima(smoothed);
        debug!(
            "Found {} local maxima over {} points, noise {:0.4}, height threshold {:0.4}",
            candidates.len(),
            smoothed.len(),
            noise,
            height_threshold
        );
        let n_candidates = candidates.len();

        let mut peaks: Vec<Peak> = candidates
            .into_iter()
            .filter_map(|index| {
                let height = smoothed[index];
                if !(height > height_threshold) {
                    trace!(
                        "Rejecting maximum at {} ({:0.4}) with height {:0.4}",
                        index,
                        mz_array[index],
                        height
                    );
                    return None;
                }
                let bounds = resolve_width(smoothed, index, self.width_fraction, self.width_policy);
                let snr =
                    signal_to_noise(smoothed, index, &bounds, noise, self.signal_to_noise_mode);
                Some(Peak::new(
                    mz_array[index],
                    height,
                    index,
                    bounds.left,
                    bounds.right,
                    bounds.width_points(),
                    bounds.width(mz_array),
                    snr,
                ))
            })
            .collect();

        debug!("Accepted {} of {} maxima", peaks.len(), n_candidates);
        rank_peaks(&mut peaks, self.max_peaks);
        peaks
    }
}

/// A convenience function that uses a default peak picking configuration to pick peaks from paired
/// m/z and intensity arrays.
pub fn pick_peaks(mz_array: &[f64], intensity_array: &[f64]) -> Result<Vec<Peak>, PeakPickerError> {
    PeakPicker::default().pick(mz_array, intensity_array)
}
