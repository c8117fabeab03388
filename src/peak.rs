use std::fmt;

use mzpeaks::peak::MZPoint;
use mzpeaks::CentroidPeak;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// A [`Peak`] is a local maximum of the smoothed signal that cleared the
/// signal-to-noise gate, along with the bounds of its width window.
///
/// Peaks are terminal result records. They are built once by
/// [`PeakPicker`](crate::PeakPicker) and never updated.
pub struct Peak {
    /// The m/z of the apex sample
    pub mz: f64,
    /// The smoothed intensity at the apex, the peak's height
    pub intensity: f64,
    /// The index of the apex in the source arrays
    pub index: usize,
    /// The left shoulder of the width window, inclusive
    pub left_index: usize,
    /// The right shoulder of the width window, inclusive
    pub right_index: usize,
    /// The number of samples spanned by the width window, at least 1
    pub width_points: usize,
    /// The m/z distance between the two shoulders
    pub width: f64,

    /// The apex height measured against the noise estimate, see
    /// [`SignalToNoiseMode`](crate::peak_statistics::SignalToNoiseMode)
    pub signal_to_noise: f64,
}

impl Peak {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mz: f64,
        intensity: f64,
        index: usize,
        left_index: usize,
        right_index: usize,
        width_points: usize,
        width: f64,
        signal_to_noise: f64,
    ) -> Self {
        Self {
            mz,
            intensity,
            index,
            left_index,
            right_index,
            width_points,
            width,
            signal_to_noise,
        }
    }

    /// Whether the width window brackets the apex
    pub fn contains_index(&self, index: usize) -> bool {
        self.left_index <= index && index <= self.right_index
    }
}

/// Conversion into a [`mzpeaks::CentroidPeak`], narrowing the intensity to `f32`
impl From<Peak> for CentroidPeak {
    fn from(peak: Peak) -> Self {
        CentroidPeak::new(peak.mz, peak.intensity as f32, peak.index as u32)
    }
}

impl From<Peak> for MZPoint {
    fn from(peak: Peak) -> Self {
        Self {
            mz: peak.mz,
            intensity: peak.intensity as f32,
        }
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Peak({}, {}, {}, [{}, {}], {}, {})",
            self.mz,
            self.intensity,
            self.index,
            self.left_index,
            self.right_index,
            self.width,
            self.signal_to_noise
        )
    }
}
