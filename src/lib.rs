//! `mzpick` finds peaks in profile mass spectra and ranks them by height.
//!
//! The signal is smoothed with a Gaussian kernel, a robust noise scale is
//! estimated from the median absolute deviation, and every strict local
//! maximum whose smoothed height clears `signal_to_noise_threshold * noise`
//! becomes a [`Peak`]. Each peak carries the index window where the signal
//! falls to a fraction of its height and a signal-to-noise score.
//!
//! Use [`PeakPicker`] to configure the pipeline, or [`pick_peaks`] for the
//! default settings.
//!
//! # Usage
//! ```
//! use mzpick::{PeakPicker, WidthPolicy};
//!
//! let mz_array: Vec<f64> = (0..200).map(|i| 500.0 + i as f64 * 0.01).collect();
//! let intensity_array: Vec<f64> = mz_array
//!     .iter()
//!     .map(|mz| 5.0 + 1000.0 * (-(mz - 501.0f64).powi(2) / (2.0 * 0.02f64.powi(2))).exp())
//!     .collect();
//!
//! let picker = PeakPicker::builder()
//!     .signal_to_noise_threshold(5.0)
//!     .width_policy(WidthPolicy::Threshold)
//!     .max_peaks(Some(10))
//!     .build()
//!     .unwrap();
//! let peaks = picker.pick(&mz_array, &intensity_array).unwrap();
//! assert!(!peaks.is_empty());
//! assert!((peaks[0].mz - 501.0).abs() < 0.01);
//! for peak in peaks.iter() {
//!     println!("{}", peak);
//! }
//! ```
//!
//! The [`text`] module reads two column signals and writes peak tables. With the
//! `plot` feature, [`plot`] renders a spectrum with its peaks annotated.
pub mod arrayops;
pub mod noise;
pub mod peak;
pub mod peak_picker;
pub mod peak_statistics;
pub mod smooth;
pub mod text;

#[cfg(feature = "plot")]
pub mod plot;

#[cfg(test)]
mod test_data;

pub use crate::noise::estimate_noise;
pub use crate::peak::Peak;
pub use crate::peak_picker::{
    pick_peaks, PeakPicker, PeakPickerBuilder, PeakPickerError, PickedSignal,
};
pub use crate::peak_statistics::{
    find_local_maxima, resolve_width, SignalToNoiseMode, WidthBounds, WidthPolicy,
};
pub use crate::smooth::{gaussian_smooth, EdgeMode};
