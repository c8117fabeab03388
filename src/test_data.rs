//! Synthetic profile spectra for tests
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Poisson};

/// The centers of the synthetic peaks
pub const PEAK_CENTERS: [f64; 3] = [600.0, 900.0, 1200.0];
/// The heights of the synthetic peaks, paired with [`PEAK_CENTERS`]
pub const PEAK_HEIGHTS: [f64; 3] = [2e4, 3e4, 1.5e4];

pub const FWHM: f64 = 0.02;
pub const NOISE_MEAN: f64 = 30.0;
pub const N_POINTS: usize = 20000;
pub const SEED: u64 = 1;

/// FWHM / sigma for a Gaussian
const FWHM_TO_SIGMA: f64 = 2.35482;

#[derive(Debug, Clone)]
pub struct SpectrumFixture {
    pub mz_array: Vec<f64>,
    pub intensity_array: Vec<f64>,
}

/// `n` points evenly spaced from `start` up to but excluding `end`
pub fn grid(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / n as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Sum Gaussian bumps of the given `(center, height)` and `fwhm` over `mz_array`
pub fn gaussian_signal(mz_array: &[f64], peaks: &[(f64, f64)], fwhm: f64) -> Vec<f64> {
    let sigma = fwhm / FWHM_TO_SIGMA;
    let two_sigma_sq = 2.0 * sigma * sigma;
    mz_array
        .iter()
        .map(|mz| {
            peaks
                .iter()
                .map(|(center, height)| height * (-(mz - center).powi(2) / two_sigma_sq).exp())
                .sum()
        })
        .collect()
}

/// Draw `n` Poisson counts with the given mean from a seeded generator
pub fn poisson_noise(n: usize, mean: f64, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Poisson::new(mean).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Three Gaussian peaks on a 0.1 m/z grid over `[0, 2000)` with Poisson background
pub fn synthetic_spectrum() -> SpectrumFixture {
    let mz_array = grid(0.0, 2000.0, N_POINTS);
    let peaks: Vec<(f64, f64)> = PEAK_CENTERS
        .iter()
        .copied()
        .zip(PEAK_HEIGHTS.iter().copied())
        .collect();
    let signal = gaussian_signal(&mz_array, &peaks, FWHM);
    let noise = poisson_noise(N_POINTS, NOISE_MEAN, SEED);
    let intensity_array = signal.iter().zip(noise.iter()).map(|(s, e)| s + e).collect();
    SpectrumFixture {
        mz_array,
        intensity_array,
    }
}
