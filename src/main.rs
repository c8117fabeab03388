use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use mzpick::peak_picker::{
    DEFAULT_SIGNAL_TO_NOISE_THRESHOLD, DEFAULT_SMOOTHING_WIDTH, DEFAULT_WIDTH_FRACTION,
};
use mzpick::text::{self, PeakColumns};
use mzpick::{EdgeMode, Peak, PeakPicker, SignalToNoiseMode, WidthPolicy};

#[derive(Parser, Debug)]
#[command(name = "mzpick")]
#[command(about = "Pick and rank peaks in a two column profile spectrum", long_about = None)]
struct Args {
    /// Input file with an m/z and an intensity column, preceded by one header line
    input: PathBuf,

    /// Write the peak table here instead of to stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Minimum smoothed height, as a multiple of the noise estimate
    #[arg(long, default_value_t = DEFAULT_SIGNAL_TO_NOISE_THRESHOLD)]
    min_snr: f64,

    /// Gaussian smoothing width in samples, 0 disables smoothing
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_WIDTH)]
    smooth_sigma: f64,

    /// Fraction of the apex height at which peak width is measured
    #[arg(long, default_value_t = DEFAULT_WIDTH_FRACTION)]
    width_fraction: f64,

    /// Report at most this many of the highest peaks
    #[arg(long)]
    max_peaks: Option<usize>,

    /// Width window walk: threshold, monotonic
    #[arg(long, default_value = "monotonic")]
    width_policy: WidthPolicy,

    /// Signal to noise score: shoulder-adjusted, height
    #[arg(long, default_value = "shoulder-adjusted")]
    snr_mode: SignalToNoiseMode,

    /// Signal extension at the array ends while smoothing: reflect, zero
    #[arg(long, default_value = "reflect")]
    edge_mode: EdgeMode,

    /// Include the index columns in the peak table
    #[arg(long)]
    extended: bool,

    /// Render the spectrum with its peaks to this SVG file (requires the `plot` feature)
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let picker = PeakPicker::builder()
        .signal_to_noise_threshold(args.min_snr)
        .smoothing_width(args.smooth_sigma)
        .width_fraction(args.width_fraction)
        .max_peaks(args.max_peaks)
        .width_policy(args.width_policy)
        .signal_to_noise_mode(args.snr_mode)
        .edge_mode(args.edge_mode)
        .build()?;

    let (mz_array, intensity_array) = text::load_signal(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let start = Instant::now();
    let peaks = picker.pick(&mz_array, &intensity_array)?;
    info!(
        "Picked {} peaks from {} points in {} ms",
        peaks.len(),
        mz_array.len(),
        (Instant::now() - start).as_millis()
    );

    let columns = if args.extended {
        PeakColumns::Extended
    } else {
        PeakColumns::Basic
    };
    match &args.output {
        Some(path) => text::peaks_to_file(&peaks, path, columns)
            .with_context(|| format!("writing {}", path.display()))?,
        None => text::write_peaks_table(&peaks, io::stdout().lock(), columns)?,
    }

    if let Some(path) = &args.plot {
        render_plot(&mz_array, &intensity_array, &peaks, path)?;
    }

    Ok(())
}

#[cfg(feature = "plot")]
fn render_plot(
    mz_array: &[f64],
    intensity_array: &[f64],
    peaks: &[Peak],
    path: &Path,
) -> anyhow::Result<()> {
    mzpick::plot::draw_peaks_svg(mz_array, intensity_array, peaks, path)
        .map_err(|e| anyhow::anyhow!("rendering {}: {e}", path.display()))?;
    info!("Wrote plot to {}", path.display());
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn render_plot(
    _mz_array: &[f64],
    _intensity_array: &[f64],
    _peaks: &[Peak],
    path: &Path,
) -> anyhow::Result<()> {
    warn!(
        "Skipping plot {}, mzpick was built without the plot feature",
        path.display()
    );
    Ok(())
}
