use std::path;

use plotters::prelude::*;

use crate::arrayops;
use crate::peak::Peak;

/// Render the signal as a line with a marker and m/z label on each peak apex
pub fn draw_peaks_svg<P>(
    mz_array: &[f64],
    intensity_array: &[f64],
    peaks: &[Peak],
    path: P,
) -> Result<(), Box<dyn std::error::Error>>
where
    P: AsRef<path::Path>,
{
    let backend = SVGBackend::new(&path, (1200, 400));
    draw_peaks(mz_array, intensity_array, peaks, backend)
}

pub fn draw_peaks<DB: DrawingBackend>(
    mz_array: &[f64],
    intensity_array: &[f64],
    peaks: &[Peak],
    backend: DB,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();

    let (xmin, xmax) = arrayops::minmax(mz_array);
    let (_ymin, ymax) = arrayops::minmax(intensity_array);
    let ymax = if ymax > 0.0 { ymax * 1.15 } else { 1.0 };

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Spectrum with peaks", ("sans-serif", 20).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(xmin..xmax, 0.0..ymax)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("m/z")
        .axis_desc_style(("sans-serif", 16).into_font())
        .y_desc("Intensity")
        .draw()?;

    let series = LineSeries::new(
        mz_array
            .iter()
            .copied()
            .zip(intensity_array.iter().copied()),
        ShapeStyle {
            color: BLACK.mix(1.0),
            filled: false,
            stroke_width: 1,
        },
    );
    chart.draw_series(series)?;

    chart.draw_series(
        peaks
            .iter()
            .map(|p| Circle::new((p.mz, p.intensity), 3, RED.filled())),
    )?;
    chart.draw_series(peaks.iter().map(|p| {
        Text::new(
            format!("{:.2}", p.mz),
            (p.mz, p.intensity * 1.05),
            ("sans-serif", 10).into_font(),
        )
    }))?;

    root.present()?;
    Ok(())
}
