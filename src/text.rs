//! Reading signals from delimited text and writing peak tables.
use std::fs;
use std::io;
use std::io::prelude::*;
use std::path;

use log::debug;
use thiserror::Error;

use crate::peak::Peak;

/// Failures reading a signal from a text source
#[derive(Debug, Error)]
pub enum SourceReadError {
    #[error("An IO error occurred: {0}")]
    Io(#[from] io::Error),
    #[error("Could not parse {value:?} as a number on line {line}")]
    Parse { line: usize, value: String },
    #[error("Expected 2 columns on line {line}, found {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("No data rows were found")]
    Empty,
}

/// Failures writing a peak table
#[derive(Debug, Error)]
pub enum PeakTableWriteError {
    #[error("An IO error occurred: {0}")]
    Io(#[from] io::Error),
    #[error("A CSV error occurred: {0}")]
    Csv(#[from] csv::Error),
}

fn parse_value(token: &str, line: usize) -> Result<f64, SourceReadError> {
    token.parse::<f64>().map_err(|_| SourceReadError::Parse {
        line,
        value: token.to_string(),
    })
}

/// Read a two column signal from `reader`, skipping the first line as a header.
///
/// Columns may be separated by any mix of whitespace, commas and semicolons.
/// Blank lines are ignored.
pub fn read_signal<R: BufRead>(reader: R) -> Result<(Vec<f64>, Vec<f64>), SourceReadError> {
    let mut mz_array = Vec::new();
    let mut intensity_array = Vec::new();
    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line_number = i + 1;
        let tokens: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 2 {
            return Err(SourceReadError::ColumnCount {
                line: line_number,
                found: tokens.len(),
            });
        }
        mz_array.push(parse_value(tokens[0], line_number)?);
        intensity_array.push(parse_value(tokens[1], line_number)?);
    }
    if mz_array.is_empty() {
        return Err(SourceReadError::Empty);
    }
    Ok((mz_array, intensity_array))
}

/// Read a two column signal from the file at `path`, see [`read_signal`]
pub fn load_signal<P: AsRef<path::Path>>(path: P) -> Result<(Vec<f64>, Vec<f64>), SourceReadError> {
    let path = path.as_ref();
    let reader = io::BufReader::new(fs::File::open(path)?);
    let arrays = read_signal(reader)?;
    debug!("Read {} points from {}", arrays.0.len(), path.display());
    Ok(arrays)
}

/// Which columns of a [`Peak`] are written to a peak table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PeakColumns {
    /// `mz,intensity,width,snr`
    #[default]
    Basic,
    /// The basic columns followed by `index,left_index,right_index,width_points`
    Extended,
}

impl PeakColumns {
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => &["mz", "intensity", "width", "snr"],
            Self::Extended => &[
                "mz",
                "intensity",
                "width",
                "snr",
                "index",
                "left_index",
                "right_index",
                "width_points",
            ],
        }
    }

    fn record(&self, peak: &Peak) -> Vec<String> {
        let mut record = vec![
            format!("{:.6}", peak.mz),
            format!("{:.2}", peak.intensity),
            format!("{:.6}", peak.width),
            format!("{:.2}", peak.signal_to_noise),
        ];
        if let Self::Extended = self {
            record.extend([
                peak.index.to_string(),
                peak.left_index.to_string(),
                peak.right_index.to_string(),
                peak.width_points.to_string(),
            ]);
        }
        record
    }
}

/// Write `peaks` as a comma separated table with a header row
pub fn write_peaks_table<'a, W: io::Write, I: IntoIterator<Item = &'a Peak>>(
    peaks: I,
    writer: W,
    columns: PeakColumns,
) -> Result<(), PeakTableWriteError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(columns.header())?;
    for peak in peaks {
        writer.write_record(columns.record(peak))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `peaks` to the file at `path`, see [`write_peaks_table`]
pub fn peaks_to_file<'a, P: AsRef<path::Path>, I: IntoIterator<Item = &'a Peak>>(
    peaks: I,
    path: P,
    columns: PeakColumns,
) -> Result<(), PeakTableWriteError> {
    let file = fs::File::create(path)?;
    write_peaks_table(peaks, io::BufWriter::new(file), columns)
}
