//! Measurement CSV parser
//!
//! Layout, one spectral sample per row:
//!
//! ```text
//! frequency(Hz), ε′, ε″, μ′, μ″
//! ```
//!
//! Fields are separated by `,` or tab. When the first line contains
//! `Label`, it and the line after it are header lines. Any remaining row
//! that does not hold five numbers is skipped.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use thiserror::Error;

use crate::constants::HZ_PER_GHZ;
use crate::error::RlError;
use crate::frequency::{Frequency, FrequencyUnit};
use crate::material::MaterialSpectrum;

/// Measurement file errors
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File path must include an extension: {0}")]
    MissingExtension(String),

    #[error("No data rows found in {0}")]
    NoData(String),

    #[error(transparent)]
    Spectrum(#[from] RlError),
}

/// Header marker that flags a two-line header block
const HEADER_MARKER: &str = "Label";

/// Number of numeric columns in a data row
const NCOLUMNS: usize = 5;

/// Parsed measurement columns
#[derive(Debug, Clone, Default)]
pub struct MeasurementCsv {
    /// Label of the sample, the file stem when read from disk
    pub name: String,
    /// Frequency in Hz
    pub frequency_hz: Vec<f64>,
    pub e1: Vec<f64>,
    pub e2: Vec<f64>,
    pub u1: Vec<f64>,
    pub u2: Vec<f64>,
    /// Rows that were not data
    pub skipped: usize,
}

impl MeasurementCsv {
    /// Parse a measurement file; the sample name is the file stem
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CsvError> {
        let path = path.as_ref();
        let name = Self::label_for_path(path)?;
        let content = fs::read_to_string(path)?;
        let parsed = Self::from_str(&content, &name)?;
        info!(
            "Loaded {} points from {} ({} rows skipped)",
            parsed.npoints(),
            path.display(),
            parsed.skipped
        );
        Ok(parsed)
    }

    /// Sample label from a path: the stem, which requires an extension
    pub fn label_for_path(path: &Path) -> Result<String, CsvError> {
        match (path.file_stem(), path.extension()) {
            (Some(stem), Some(_)) => Ok(stem.to_string_lossy().into_owned()),
            _ => Err(CsvError::MissingExtension(path.display().to_string())),
        }
    }

    /// Parse from string content
    pub fn from_str(content: &str, name: &str) -> Result<Self, CsvError> {
        let body = strip_header(content);
        let delimiter = sniff_delimiter(body);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(delimiter)
            .from_reader(body.as_bytes());

        let mut out = Self {
            name: name.to_string(),
            ..Self::default()
        };

        let mut record = StringRecord::new();
        let mut row = 0usize;
        while reader.read_record(&mut record)? {
            row += 1;
            match parse_row(&record) {
                Some([f, e1, e2, u1, u2]) => {
                    out.frequency_hz.push(f);
                    out.e1.push(e1);
                    out.e2.push(e2);
                    out.u1.push(u1);
                    out.u2.push(u2);
                }
                None => {
                    debug!("Skipping non-data row {}: {:?}", row, record);
                    out.skipped += 1;
                }
            }
        }

        if out.frequency_hz.is_empty() {
            return Err(CsvError::NoData(name.to_string()));
        }
        Ok(out)
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.frequency_hz.len()
    }

    /// Frequency in GHz
    pub fn frequency_ghz(&self) -> Vec<f64> {
        self.frequency_hz.iter().map(|f| f / HZ_PER_GHZ).collect()
    }

    /// Convert into a validated spectrum, applying ε = ε′ − jε″
    pub fn into_spectrum(self) -> Result<MaterialSpectrum, CsvError> {
        let frequency = Frequency::from_f(self.frequency_hz, FrequencyUnit::Hz);
        Ok(MaterialSpectrum::from_loss_components(
            self.name, frequency, &self.e1, &self.e2, &self.u1, &self.u2,
        )?)
    }
}

/// Drop the `Label` line and the one following it
fn strip_header(content: &str) -> &str {
    let mut lines = content.splitn(3, '\n');
    let first = lines.next().unwrap_or("");
    if first.contains(HEADER_MARKER) {
        let _units = lines.next();
        lines.next().unwrap_or("")
    } else {
        content
    }
}

/// Delimiter of the first line that splits into five numbers
///
/// Title rows are passed over, so a tab-separated file whose column names
/// contain commas is still read as tab-separated. Comma when no line
/// qualifies.
fn sniff_delimiter(body: &str) -> u8 {
    body.lines()
        .find_map(|line| {
            [b'\t', b','].into_iter().find(|&d| {
                let fields: Vec<&str> = line.split(d as char).map(str::trim).collect();
                fields.len() >= NCOLUMNS
                    && fields[..NCOLUMNS].iter().all(|f| f.parse::<f64>().is_ok())
            })
        })
        .unwrap_or(b',')
}

fn parse_row(record: &StringRecord) -> Option<[f64; NCOLUMNS]> {
    if record.len() < NCOLUMNS {
        return None;
    }
    let mut values = [0.0; NCOLUMNS];
    for (slot, field) in values.iter_mut().zip(record.iter()) {
        *slot = field.parse::<f64>().ok()?;
    }
    Some(values)
}
