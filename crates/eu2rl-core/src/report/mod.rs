//! Report export
//!
//! The engine never writes anything itself. Results are handed to a
//! [`ReportSink`], which buffers the sheets for a sample and persists them
//! on [`ReportSink::save`].

mod csv_report;
mod labels;

pub use csv_report::CsvReport;
pub use labels::{AxisLabel, TableLabels};

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::material::MaterialSpectrum;
use crate::reflection::RlTable;

/// Destination for a sample's spectra and reflection loss table
pub trait ReportSink {
    /// Add the measured ε/μ sheet
    fn export_spectrum(&mut self, spectrum: &MaterialSpectrum) -> Result<()>;

    /// Add the RL matrix sheet with its axis labels
    fn export_table(
        &mut self,
        spectrum: &MaterialSpectrum,
        table: &RlTable,
        labels: &TableLabels,
    ) -> Result<()>;

    /// Persist everything exported so far under `dir`, returning the main
    /// output path
    fn save(&mut self, dir: &Path) -> Result<PathBuf>;

    /// Spectrum sheet, then RL sheet
    fn export_all(&mut self, spectrum: &MaterialSpectrum, table: &RlTable) -> Result<()> {
        self.export_spectrum(spectrum)?;
        self.export_table(spectrum, table, &TableLabels::for_table(table))
    }
}
