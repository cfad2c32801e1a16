//! Sheet writers
//!
//! Two sheets are produced per sample: the measured spectra and the
//! reflection loss matrix. Both start with a long-name row and a unit row.

use std::io::Write;

use csv::Writer;

use super::parser::CsvError;
use crate::material::MaterialSpectrum;
use crate::reflection::RlTable;

/// Write frequency (GHz), ε′, ε″, μ′, μ″ and both loss tangents
pub fn write_spectrum_csv<W: Write>(
    writer: W,
    spectrum: &MaterialSpectrum,
) -> Result<(), CsvError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Frequency", "e1", "e2", "u1", "u2", "tan_de", "tan_dm"])?;
    wtr.write_record(["GHz", "", "", "", "", "", ""])?;

    let columns = [
        spectrum.frequency().f_ghz(),
        spectrum.e1(),
        spectrum.e2(),
        spectrum.u1(),
        spectrum.u2(),
        spectrum.dielectric_loss_tangent(),
        spectrum.magnetic_loss_tangent(),
    ];
    for i in 0..spectrum.npoints() {
        wtr.write_record(columns.iter().map(|c| c[i].to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the RL matrix: one row per frequency, one column per thickness
///
/// The first header row carries the thicknesses (mm), the first column the
/// frequencies (GHz); values are in dB.
pub fn write_table_csv<W: Write>(writer: W, table: &RlTable) -> Result<(), CsvError> {
    let mut wtr = Writer::from_writer(writer);

    let header = std::iter::once("Frequency (GHz) \\ Thickness (mm)".to_string())
        .chain(table.thickness_mm().iter().map(|d| d.to_string()));
    wtr.write_record(header)?;

    for (f, row) in table.frequency_ghz().iter().zip(table.values().rows()) {
        let record =
            std::iter::once(f.to_string()).chain(row.iter().map(|v| v.to_string()));
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}
