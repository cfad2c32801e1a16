//! Measurement file I/O
//!
//! Reads the five-column permittivity/permeability CSV exported by network
//! analyser software and writes spectra back as sheets.

pub mod parser;
pub mod writer;

pub use parser::{CsvError, MeasurementCsv};
pub use writer::{write_spectrum_csv, write_table_csv};
