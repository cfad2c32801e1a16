//! Directory-of-sheets report
//!
//! `save(dir)` writes, for a sample named `name`:
//! - `name_EU.csv`: frequency, ε′, ε″, μ′, μ″, loss tangents
//! - `name_RL.csv`: the RL matrix
//! - `name_RL.json`: axis labels and the strongest absorption

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;

use super::{ReportSink, TableLabels};
use crate::constants::QUALIFIED_ABSORPTION_DB;
use crate::material::MaterialSpectrum;
use crate::measurement::{write_spectrum_csv, write_table_csv};
use crate::reflection::{AbsorptionPoint, RlTable};

#[derive(Debug, Serialize)]
struct Summary {
    sample: String,
    labels: TableLabels,
    nfreq: usize,
    nthickness: usize,
    /// `None` when no entry is below 0 dB
    maximum_absorption: Option<AbsorptionPoint>,
    /// Share of incident power absorbed at the maximum
    absorbed_fraction: Option<f64>,
    /// -10 dB bandwidth at the optimum thickness, GHz
    qualified_bandwidth_ghz: Option<f64>,
}

/// [`ReportSink`] writing CSV sheets and a JSON summary
#[derive(Debug, Default)]
pub struct CsvReport {
    name: Option<String>,
    spectrum_sheet: Option<Vec<u8>>,
    table_sheet: Option<Vec<u8>>,
    summary: Option<Summary>,
}

impl CsvReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn bind_name(&mut self, spectrum: &MaterialSpectrum) -> Result<()> {
        match &self.name {
            Some(name) if name != spectrum.name() => bail!(
                "Report already holds sample '{}', cannot add '{}'",
                name,
                spectrum.name()
            ),
            Some(_) => Ok(()),
            None => {
                self.name = Some(spectrum.name().to_string());
                Ok(())
            }
        }
    }
}

impl ReportSink for CsvReport {
    fn export_spectrum(&mut self, spectrum: &MaterialSpectrum) -> Result<()> {
        self.bind_name(spectrum)?;
        let mut buf = Vec::new();
        write_spectrum_csv(&mut buf, spectrum).context("formatting spectrum sheet")?;
        self.spectrum_sheet = Some(buf);
        Ok(())
    }

    fn export_table(
        &mut self,
        spectrum: &MaterialSpectrum,
        table: &RlTable,
        labels: &TableLabels,
    ) -> Result<()> {
        self.bind_name(spectrum)?;
        let mut buf = Vec::new();
        write_table_csv(&mut buf, table).context("formatting RL sheet")?;
        self.table_sheet = Some(buf);

        let best = table.strongest_absorption();
        let maximum_absorption = best
            .map(|a| table.absorption_at(a.freq_index, a.thickness_index))
            .transpose()?;
        let qualified_bandwidth_ghz = best
            .map(|a| table.effective_bandwidth(a.thickness_index, QUALIFIED_ABSORPTION_DB))
            .transpose()?;

        let absorbed_fraction = maximum_absorption.map(|p| p.absorbed_fraction());

        self.summary = Some(Summary {
            sample: spectrum.name().to_string(),
            labels: labels.clone(),
            nfreq: table.nfreq(),
            nthickness: table.nthickness(),
            maximum_absorption,
            absorbed_fraction,
            qualified_bandwidth_ghz,
        });
        Ok(())
    }

    fn save(&mut self, dir: &Path) -> Result<PathBuf> {
        let Some(name) = self.name.clone() else {
            bail!("Nothing to save: no sheets were exported");
        };
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;

        if let Some(sheet) = &self.spectrum_sheet {
            let path = dir.join(format!("{}_EU.csv", name));
            fs::write(&path, sheet).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }

        let Some(sheet) = &self.table_sheet else {
            return Ok(dir.join(format!("{}_EU.csv", name)));
        };
        let rl_path = dir.join(format!("{}_RL.csv", name));
        fs::write(&rl_path, sheet).with_context(|| format!("writing {}", rl_path.display()))?;
        info!("Wrote {}", rl_path.display());

        if let Some(summary) = &self.summary {
            let path = dir.join(format!("{}_RL.json", name));
            let file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, summary)
                .with_context(|| format!("writing {}", path.display()))?;
            writer.flush()?;
            info!("Wrote {}", path.display());
        }

        Ok(rl_path)
    }
}
