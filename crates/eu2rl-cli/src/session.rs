//! One invocation of the tool: questions, runs and exports
//!
//! Each run goes through the numbered steps the user sees:
//! #0 output directory, #1 measurement file, #2 thicknesses, #3 save.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eu2rl_core::constants::QUALIFIED_ABSORPTION_DB;
use eu2rl_core::measurement::{CsvError, MeasurementCsv};
use eu2rl_core::reflection::AbsorptionPoint;
use eu2rl_core::report::{CsvReport, ReportSink};
use eu2rl_core::{Absorption, MaterialSpectrum, RlResult, RlTable, ThicknessSet};
use log::{info, warn};

use crate::cli::RunConfig;
use crate::prompt::Prompter;

const OUTPUT_DIR_QUESTION: &str = "#0/3 Create or select a directory to store the exported sheets, \
such as \"./eu2rl-out\".";

const FILE_QUESTION: &str = "#1/3 Please type the filename or path of the measurement file \
(empty line to quit)...";

const THICKNESS_QUESTION: &str = "#2/3 Please type the target thickness(mm) to calculate...
Case 1: several thicknesses separated by comma (,), such as 2, 3, 4.
Case 2: a range \"begin : step : end\", such as \"2 : 0.01 : 6\".";

const SEPARATOR: &str =
    "===========================================================================";

/// Rows and columns of the RL table echoed to the console
const PREVIEW_ROWS: usize = 8;
const PREVIEW_COLS: usize = 6;

/// What one run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub absorption: Absorption,
    pub point: AbsorptionPoint,
    /// -10 dB bandwidth at the optimum thickness, GHz
    pub bandwidth_ghz: f64,
    pub saved: PathBuf,
}

/// Read a measurement file into a spectrum
pub fn load_spectrum(path: impl AsRef<Path>) -> Result<MaterialSpectrum, CsvError> {
    MeasurementCsv::from_file(path)?.into_spectrum()
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    config: RunConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: RunConfig) -> Self {
        if config.parallel && !cfg!(feature = "parallel") {
            warn!("--parallel ignored: built without the `parallel` feature");
        }
        Self {
            prompter: Prompter::new(input, output, config.max_attempts),
            config,
        }
    }

    /// Process `inputs`, or ask for files until cancelled when empty
    ///
    /// Returns the number of completed runs.
    pub fn run(&mut self, inputs: &[PathBuf]) -> Result<usize> {
        let Some(output_dir) = self.output_dir()? else {
            info!("No output directory given, nothing to do");
            return Ok(0);
        };

        let mut completed = 0;
        if inputs.is_empty() {
            while let Some(spectrum) =
                self.prompter
                    .ask(FILE_QUESTION, true, |answer| load_spectrum(answer))?
            {
                if !self.run_one(&spectrum, &output_dir)? {
                    break;
                }
                completed += 1;
            }
        } else {
            for path in inputs {
                let spectrum = load_spectrum(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                if !self.run_one(&spectrum, &output_dir)? {
                    break;
                }
                completed += 1;
            }
        }
        Ok(completed)
    }

    /// Sweep, summarise and export one sample
    pub fn process<S: ReportSink>(
        &mut self,
        spectrum: &MaterialSpectrum,
        thicknesses: &ThicknessSet,
        output_dir: &Path,
        sink: &mut S,
    ) -> Result<RunOutcome> {
        let table = self
            .sweep(spectrum, thicknesses)
            .with_context(|| format!("computing reflection loss of {}", spectrum.name()))?;
        info!(
            "{}: {} x {} RL table",
            spectrum.name(),
            table.nfreq(),
            table.nthickness()
        );

        let out = self.prompter.output();
        if self.config.print_table {
            write_table_preview(&mut *out, &table)?;
        }

        let absorption = table.maximum_absorption();
        let point = table.absorption_at(absorption.freq_index, absorption.thickness_index)?;
        writeln!(
            out,
            "Max RL = {:.2} dB, @ {:.2} GHz, with {:.2} mm.",
            point.rl_db, point.frequency_ghz, point.thickness_mm
        )?;
        if table.strongest_absorption().is_some() {
            writeln!(
                out,
                "Absorbed power = {:.2} %.",
                100.0 * point.absorbed_fraction()
            )?;
        } else {
            writeln!(out, "No absorption: RL is not below 0 dB anywhere.")?;
        }

        let bandwidth_ghz =
            table.effective_bandwidth(absorption.thickness_index, QUALIFIED_ABSORPTION_DB)?;
        writeln!(
            out,
            "RL <= {:.0} dB bandwidth = {:.2} GHz, with {:.2} mm.",
            QUALIFIED_ABSORPTION_DB, bandwidth_ghz, point.thickness_mm
        )?;

        sink.export_all(spectrum, &table)?;
        let saved = sink.save(output_dir)?;
        let out = self.prompter.output();
        writeln!(out, "#3/3 Saved into {}.", saved.display())?;
        writeln!(out, "{}", SEPARATOR)?;
        out.flush()?;

        Ok(RunOutcome {
            absorption,
            point,
            bandwidth_ghz,
            saved,
        })
    }

    fn output_dir(&mut self) -> Result<Option<PathBuf>> {
        if let Some(dir) = &self.config.output_dir {
            return Ok(Some(dir.clone()));
        }
        self.prompter
            .ask(OUTPUT_DIR_QUESTION, true, |answer| -> Result<PathBuf, String> {
                Ok(PathBuf::from(answer))
            })
    }

    /// Returns false when the user cancelled
    fn run_one(&mut self, spectrum: &MaterialSpectrum, output_dir: &Path) -> Result<bool> {
        let thicknesses = match &self.config.thickness {
            Some(set) => set.clone(),
            None => match self
                .prompter
                .ask(THICKNESS_QUESTION, false, |answer| answer.parse::<ThicknessSet>())?
            {
                Some(set) => set,
                None => return Ok(false),
            },
        };

        let mut report = CsvReport::new();
        self.process(spectrum, &thicknesses, output_dir, &mut report)?;
        Ok(true)
    }

    fn sweep(&self, spectrum: &MaterialSpectrum, thicknesses: &ThicknessSet) -> RlResult<RlTable> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return spectrum.reflection_loss_sweep_parallel(thicknesses);
        }
        spectrum.reflection_loss_sweep(thicknesses)
    }
}

/// Print the corners of the table, eliding the middle of large ones
fn write_table_preview<W: Write>(out: &mut W, table: &RlTable) -> std::io::Result<()> {
    let rows = preview_indices(table.nfreq(), PREVIEW_ROWS);
    let cols = preview_indices(table.nthickness(), PREVIEW_COLS);

    writeln!(
        out,
        "RL (dB) {} x {}, rows = frequency (GHz), columns = thickness (mm)",
        table.nfreq(),
        table.nthickness()
    )?;
    write!(out, "{:>9}", "")?;
    for c in &cols {
        match c {
            Some(j) => write!(out, " {:>9.2}", table.thickness_mm()[*j])?,
            None => write!(out, " {:>9}", "..")?,
        }
    }
    writeln!(out)?;

    for r in &rows {
        match r {
            Some(i) => {
                write!(out, "{:>9.2}", table.frequency_ghz()[*i])?;
                for c in &cols {
                    match c {
                        Some(j) => write!(out, " {:>9.2}", table.values()[[*i, *j]])?,
                        None => write!(out, " {:>9}", "..")?,
                    }
                }
                writeln!(out)?;
            }
            None => writeln!(out, "{:>9}", "..")?,
        }
    }
    Ok(())
}

/// All indices when `n <= max`, otherwise the first and last halves with a
/// `None` gap marker in between
fn preview_indices(n: usize, max: usize) -> Vec<Option<usize>> {
    if n <= max {
        return (0..n).map(Some).collect();
    }
    let head = max / 2;
    let tail = max - head;
    (0..head)
        .map(Some)
        .chain(std::iter::once(None))
        .chain((n - tail..n).map(Some))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

    fn fixture(name: &str) -> String {
        format!("{}/{}", TEST_DATA_DIR, name)
    }

    fn session(script: String, config: RunConfig) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(script.into_bytes()), Vec::new(), config)
    }

    fn printed(s: &mut Session<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(s.prompter.output().clone()).unwrap()
    }

    #[test]
    fn test_interactive_session() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "{}\n{}\n1.5, 2\n\n",
            dir.path().display(),
            fixture("ferrite_composite.csv")
        );
        let mut s = session(script, RunConfig::default());

        assert_eq!(s.run(&[]).unwrap(), 1);
        let text = printed(&mut s);
        assert!(text.contains("Max RL = -21.89 dB, @ 18.00 GHz, with 1.50 mm."));
        assert!(text.contains("Absorbed power = 99.35 %."));
        assert!(text.contains("bandwidth = 6.00 GHz"));
        assert!(text.contains("#3/3 Saved into"));
        assert!(dir.path().join("ferrite_composite_RL.csv").exists());
        assert!(dir.path().join("ferrite_composite_EU.csv").exists());
    }

    #[test]
    fn test_bad_answers_are_asked_again() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "{}\nno_extension\n{}\n6:1:2\n2\n",
            dir.path().display(),
            fixture("ferrite_composite.csv")
        );
        let mut s = session(script, RunConfig::default());

        // input ends after the first run
        assert_eq!(s.run(&[]).unwrap(), 1);
        let text = printed(&mut s);
        assert!(text.contains("must include an extension"));
        assert!(text.contains("Degenerate thickness range"));
    }

    #[test]
    fn test_batch_session_needs_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            thickness: Some("1 : 0.5 : 3".parse().unwrap()),
            output_dir: Some(dir.path().to_path_buf()),
            print_table: false,
            ..RunConfig::default()
        };
        let mut s = session(String::new(), config);

        let inputs = vec![
            PathBuf::from(fixture("ferrite_composite.csv")),
            PathBuf::from(fixture("vacuum.csv")),
        ];
        assert_eq!(s.run(&inputs).unwrap(), 2);

        let text = printed(&mut s);
        assert!(!text.contains("RL (dB)"));
        assert!(text.contains("No absorption"));
        assert!(dir.path().join("vacuum_RL.json").exists());
    }

    #[test]
    fn test_batch_session_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            thickness: Some("2".parse().unwrap()),
            output_dir: Some(dir.path().to_path_buf()),
            ..RunConfig::default()
        };
        let mut s = session(String::new(), config);
        let err = s.run(&[PathBuf::from(fixture("missing.csv"))]).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.csv"));
    }

    #[test]
    fn test_process_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(String::new(), RunConfig::default());
        let spectrum = load_spectrum(fixture("ferrite_composite.csv")).unwrap();
        let set: ThicknessSet = "1, 1.5, 2, 2.5, 3".parse().unwrap();

        let outcome = s
            .process(&spectrum, &set, dir.path(), &mut CsvReport::new())
            .unwrap();
        assert_eq!(
            (outcome.absorption.freq_index, outcome.absorption.thickness_index),
            (8, 1)
        );
        assert_eq!(outcome.point.thickness_mm, 1.5);
        assert_eq!(outcome.saved, dir.path().join("ferrite_composite_RL.csv"));

        let text = printed(&mut s);
        assert!(text.contains("RL (dB) 9 x 5"));
        assert!(text.contains(" .."));
    }

    #[test]
    fn test_preview_indices() {
        assert_eq!(preview_indices(3, 6), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(
            preview_indices(10, 4),
            vec![Some(0), Some(1), None, Some(8), Some(9)]
        );
    }
}
