//! Command-line options

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use eu2rl_core::ThicknessSet;

/// Default number of attempts for each interactive question
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Reflection loss of metal-backed absorbers from measured ε/μ spectra
///
/// Options that are not given on the command line are asked for
/// interactively. Without --input the tool keeps asking for measurement
/// files until an empty line or end of input.
#[derive(Parser, Debug, Clone)]
#[command(name = "eu2rl", version, about, long_about = None)]
pub struct Cli {
    /// Measurement file(s): frequency(Hz), e', e'', u', u''
    #[arg(short, long = "input", value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Thickness(es) in mm: "3", "2, 3, 4" or "begin : step : end"
    #[arg(short, long, env = "EU2RL_THICKNESS", value_parser = parse_thickness)]
    pub thickness: Option<ThicknessSet>,

    /// Directory receiving the exported sheets
    #[arg(short, long, env = "EU2RL_OUTPUT_DIR", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Evaluate thicknesses in parallel (needs the `parallel` feature)
    #[arg(long)]
    pub parallel: bool,

    /// Do not print the full RL table
    #[arg(long)]
    pub no_table: bool,

    /// Attempts allowed per interactive question before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_thickness(s: &str) -> Result<ThicknessSet, String> {
    s.parse().map_err(|e: eu2rl_core::RlError| e.to_string())
}

/// Settings shared by every run in a session
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub thickness: Option<ThicknessSet>,
    pub output_dir: Option<PathBuf>,
    pub parallel: bool,
    pub print_table: bool,
    pub max_attempts: u32,
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            thickness: cli.thickness.clone(),
            output_dir: cli.output_dir.clone(),
            parallel: cli.parallel,
            print_table: !cli.no_table,
            max_attempts: cli.max_attempts,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            thickness: None,
            output_dir: None,
            parallel: false,
            print_table: true,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
