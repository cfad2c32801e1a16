//! eu2rl: reflection loss of metal-backed absorbers from ε/μ measurements

mod cli;
mod prompt;
mod session;

use std::io;

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};

use crate::cli::{Cli, RunConfig};
use crate::session::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    println!(
        "eu2rl {}: reflection loss from permittivity and permeability spectra",
        env!("CARGO_PKG_VERSION")
    );
    println!("Input columns: frequency (Hz), e', e'', u', u''. RL is in dB.");
    println!();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), RunConfig::from(&cli));
    let completed = session.run(&cli.inputs)?;

    info!("{} sample(s) processed", completed);
    Ok(())
}
