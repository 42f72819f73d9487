//! scriptbundle CLI: bundle a project's scripts into one versioned text file.
//!
//! Collects every source file under the project root, in path order, into
//! `<out>/<base><NNNN>.txt` with an index and per-file delimiters.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    Ok(commands::run(cli))
}
