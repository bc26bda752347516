//! coursecraft CLI — curriculum analysis for course outlines.
//!
//! Parses a free-form outline into a section tree, scores it against
//! MECE curriculum-design criteria, and prints the synthesized learning
//! path as a summary or JSON report.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
