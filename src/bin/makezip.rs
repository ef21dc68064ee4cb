//! Pack files and directory trees into a zip archive.

use anyhow::Result;
use clap::Parser;
use leviso_buildtools::{init_logging, write_archive};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "makezip", version, about = "Pack files and directories into a zip archive")]
struct Cli {
    /// Archive to create (overwritten if it exists)
    archive: PathBuf,

    /// Files and directories to pack, stored under their own names
    #[arg(value_name = "SOURCE")]
    sources: Vec<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    write_archive(&cli.archive, &cli.sources)?;
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("makezip: {e:#}");
        std::process::exit(1);
    }
}
