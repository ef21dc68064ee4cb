//! Print compiler/linker flags for each library group, one line per group.

use anyhow::Result;
use clap::Parser;
use leviso_buildtools::{init_logging, parse_groups, Resolver, DEFAULT_PKG_CONFIG};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(
    name = "depflags",
    version,
    about = "Find compiler/linker flags via <lib>-config, pkg-config or -l<lib>",
    after_help = "Aliases for one library are joined with '-or', e.g. `depflags ssl -or openssl z`."
)]
struct Cli {
    /// Package-metadata tool queried after <lib>-config
    #[arg(
        long = "pkg-config",
        env = "PKG_CONFIG",
        value_name = "TOOL",
        default_value = DEFAULT_PKG_CONFIG
    )]
    pkg_config: String,

    /// Library names; `-or NAME` adds an alias to the previous library
    #[arg(value_name = "LIB", trailing_var_arg = true, allow_hyphen_values = true)]
    libs: Vec<String>,
}

fn run(cli: Cli) -> Result<()> {
    let groups = parse_groups(cli.libs)?;
    let resolver = Resolver::new(cli.pkg_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for flags in resolver.resolve(&groups) {
        writeln!(out, "{}", flags.trim_end_matches(['\r', '\n']))?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("depflags: {e:#}");
        std::process::exit(1);
    }
}
