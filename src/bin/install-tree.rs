//! Install files and directory trees with explicit permission modes.

use anyhow::Result;
use clap::Parser;
use leviso_buildtools::{init_logging, install, InstallOptions};
use std::path::PathBuf;

/// Parse an octal permission mode such as `755` or `0644`.
fn parse_mode(value: &str) -> Result<u32, String> {
    u32::from_str_radix(value, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
        .ok_or_else(|| format!("'{value}' is not an octal permission mode"))
}

#[derive(Parser, Debug)]
#[command(name = "install-tree", version, about = "Copy files and directories into place")]
struct Cli {
    /// Mode of installed files (octal)
    #[arg(long, value_parser = parse_mode, default_value = "666")]
    mode: u32,

    /// Mode of created directories (octal)
    #[arg(long = "dirmode", value_parser = parse_mode, default_value = "777")]
    dir_mode: u32,

    /// Bits cleared from both modes (octal)
    #[arg(long, value_parser = parse_mode, default_value = "022")]
    umask: u32,

    /// Sources followed by the destination; a destination ending in '/'
    /// receives each source under its own name
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    let options = InstallOptions {
        mode: cli.mode,
        dir_mode: cli.dir_mode,
        umask: cli.umask,
    };
    let Some((dest, sources)) = cli.paths.split_last() else {
        anyhow::bail!("missing destination");
    };
    install(sources, dest, &options)?;
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("install-tree: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("755"), Ok(0o755));
        assert_eq!(parse_mode("0644"), Ok(0o644));
        assert!(parse_mode("9").is_err());
        assert!(parse_mode("17777").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["install-tree", "a", "b/"]);
        assert_eq!((cli.mode, cli.dir_mode, cli.umask), (0o666, 0o777, 0o022));
        assert_eq!(cli.paths, vec![PathBuf::from("a"), PathBuf::from("b/")]);
    }
}
