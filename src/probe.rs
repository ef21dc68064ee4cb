//! Flag probes backed by external configuration tools.

use std::process::{Command, Stdio};

use tracing::{debug, trace};

/// Default package-metadata tool queried by [`PkgConfig`].
pub const DEFAULT_PKG_CONFIG: &str = "pkg-config";

/// Arguments asking a config tool for combined compile and link flags.
const FLAG_ARGS: [&str; 2] = ["--cflags", "--libs"];

/// One strategy for finding the flags of a library alias.
///
/// `None` means the strategy has nothing for this alias and the next one
/// should be tried. Plain closures `Fn(&str) -> Option<String>` are probes
/// too.
pub trait Probe {
    fn probe(&self, alias: &str) -> Option<String>;
}

impl<F> Probe for F
where
    F: Fn(&str) -> Option<String>,
{
    fn probe(&self, alias: &str) -> Option<String> {
        self(alias)
    }
}

/// Runs `<alias>-config --cflags --libs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigScript;

impl Probe for ConfigScript {
    fn probe(&self, alias: &str) -> Option<String> {
        let program = format!("{alias}-config");
        capture_stdout(Command::new(&program).args(FLAG_ARGS))
    }
}

/// Runs `pkg-config --cflags --libs <alias>` (or another compatible tool).
#[derive(Debug, Clone)]
pub struct PkgConfig {
    tool: String,
}

impl PkgConfig {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

impl Default for PkgConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PKG_CONFIG)
    }
}

impl Probe for PkgConfig {
    fn probe(&self, alias: &str) -> Option<String> {
        capture_stdout(Command::new(&self.tool).args(FLAG_ARGS).arg(alias))
    }
}

/// Run a command to completion and return its stdout if it exited with 0.
///
/// A command that cannot be spawned (usually: not on PATH) counts as a
/// failure like any nonzero exit. The output is returned unstripped.
#[must_use = "probe output should be used"]
pub fn capture_stdout(command: &mut Command) -> Option<String> {
    let program = command.get_program().to_os_string();
    let output = match command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            debug!(program = %program.to_string_lossy(), error = %err, "probe could not run");
            return None;
        }
    };

    if !output.status.success() {
        debug!(program = %program.to_string_lossy(), status = %output.status, "probe failed");
        trace!(stderr = %String::from_utf8_lossy(&output.stderr).trim(), "probe stderr");
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
