//! Compiler/linker flag resolution for library alias groups.

use tracing::debug;

use crate::group::LibraryGroup;
use crate::probe::{ConfigScript, PkgConfig, Probe};

/// Tries probes in order for each alias of a group, first success wins.
pub struct Resolver {
    probes: Vec<Box<dyn Probe>>,
}

impl Resolver {
    /// Resolver with the standard strategies: `<alias>-config`, then the
    /// given package-metadata tool.
    pub fn new(pkg_config_tool: impl Into<String>) -> Self {
        let probes: Vec<Box<dyn Probe>> = vec![
            Box::new(ConfigScript),
            Box::new(PkgConfig::new(pkg_config_tool)),
        ];
        Self::with_probes(probes)
    }

    /// Resolver with a custom probe order.
    pub fn with_probes(probes: Vec<Box<dyn Probe>>) -> Self {
        Self { probes }
    }

    /// Resolve one result per group, in input order.
    #[must_use = "resolved flags should be used"]
    pub fn resolve(&self, groups: &[LibraryGroup]) -> Vec<String> {
        groups.iter().map(|group| self.resolve_group(group)).collect()
    }

    /// Resolve the flags for a single group.
    ///
    /// Aliases are tried in order and, for each alias, every probe in order.
    /// The first probe output is returned verbatim. If nothing answers, the
    /// result is `-l<name>` for the *last* alias of the group.
    #[must_use = "resolved flags should be used"]
    pub fn resolve_group(&self, group: &LibraryGroup) -> String {
        for alias in group.aliases() {
            for (index, probe) in self.probes.iter().enumerate() {
                if let Some(flags) = probe.probe(alias) {
                    debug!(alias = %alias, probe = index, "resolved flags");
                    return flags;
                }
            }
        }

        let fallback = group.fallback_alias();
        debug!(aliases = ?group.aliases(), "no probe found flags, using -l{fallback}");
        fallback_flags(fallback)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(crate::probe::DEFAULT_PKG_CONFIG)
    }
}

/// Linker flag used when no probe knows the library.
pub fn fallback_flags(alias: &str) -> String {
    format!("-l{alias}")
}

/// Resolve groups with the default strategies and `pkg-config`.
#[must_use = "resolved flags should be used"]
pub fn resolve(groups: &[LibraryGroup]) -> Vec<String> {
    Resolver::default().resolve(groups)
}
