//! Library alias groups and their command-line form.

use anyhow::{bail, Result};

/// Token joining the previous alias and the next argument into one group.
pub const ALIAS_SEPARATOR: &str = "-or";

/// Ordered, non-empty list of aliases naming the same library.
///
/// Aliases are probed in order. The last alias is the one used for the
/// `-l<name>` fallback, so callers put the most generic name last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryGroup {
    aliases: Vec<String>,
}

impl LibraryGroup {
    /// Build a group from its aliases.
    ///
    /// # Errors
    ///
    /// Returns an error if `aliases` is empty.
    pub fn new<I, S>(aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        if aliases.is_empty() {
            bail!("Library group needs at least one alias");
        }
        Ok(Self { aliases })
    }

    /// Group with a single alias.
    pub fn single(alias: impl Into<String>) -> Self {
        Self {
            aliases: vec![alias.into()],
        }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The alias used for the `-l<name>` fallback.
    pub fn fallback_alias(&self) -> &str {
        // Non-empty by construction.
        self.aliases.last().map_or("", String::as_str)
    }

    fn push(&mut self, alias: String) {
        self.aliases.push(alias);
    }
}

/// Split command-line arguments into alias groups.
///
/// Every argument starts a new group unless it follows `-or`, in which case
/// it is appended to the previous group: `foo -or bar baz` gives
/// `{foo, bar}` and `{baz}`. The argument after `-or` is always taken
/// literally, even if it is `-or` itself.
///
/// # Errors
///
/// Returns an error if `-or` is the first argument or the last one.
pub fn parse_groups<I, S>(args: I) -> Result<Vec<LibraryGroup>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut groups: Vec<LibraryGroup> = Vec::new();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        if arg != ALIAS_SEPARATOR {
            groups.push(LibraryGroup::single(arg));
            continue;
        }
        let Some(alias) = args.next() else {
            bail!("'{ALIAS_SEPARATOR}' must be followed by a library name");
        };
        match groups.last_mut() {
            Some(group) => group.push(alias),
            None => bail!("'{ALIAS_SEPARATOR}' must follow a library name"),
        }
    }

    Ok(groups)
}
