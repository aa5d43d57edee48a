//! The result of a successful resolution.

use clap::ArgMatches;

/// Returned by [`Registry::pre_arg`](crate::Registry::pre_arg) to read the
/// declared value back from a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreArgHandle {
    index: usize,
    name: String,
}

impl PreArgHandle {
    pub(crate) fn new(index: usize, name: String) -> Self {
        Self { index, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the pre-argument on the command line.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Pre-argument values in declaration order.
///
/// Empty when pre-arguments were skipped by the help bypass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreArgs {
    values: Vec<(String, String)>,
}

impl PreArgs {
    pub(crate) fn from_pairs(values: Vec<(String, String)>) -> Self {
        Self { values }
    }

    /// Value of the first pre-argument declared under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value for a handle from the same registry.
    ///
    /// Returns `None` for a handle whose declaration was cleared and
    /// replaced since it was issued.
    pub fn value(&self, handle: &PreArgHandle) -> Option<&str> {
        self.values
            .get(handle.index)
            .filter(|(n, _)| *n == handle.name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The command picked by a resolution.
#[derive(Debug, Clone)]
pub struct Matched {
    pub(crate) name: String,
    pub(crate) matches: ArgMatches,
    pub(crate) args: Vec<String>,
    pub(crate) help_requested: bool,
}

impl Matched {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flags parsed in the command's own context.
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    /// Positional arguments after the command's flags.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the reserved help flag was given.
    pub fn help_requested(&self) -> bool {
        self.help_requested
    }
}

/// A fully resolved invocation, ready for
/// [`Registry::dispatch`](crate::Registry::dispatch).
#[derive(Debug, Clone)]
pub struct Resolution {
    pub(crate) globals: ArgMatches,
    pub(crate) pre_args: PreArgs,
    pub(crate) help_bypassed: bool,
    pub(crate) matched: Option<Matched>,
}

impl Resolution {
    /// Global flag matches.
    pub fn globals(&self) -> &ArgMatches {
        &self.globals
    }

    pub fn pre_args(&self) -> &PreArgs {
        &self.pre_args
    }

    /// Whether pre-arguments were skipped because the first token was `help`.
    pub fn help_bypassed(&self) -> bool {
        self.help_bypassed
    }

    /// The matched command; `None` only when the registry has no commands.
    pub fn matched(&self) -> Option<&Matched> {
        self.matched.as_ref()
    }

    /// Name of the matched command.
    pub fn command(&self) -> Option<&str> {
        self.matched.as_ref().map(Matched::name)
    }

    /// Positional arguments of the matched command.
    pub fn args(&self) -> &[String] {
        self.matched.as_ref().map(Matched::args).unwrap_or_default()
    }
}
