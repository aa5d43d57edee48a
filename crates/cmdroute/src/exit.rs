//! Entry points that print usage and exit the process on failure.

use std::process;

use tracing::debug;

use crate::dispatch::Dispatched;
use crate::error::{DispatchError, ResolveError};
use crate::registry::Registry;
use crate::resolution::Resolution;

impl Registry {
    /// Resolves `std::env::args()`, minus the program name.
    ///
    /// On failure prints [`Registry::error_usage`] to stderr and exits with
    /// status 1.
    pub fn resolve_or_exit(&self) -> Resolution {
        self.resolve_args_or_exit(std::env::args().skip(1))
    }

    /// Like [`Registry::resolve_or_exit`] for an explicit argument vector.
    pub fn resolve_args_or_exit<I, S>(&self, args: I) -> Resolution
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.resolve(args) {
            Ok(resolution) => resolution,
            Err(err) => self.exit_with(&err),
        }
    }

    fn exit_with(&self, err: &ResolveError) -> ! {
        debug!(kind = %err.kind(), "resolution failed");
        eprint!("{}", self.failure_report(err));
        process::exit(1)
    }

    /// Text printed for a failed resolution.
    fn failure_report(&self, err: &ResolveError) -> String {
        match self.error_usage(err) {
            Ok(text) => text,
            Err(usage_err) => format!("{}: {}\n{}\n", self.settings.program, err, usage_err),
        }
    }

    /// Text printed when the help command names an unknown command.
    fn unknown_topic_report(&self, topic: &str) -> String {
        let mut out = format!("unrecognised command: {}\n", topic);
        match self.usage() {
            Ok(text) => out.push_str(&text),
            Err(usage_err) => out.push_str(&format!("{}: {}\n", self.settings.program, usage_err)),
        }
        out
    }

    /// Resolves the process arguments and dispatches the result.
    ///
    /// Resolution failures and unknown help topics print usage to stderr and
    /// exit with status 1. Usage output for help requests goes to stderr.
    /// Handler errors are returned to the caller.
    pub fn run_or_exit(&mut self) -> anyhow::Result<()> {
        let resolution = self.resolve_or_exit();
        self.dispatch_or_exit(&resolution)
    }

    /// Like [`Registry::run_or_exit`] for an explicit argument vector.
    pub fn run_args_or_exit<I, S>(&mut self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let resolution = self.resolve_args_or_exit(args);
        self.dispatch_or_exit(&resolution)
    }

    /// Dispatches `resolution`, printing usage output to stderr.
    ///
    /// An unknown help topic prints the program usage and exits with status
    /// 1. Handler errors are returned unchanged.
    pub fn dispatch_or_exit(&mut self, resolution: &Resolution) -> anyhow::Result<()> {
        match self.dispatch(resolution) {
            Ok(Dispatched::Usage(text)) => {
                eprint!("{}", text);
                Ok(())
            }
            Ok(Dispatched::Ran | Dispatched::NoMatch) => Ok(()),
            Err(DispatchError::UnknownHelpTopic(topic)) => {
                eprint!("{}", self.unknown_topic_report(&topic));
                process::exit(1)
            }
            Err(DispatchError::Handler(err)) => Err(err),
            Err(err) => Err(err.into()),
        }
    }
}
