//! Error types.
//!
//! Resolution failures form a closed taxonomy: [`ResolveError::kind`] tells
//! the caller how far parsing got before it stopped.
//!
//! | Kind | Parsed before the failure |
//! |------|---------------------------|
//! | [`ResolveKind::NoPreArg`] | global flags |
//! | [`ResolveKind::NoCommand`] | global flags, pre-arguments |
//! | [`ResolveKind::InvalidCommand`] | global flags, pre-arguments, and command flags when a required flag is missing |
//! | [`ResolveKind::ArgError`] | everything up to and including command flags |
//! | [`ResolveKind::FlagError`] | global flags when the command context rejected a token, nothing otherwise |

use std::fmt;

use clap::ArgMatches;
use cmdroute_args::{ArityError, PatternError};
use thiserror::Error;

use crate::flags;
use crate::resolution::{Matched, PreArgs};

/// Coarse classification of a resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveKind {
    /// Fewer tokens than declared pre-arguments.
    NoPreArg,
    /// No token left for the command name.
    NoCommand,
    /// Unknown command name, or a required flag was not supplied.
    InvalidCommand,
    /// The command's positional arguments failed the arity check.
    ArgError,
    /// clap rejected a token in the global or command flag context.
    FlagError,
}

impl fmt::Display for ResolveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveKind::NoPreArg => write!(f, "no pre-argument"),
            ResolveKind::NoCommand => write!(f, "no command"),
            ResolveKind::InvalidCommand => write!(f, "invalid command"),
            ResolveKind::ArgError => write!(f, "argument error"),
            ResolveKind::FlagError => write!(f, "flag error"),
        }
    }
}

/// What went wrong during resolution.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("expected {expected} argument(s) before command")]
    MissingPreArgs { expected: usize, found: usize },

    #[error("missing command")]
    MissingCommand,

    #[error("invalid command: {name}")]
    UnknownCommand { name: String },

    #[error("{command}: missing required flags: {}", .missing.join(", "))]
    MissingRequiredFlags {
        command: String,
        missing: Vec<String>,
    },

    #[error("{command}: {source}")]
    Arity {
        command: String,
        #[source]
        source: ArityError,
    },

    #[error("{}", flag_message(.command.as_deref(), .source))]
    Flags {
        command: Option<String>,
        #[source]
        source: clap::Error,
    },
}

fn flag_message(command: Option<&str>, source: &clap::Error) -> String {
    match command {
        Some(command) => format!("{}: {}", command, flags::summarize(source)),
        None => flags::summarize(source),
    }
}

impl Failure {
    pub fn kind(&self) -> ResolveKind {
        match self {
            Failure::MissingPreArgs { .. } => ResolveKind::NoPreArg,
            Failure::MissingCommand => ResolveKind::NoCommand,
            Failure::UnknownCommand { .. } | Failure::MissingRequiredFlags { .. } => {
                ResolveKind::InvalidCommand
            }
            Failure::Arity { .. } => ResolveKind::ArgError,
            Failure::Flags { .. } => ResolveKind::FlagError,
        }
    }

    /// The registered command this failure is about.
    ///
    /// Unknown command names are not reported here: there is no registered
    /// command whose usage could be shown for them.
    pub fn command(&self) -> Option<&str> {
        match self {
            Failure::MissingRequiredFlags { command, .. } | Failure::Arity { command, .. } => {
                Some(command)
            }
            Failure::Flags { command, .. } => command.as_deref(),
            _ => None,
        }
    }
}

/// A failed resolution, with whatever was parsed before it stopped.
#[derive(Debug, Error)]
#[error("{failure}")]
pub struct ResolveError {
    failure: Failure,
    globals: Option<ArgMatches>,
    pre_args: PreArgs,
    matched: Option<Matched>,
}

impl ResolveError {
    pub(crate) fn new(failure: Failure) -> Self {
        Self {
            failure,
            globals: None,
            pre_args: PreArgs::default(),
            matched: None,
        }
    }

    pub(crate) fn with_globals(mut self, globals: ArgMatches) -> Self {
        self.globals = Some(globals);
        self
    }

    pub(crate) fn with_pre_args(mut self, pre_args: PreArgs) -> Self {
        self.pre_args = pre_args;
        self
    }

    pub(crate) fn with_matched(mut self, matched: Matched) -> Self {
        self.matched = Some(matched);
        self
    }

    pub fn kind(&self) -> ResolveKind {
        self.failure.kind()
    }

    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// See [`Failure::command`].
    pub fn command(&self) -> Option<&str> {
        self.failure.command()
    }

    /// The arity failure, for [`ResolveKind::ArgError`].
    pub fn arity(&self) -> Option<ArityError> {
        match &self.failure {
            Failure::Arity { source, .. } => Some(*source),
            _ => None,
        }
    }

    /// Global flag matches, if global parsing succeeded.
    pub fn globals(&self) -> Option<&ArgMatches> {
        self.globals.as_ref()
    }

    /// Pre-argument values, if they were consumed before the failure.
    pub fn pre_args(&self) -> &PreArgs {
        &self.pre_args
    }

    /// The command context, when its flags were parsed before the failure:
    /// missing required flags and arity failures.
    pub fn matched(&self) -> Option<&Matched> {
        self.matched.as_ref()
    }

    pub fn into_failure(self) -> Failure {
        self.failure
    }
}

/// A registration call that could not be applied.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("command '{command}': invalid argument pattern: {source}")]
    Pattern {
        command: String,
        #[source]
        source: PatternError,
    },
}

/// Usage text could not be produced.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("unrecognised command: {0}")]
    UnknownCommand(String),

    #[error("failed to render usage: {0}")]
    Template(#[from] minijinja::Error),
}

/// A dispatch that did not complete.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The help command was asked about a command that is not registered.
    #[error("unrecognised command: {0}")]
    UnknownHelpTopic(String),

    /// The resolution names a command this registry does not hold.
    #[error("command '{0}' is not registered")]
    Unregistered(String),

    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The handler's own error, passed through untouched.
    #[error(transparent)]
    Handler(anyhow::Error),
}
