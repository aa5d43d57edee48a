//! Subcommand resolution and dispatch for clap-based CLIs.
//!
//! `cmdroute` turns an argument vector into a fully resolved invocation in a
//! fixed order:
//!
//! ```text
//! <global flags> <pre-arguments> <command> <command flags> <arguments>
//! ```
//!
//! # Features
//!
//! - **Global flags**: A `clap` flag context parsed before anything else
//! - **Pre-arguments**: Named positionals required before the command name
//! - **Commands**: Each with its own flag context, required flags and
//!   positional arity (see [`cmdroute_args`])
//! - **Typed failures**: [`ResolveError::kind`] reports where resolution
//!   stopped, and keeps what was parsed until then
//! - **Help**: A reserved `-h`/`--help` flag, or a `help` command
//! - **Usage text**: Rendered for the program, a command, or an error
//!
//! # Example
//!
//! ```rust
//! use clap::{Arg, ArgAction};
//! use cmdroute::{CommandContext, Dispatched, FnHandler, Registry};
//!
//! let mut registry = Registry::new("repoctl");
//! registry.global_arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue));
//! let org = registry.pre_arg("org", "Organization");
//!
//! registry
//!     .command(
//!         "deploy",
//!         "Deploy to an environment",
//!         FnHandler::new(|ctx: &CommandContext<'_>| {
//!             println!("deploying to {}", ctx.args[0]);
//!         })
//!         .with_flags(|cmd| cmd.arg(Arg::new("force").long("force").action(ArgAction::SetTrue))),
//!     )
//!     .required_flag("force")
//!     .arguments(["env"])?;
//!
//! let resolution = registry.resolve(["--verbose", "acme", "deploy", "--force", "prod"])?;
//! assert_eq!(resolution.pre_args().value(&org), Some("acme"));
//! assert_eq!(resolution.command(), Some("deploy"));
//! assert_eq!(resolution.args(), ["prod"]);
//!
//! assert_eq!(registry.dispatch(&resolution)?, Dispatched::Ran);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Binaries that just want the conventional behaviour call
//! [`Registry::run_or_exit`], which prints usage and exits with status 1 on
//! any resolution failure.

mod dispatch;
mod error;
mod exit;
mod flags;
mod handler;
mod registry;
mod resolution;
mod resolve;
mod usage;

pub use dispatch::Dispatched;
pub use error::{
    DispatchError, Failure, ResolveError, ResolveKind, SetupError, UsageError,
};
pub use flags::HELP_FLAG_ID;
pub use handler::{CommandContext, FnHandler, Handler, HandlerResult, IntoHandlerResult};
pub use registry::{
    CommandBuilder, CommandDescriptor, PreArgDecl, Registry, Settings, HELP_COMMAND,
};
pub use resolution::{Matched, PreArgHandle, PreArgs, Resolution};

pub use cmdroute_args::{ArgKind, ArgSlot, ArgSpec, ArityError, PatternError};
