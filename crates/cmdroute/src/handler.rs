//! Command handler types.
//!
//! A handler has two jobs:
//!
//! - **Declare flags** into the command's flag context (a `clap::Command`)
//!   before the tokens after the command name are parsed.
//! - **Run** with the parsed invocation once resolution succeeded.
//!
//! Positional arguments are not declared in the flag context. Their shape is
//! configured with [`CommandBuilder::arguments`](crate::CommandBuilder::arguments)
//! and they reach the handler as [`CommandContext::args`].
//!
//! # Core Types
//!
//! - [`Handler`]: Trait for command handlers (`&mut self`)
//! - [`FnHandler`]: Wraps a closure as a handler
//! - [`CommandContext`]: Everything resolution produced for this invocation
//! - [`HandlerResult`]: The result type for handlers
//!
//! # Using derive structs
//!
//! Flags can live in a `#[derive(clap::Args)]` struct:
//!
//! ```rust
//! use clap::{Args, FromArgMatches};
//! use cmdroute::{CommandContext, Handler, HandlerResult};
//!
//! #[derive(Args, Debug)]
//! struct DeployFlags {
//!     #[arg(long)]
//!     force: bool,
//! }
//!
//! struct Deploy;
//!
//! impl Handler for Deploy {
//!     fn flags(&self, flags: clap::Command) -> clap::Command {
//!         DeployFlags::augment_args(flags)
//!     }
//!
//!     fn run(&mut self, ctx: &CommandContext<'_>) -> HandlerResult {
//!         let flags = DeployFlags::from_arg_matches(ctx.matches)?;
//!         println!("deploying {:?} (force: {})", ctx.args, flags.force);
//!         Ok(())
//!     }
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use clap::{ArgMatches, Command};

use crate::resolution::PreArgs;

/// The result type for command handlers.
///
/// Enables use of the `?` operator for error propagation.
pub type HandlerResult = Result<(), anyhow::Error>;

/// Context passed to command handlers.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    /// Name of the command being run.
    pub command: &'a str,
    /// Global flags.
    pub globals: &'a ArgMatches,
    /// Pre-argument values; empty when the help bypass skipped them.
    pub pre_args: &'a PreArgs,
    /// Flags declared by this command's handler.
    pub matches: &'a ArgMatches,
    /// Positional arguments after the command's flags.
    pub args: &'a [String],
}

impl fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("command", &self.command)
            .field("pre_args", &self.pre_args)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Trait for command handlers.
///
/// Handlers take `&mut self` allowing direct mutation of internal state.
///
/// # Example
///
/// ```rust
/// use cmdroute::{CommandContext, Handler, HandlerResult};
///
/// struct Counter { count: u32 }
///
/// impl Handler for Counter {
///     fn run(&mut self, _ctx: &CommandContext<'_>) -> HandlerResult {
///         self.count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Handler {
    /// Declares this command's flags into its flag context.
    ///
    /// The default declares none.
    fn flags(&self, flags: Command) -> Command {
        flags
    }

    /// Executes the command.
    fn run(&mut self, ctx: &CommandContext<'_>) -> HandlerResult;
}

/// Types a handler closure may return.
///
/// `()` for infallible handlers, or `Result<(), E>` for any error type that
/// converts into [`anyhow::Error`].
pub trait IntoHandlerResult {
    fn into_handler_result(self) -> HandlerResult;
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> HandlerResult {
        Ok(())
    }
}

impl<E> IntoHandlerResult for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    fn into_handler_result(self) -> HandlerResult {
        self.map_err(Into::into)
    }
}

type FlagsFn = Box<dyn Fn(Command) -> Command>;

/// A wrapper that implements [`Handler`] for `FnMut` closures.
///
/// # Example
///
/// ```rust
/// use clap::{Arg, ArgAction};
/// use cmdroute::{CommandContext, FnHandler};
///
/// let handler = FnHandler::new(|ctx: &CommandContext<'_>| {
///     if ctx.matches.get_flag("all") {
///         println!("everything");
///     }
/// })
/// .with_flags(|cmd| cmd.arg(Arg::new("all").long("all").action(ArgAction::SetTrue)));
/// ```
pub struct FnHandler<F, R = HandlerResult> {
    f: F,
    flags: Option<FlagsFn>,
    _phantom: PhantomData<fn() -> R>,
}

impl<F, R> FnHandler<F, R>
where
    F: FnMut(&CommandContext<'_>) -> R,
    R: IntoHandlerResult,
{
    /// Creates a new FnHandler wrapping the given FnMut closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            flags: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the function that declares this handler's flags.
    pub fn with_flags<G>(mut self, flags: G) -> Self
    where
        G: Fn(Command) -> Command + 'static,
    {
        self.flags = Some(Box::new(flags));
        self
    }
}

impl<F, R> Handler for FnHandler<F, R>
where
    F: FnMut(&CommandContext<'_>) -> R,
    R: IntoHandlerResult,
{
    fn flags(&self, flags: Command) -> Command {
        match &self.flags {
            Some(declare) => declare(flags),
            None => flags,
        }
    }

    fn run(&mut self, ctx: &CommandContext<'_>) -> HandlerResult {
        (self.f)(ctx).into_handler_result()
    }
}
