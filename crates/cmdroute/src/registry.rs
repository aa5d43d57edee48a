//! Command registration.
//!
//! A [`Registry`] holds everything resolution needs: the global flag
//! context, the ordered pre-argument declarations, the registered commands,
//! and the [`Settings`] that switch help behaviour on and off.
//!
//! ```rust
//! use cmdroute::{CommandContext, FnHandler, Registry};
//!
//! let mut registry = Registry::new("repoctl");
//! let org = registry.pre_arg("org", "Organization that owns the repository");
//! registry
//!     .command("push", "Push a branch", FnHandler::new(|_ctx: &CommandContext<'_>| {}))
//!     .arguments(["branch", "..."])?;
//!
//! let resolution = registry.resolve(["acme", "push", "main", "a", "b"])?;
//! assert_eq!(resolution.pre_args().value(&org), Some("acme"));
//! assert_eq!(resolution.args(), ["main", "a", "b"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use clap::{Arg, Command};
use cmdroute_args::ArgSpec;
use tracing::{debug, warn};

use crate::error::SetupError;
use crate::flags;
use crate::handler::Handler;
use crate::resolution::PreArgHandle;

/// Name under which [`Registry::enable_help_command`] registers its command.
pub const HELP_COMMAND: &str = "help";

const HELP_COMMAND_DESCRIPTION: &str = "Displays usage string of commands";

/// Registry-wide behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Program name shown in usage text.
    pub program: String,

    /// Inject `-h`/`--help` into every command's flag context. Turned off by
    /// [`Registry::enable_help_command`].
    pub reserve_help_flag: bool,

    /// Skip pre-arguments when the first positional token is `help`.
    pub help_bypasses_pre_args: bool,
}

impl Settings {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            program: program_name(),
            reserve_help_flag: true,
            help_bypasses_pre_args: false,
        }
    }
}

/// File name of argv[0], or `app` when it is unavailable.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_ref()
        .and_then(|arg0| std::path::Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

pub(crate) enum HandlerSlot {
    Custom(Box<dyn Handler>),
    Help,
}

/// A registered command.
pub struct CommandDescriptor {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) handler: HandlerSlot,
    pub(crate) required_flags: Vec<String>,
    pub(crate) arguments: Option<ArgSpec>,
}

impl CommandDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Flag ids that must be given on the command line.
    pub fn required_flags(&self) -> &[String] {
        &self.required_flags
    }

    /// Positional argument shape; `None` disables arity checking.
    pub fn arguments(&self) -> Option<&ArgSpec> {
        self.arguments.as_ref()
    }

    /// Whether this is the command installed by [`Registry::enable_help_command`].
    pub fn is_builtin_help(&self) -> bool {
        matches!(self.handler, HandlerSlot::Help)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("required_flags", &self.required_flags)
            .field("arguments", &self.arguments)
            .field("builtin_help", &self.is_builtin_help())
            .finish_non_exhaustive()
    }
}

/// A declared pre-argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreArgDecl {
    pub(crate) name: String,
    pub(crate) description: String,
}

impl PreArgDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Configures a command right after [`Registry::command`].
pub struct CommandBuilder<'a> {
    descriptor: &'a mut CommandDescriptor,
}

impl CommandBuilder<'_> {
    /// Requires the flag with clap id `id` to be given explicitly.
    pub fn required_flag(self, id: impl Into<String>) -> Self {
        self.descriptor.required_flags.push(id.into());
        self
    }

    pub fn required_flags<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor
            .required_flags
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Declares the positional arguments from pattern strings: `name`,
    /// `[name]` or `...`.
    ///
    /// Repeated calls append slots.
    pub fn arguments<I, S>(self, patterns: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let spec = ArgSpec::parse(patterns).map_err(|source| SetupError::Pattern {
            command: self.descriptor.name.clone(),
            source,
        })?;
        Ok(self.argument_spec(spec))
    }

    /// Appends the slots of an already parsed spec.
    pub fn argument_spec(self, spec: ArgSpec) -> Self {
        let arguments = self.descriptor.arguments.get_or_insert_with(ArgSpec::new);
        for slot in spec.slots() {
            arguments.push(slot.clone());
        }

        let unreachable = arguments.unreachable_slots();
        if !unreachable.is_empty() {
            warn!(
                command = %self.descriptor.name,
                slots = ?unreachable,
                "argument slots after a variadic slot never receive a value"
            );
        }
        self
    }
}

/// Commands, pre-arguments and global flags of one CLI.
pub struct Registry {
    pub(crate) settings: Settings,
    pub(crate) globals: Command,
    pub(crate) commands: BTreeMap<String, CommandDescriptor>,
    pub(crate) pre_args: Vec<PreArgDecl>,
}

impl Registry {
    /// Creates an empty registry for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_settings(Settings::new(program))
    }

    /// Creates an empty registry named after argv[0].
    pub fn from_env() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let globals = flags::context(settings.program.clone());
        Self {
            settings,
            globals,
            commands: BTreeMap::new(),
            pre_args: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Declares a global flag, parsed before pre-arguments and the command.
    pub fn global_arg(&mut self, arg: Arg) -> &mut Self {
        let globals = std::mem::replace(&mut self.globals, Command::new(""));
        self.globals = globals.arg(arg);
        self
    }

    /// The global flag context.
    pub fn globals(&self) -> &Command {
        &self.globals
    }

    /// Registers `handler` under `name`, replacing any earlier command with
    /// the same name.
    ///
    /// The name is not validated. Registering `help` replaces the built-in
    /// help command.
    pub fn command<H>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: H,
    ) -> CommandBuilder<'_>
    where
        H: Handler + 'static,
    {
        self.insert(
            name.into(),
            description.into(),
            HandlerSlot::Custom(Box::new(handler)),
        )
    }

    fn insert(
        &mut self,
        name: String,
        description: String,
        handler: HandlerSlot,
    ) -> CommandBuilder<'_> {
        let descriptor = CommandDescriptor {
            name: name.clone(),
            description,
            handler,
            required_flags: Vec::new(),
            arguments: None,
        };

        let descriptor = match self.commands.entry(name) {
            Entry::Occupied(mut entry) => {
                debug!(command = %entry.key(), "replacing registered command");
                entry.insert(descriptor);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(descriptor),
        };

        CommandBuilder { descriptor }
    }

    /// Registers the `help` command and frees `-h` for commands to use.
    ///
    /// `help <command>` shows that command's usage; `help` with zero or
    /// several arguments shows the program usage. Call before resolving.
    pub fn enable_help_command(&mut self) -> &mut Self {
        self.settings.reserve_help_flag = false;
        self.insert(
            HELP_COMMAND.to_string(),
            HELP_COMMAND_DESCRIPTION.to_string(),
            HandlerSlot::Help,
        );
        self
    }

    /// Lets `help` run without the pre-arguments; their values stay unset.
    pub fn enable_help_bypass(&mut self) -> &mut Self {
        self.settings.help_bypasses_pre_args = true;
        self
    }

    /// Declares a positional argument read before the command name.
    pub fn pre_arg(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> PreArgHandle {
        let name = name.into();
        let handle = PreArgHandle::new(self.pre_args.len(), name.clone());
        self.pre_args.push(PreArgDecl {
            name,
            description: description.into(),
        });
        handle
    }

    /// Removes every pre-argument declaration.
    pub fn clear_pre_args(&mut self) {
        self.pre_args.clear();
    }

    pub fn pre_arg_decls(&self) -> &[PreArgDecl] {
        &self.pre_args
    }

    pub fn descriptor(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    /// Registered command names, sorted.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Builds a fresh flag context for `descriptor`.
    pub(crate) fn flag_context(&self, descriptor: &CommandDescriptor) -> Command {
        let ctx = flags::context(descriptor.name.clone());
        let ctx = match &descriptor.handler {
            HandlerSlot::Custom(handler) => handler.flags(ctx),
            HandlerSlot::Help => ctx,
        };

        if self.settings.reserve_help_flag {
            flags::with_help_flag(ctx)
        } else {
            ctx
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("settings", &self.settings)
            .field("commands", &self.commands)
            .field("pre_args", &self.pre_args)
            .finish_non_exhaustive()
    }
}
