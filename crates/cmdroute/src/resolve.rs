//! The resolution engine.
//!
//! Resolution decomposes the argument vector in a fixed order and stops at
//! the first stage that cannot complete:
//!
//! ```text
//! raw args
//!   → global flags          (FlagError)
//!   → pre-arguments         (NoPreArg)
//!   → command name          (NoCommand, InvalidCommand)
//!   → command flags         (FlagError)
//!   → required flags        (InvalidCommand)
//!   → argument arity        (ArgError)
//!   → Resolution
//! ```

use tracing::{debug, trace};

use crate::error::{Failure, ResolveError};
use crate::flags;
use crate::registry::{Registry, HELP_COMMAND};
use crate::resolution::{Matched, PreArgs, Resolution};

impl Registry {
    /// Resolves an argument vector, excluding the program name.
    ///
    /// Every call builds fresh flag contexts, so a registry can resolve any
    /// number of argument vectors.
    pub fn resolve<I, S>(&self, args: I) -> Result<Resolution, ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        trace!(args = ?args, "resolving");

        let parsed = flags::parse(&self.globals, &args)
            .map_err(|source| ResolveError::new(Failure::Flags { command: None, source }))?;
        let globals = parsed.matches;
        let residue = parsed.residue;
        debug!(residue = ?residue, "parsed global flags");

        if self.commands.is_empty() {
            debug!("no commands registered");
            return Ok(Resolution {
                globals,
                pre_args: PreArgs::default(),
                help_bypassed: false,
                matched: None,
            });
        }

        let help_bypassed = self.settings.help_bypasses_pre_args
            && residue.first().map(String::as_str) == Some(HELP_COMMAND);

        let (pre_args, command_index) = if help_bypassed {
            debug!("help requested, skipping pre-arguments");
            (PreArgs::default(), 0)
        } else {
            let expected = self.pre_args.len();
            if residue.len() < expected {
                return Err(ResolveError::new(Failure::MissingPreArgs {
                    expected,
                    found: residue.len(),
                })
                .with_globals(globals));
            }

            let values = self
                .pre_args
                .iter()
                .zip(&residue)
                .map(|(decl, value)| (decl.name.clone(), value.clone()))
                .collect();
            (PreArgs::from_pairs(values), expected)
        };

        let Some(name) = residue.get(command_index) else {
            return Err(ResolveError::new(Failure::MissingCommand)
                .with_globals(globals)
                .with_pre_args(pre_args));
        };

        let Some(descriptor) = self.commands.get(name) else {
            debug!(command = %name, "unknown command");
            return Err(
                ResolveError::new(Failure::UnknownCommand { name: name.clone() })
                    .with_globals(globals)
                    .with_pre_args(pre_args),
            );
        };
        debug!(command = %name, "matched command");

        let ctx = self.flag_context(descriptor);
        let parsed = match flags::parse(&ctx, &residue[command_index + 1..]) {
            Ok(parsed) => parsed,
            Err(source) => {
                return Err(ResolveError::new(Failure::Flags {
                    command: Some(name.clone()),
                    source,
                })
                .with_globals(globals)
                .with_pre_args(pre_args));
            }
        };

        let missing: Vec<String> = descriptor
            .required_flags
            .iter()
            .filter(|id| !flags::explicitly_set(&ctx, &parsed.matches, id))
            .cloned()
            .collect();

        let help_requested =
            self.settings.reserve_help_flag && parsed.matches.get_flag(flags::HELP_FLAG_ID);
        let matched = Matched {
            name: name.clone(),
            matches: parsed.matches,
            args: parsed.residue,
            help_requested,
        };

        if !missing.is_empty() {
            debug!(command = %name, missing = ?missing, "required flags not given");
            return Err(ResolveError::new(Failure::MissingRequiredFlags {
                command: name.clone(),
                missing,
            })
            .with_globals(globals)
            .with_pre_args(pre_args)
            .with_matched(matched));
        }

        if let Some(spec) = &descriptor.arguments {
            if let Err(source) = spec.validate(&matched.args) {
                debug!(command = %name, args = ?matched.args, "{}", source);
                return Err(ResolveError::new(Failure::Arity {
                    command: name.clone(),
                    source,
                })
                .with_globals(globals)
                .with_pre_args(pre_args)
                .with_matched(matched));
            }
        }

        Ok(Resolution {
            globals,
            pre_args,
            help_bypassed,
            matched: Some(matched),
        })
    }
}
