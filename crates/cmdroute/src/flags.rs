//! Flag contexts backed by clap.
//!
//! A flag context is a `clap::Command` that only declares flags and options.
//! Before parsing, a hidden trailing positional is appended to collect every
//! token from the first non-flag onwards, so parsing stops at the first
//! positional the same way for the global context and for command contexts:
//!
//! ```text
//! --verbose acme status --force x y
//! ^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^ residue
//! ```
//!
//! clap's own `--help`/`--version` flags are disabled; the reserved help flag
//! is injected explicitly when the registry settings ask for it.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

/// Id of the reserved per-command help flag (`-h`, `--help`).
pub const HELP_FLAG_ID: &str = "help";

const RESIDUE_ID: &str = "__cmdroute_residue";

/// Result of parsing tokens against a flag context.
#[derive(Debug, Clone)]
pub(crate) struct Parsed {
    pub matches: ArgMatches,
    pub residue: Vec<String>,
}

/// Creates an empty flag context.
///
/// A flag given more than once keeps its last value.
pub(crate) fn context(name: impl Into<String>) -> Command {
    Command::new(name.into())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .args_override_self(true)
        .color(ColorChoice::Never)
}

/// Adds the reserved `-h`/`--help` switch.
///
/// A handler that declares its own `help` id while the flag is reserved
/// trips clap's duplicate-id assertion.
pub(crate) fn with_help_flag(ctx: Command) -> Command {
    ctx.arg(
        Arg::new(HELP_FLAG_ID)
            .short('h')
            .long("help")
            .help("Show usage for this command")
            .action(ArgAction::SetTrue),
    )
}

/// Parses `tokens` against `ctx`, returning the matches and leftover tokens.
pub(crate) fn parse(ctx: &Command, tokens: &[String]) -> Result<Parsed, clap::Error> {
    let ctx = ctx.clone().arg(
        Arg::new(RESIDUE_ID)
            .num_args(1..)
            .trailing_var_arg(true)
            .hide(true),
    );

    let matches = ctx.try_get_matches_from(tokens)?;
    let residue = matches
        .get_many::<String>(RESIDUE_ID)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok(Parsed { matches, residue })
}

/// Whether the flag `id` was given on the command line.
///
/// Defaults and environment values do not count. Ids the context never
/// declared are reported as not set.
pub(crate) fn explicitly_set(ctx: &Command, matches: &ArgMatches, id: &str) -> bool {
    ctx.get_arguments().any(|arg| arg.get_id() == id)
        && matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// First line of a clap error, without the `error: ` prefix.
pub(crate) fn summarize(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
