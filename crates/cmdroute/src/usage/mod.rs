//! Usage text.
//!
//! Both views are rendered with minijinja from plain `Serialize` data. Name
//! columns are padded in Rust so the templates stay free of layout logic.

use clap::{Arg, Command};
use minijinja::Environment;
use serde::Serialize;

use crate::error::{ResolveError, UsageError};
use crate::registry::{CommandDescriptor, Registry};

const NAME_COLUMN_WIDTH: usize = 15;

const USAGE_TEMPLATE: &str = "usage.txt";
const COMMAND_TEMPLATE: &str = "command.txt";

/// One row of a two-column listing.
#[derive(Debug, Serialize)]
struct Entry {
    label: String,
    padding: String,
    about: String,
}

impl Entry {
    fn new(label: String, about: String) -> Self {
        let padding = if about.is_empty() {
            String::new()
        } else {
            " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(label.len()) + 1)
        };
        Self {
            label,
            padding,
            about,
        }
    }
}

#[derive(Debug, Serialize)]
struct UsageData {
    program: String,
    usage: String,
    pre_args: Vec<Entry>,
    commands: Vec<Entry>,
    flags: Vec<Entry>,
    help_hint: bool,
}

#[derive(Debug, Serialize)]
struct CommandData {
    description: String,
    usage: String,
    flags: Vec<Entry>,
    required: Vec<String>,
}

fn environment() -> Result<Environment<'static>, UsageError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(USAGE_TEMPLATE, include_str!("usage.txt"))?;
    env.add_template(COMMAND_TEMPLATE, include_str!("command.txt"))?;
    Ok(env)
}

fn render<S: Serialize>(name: &str, data: S) -> Result<String, UsageError> {
    let env = environment()?;
    let template = env.get_template(name)?;
    Ok(template.render(data)?)
}

/// Visible flags of `ctx`, in display order.
fn flag_entries(ctx: &Command) -> Vec<Entry> {
    let mut args: Vec<&Arg> = ctx.get_arguments().filter(|a| !a.is_hide_set()).collect();
    args.sort_by_key(|a| a.get_display_order());
    args.into_iter().map(flag_entry).collect()
}

fn flag_entry(arg: &Arg) -> Entry {
    let mut label = String::new();
    if let Some(short) = arg.get_short() {
        label.push_str(&format!("-{}", short));
    }
    if let Some(long) = arg.get_long() {
        if !label.is_empty() {
            label.push_str(", ");
        }
        label.push_str(&format!("--{}", long));
    }
    if label.is_empty() {
        label = arg.get_id().to_string();
    }

    let takes_value = arg.get_action().takes_values();
    if takes_value {
        let value_name = arg
            .get_value_names()
            .and_then(|names| names.first())
            .map(|name| name.to_string())
            .unwrap_or_else(|| arg.get_id().as_str().to_uppercase());
        label.push_str(&format!(" <{}>", value_name));
    }

    let mut about = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
    if takes_value {
        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();
        if !defaults.is_empty() {
            if !about.is_empty() {
                about.push(' ');
            }
            about.push_str(&format!("[default: {}]", defaults.join(",")));
        }
    }

    Entry::new(label, about)
}

impl Registry {
    /// Program-level usage: pre-arguments, commands and global flags.
    pub fn usage(&self) -> Result<String, UsageError> {
        let program = self.settings.program.clone();

        let mut usage = program.clone();
        for decl in &self.pre_args {
            usage.push_str(&format!(" <{}>", decl.name));
        }
        usage.push_str(" <command>");

        let data = UsageData {
            usage,
            pre_args: self
                .pre_args
                .iter()
                .map(|decl| Entry::new(decl.name.clone(), decl.description.clone()))
                .collect(),
            commands: self
                .commands
                .values()
                .map(|cmd| Entry::new(cmd.name.clone(), cmd.description.clone()))
                .collect(),
            flags: flag_entries(&self.globals),
            help_hint: self.settings.reserve_help_flag && !self.commands.is_empty(),
            program,
        };
        render(USAGE_TEMPLATE, data)
    }

    /// Usage of a single command.
    pub fn command_usage(&self, name: &str) -> Result<String, UsageError> {
        let descriptor = self
            .commands
            .get(name)
            .ok_or_else(|| UsageError::UnknownCommand(name.to_string()))?;
        render(COMMAND_TEMPLATE, self.command_data(descriptor))
    }

    fn command_data(&self, descriptor: &CommandDescriptor) -> CommandData {
        let mut usage = self.settings.program.clone();
        for decl in &self.pre_args {
            usage.push_str(&format!(" <{}>", decl.name));
        }
        usage.push(' ');
        usage.push_str(&descriptor.name);
        if let Some(spec) = descriptor.arguments.as_ref().filter(|s| !s.is_empty()) {
            usage.push(' ');
            usage.push_str(&spec.to_string());
        }

        CommandData {
            description: descriptor.description.clone(),
            usage,
            flags: flag_entries(&self.flag_context(descriptor)),
            required: descriptor.required_flags.clone(),
        }
    }

    /// The message printed for a failed resolution: `<program>: <error>`,
    /// then the usage of the command it names, or the program usage.
    pub fn error_usage(&self, err: &ResolveError) -> Result<String, UsageError> {
        let mut out = format!("{}: {}\n", self.settings.program, err);
        match err.command().filter(|name| self.commands.contains_key(*name)) {
            Some(name) => out.push_str(&self.command_usage(name)?),
            None => out.push_str(&self.usage()?),
        }
        Ok(out)
    }
}
