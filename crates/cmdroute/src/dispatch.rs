//! Running the handler a resolution selected.

use tracing::debug;

use crate::error::DispatchError;
use crate::handler::CommandContext;
use crate::registry::{HandlerSlot, Registry};
use crate::resolution::Resolution;

/// What [`Registry::dispatch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The resolution carries no command; nothing ran.
    NoMatch,
    /// The handler ran to completion.
    Ran,
    /// Help was asked for; the text is usage output for the caller to print.
    Usage(String),
}

impl Registry {
    /// Runs the handler of the command `resolution` matched.
    ///
    /// A set reserved help flag or the built-in help command produce
    /// [`Dispatched::Usage`] instead of running anything. Handler errors are
    /// returned unchanged in [`DispatchError::Handler`].
    pub fn dispatch(&mut self, resolution: &Resolution) -> Result<Dispatched, DispatchError> {
        let Some(matched) = resolution.matched() else {
            debug!("nothing to dispatch");
            return Ok(Dispatched::NoMatch);
        };
        let name = matched.name();

        if matched.help_requested() {
            debug!(command = %name, "help flag given");
            return Ok(Dispatched::Usage(self.command_usage(name)?));
        }

        let Some(descriptor) = self.commands.get_mut(name) else {
            return Err(DispatchError::Unregistered(name.to_string()));
        };
        if let HandlerSlot::Custom(handler) = &mut descriptor.handler {
            let ctx = CommandContext {
                command: name,
                globals: resolution.globals(),
                pre_args: resolution.pre_args(),
                matches: matched.matches(),
                args: matched.args(),
            };

            debug!(command = %name, "running handler");
            handler.run(&ctx).map_err(DispatchError::Handler)?;
            return Ok(Dispatched::Ran);
        }

        self.help_output(matched.args()).map(Dispatched::Usage)
    }

    /// Output of the built-in help command for `args`.
    fn help_output(&self, args: &[String]) -> Result<String, DispatchError> {
        match args {
            [topic] if self.commands.contains_key(topic) => {
                debug!(topic = %topic, "showing command help");
                Ok(self.command_usage(topic)?)
            }
            [topic] => Err(DispatchError::UnknownHelpTopic(topic.clone())),
            _ => Ok(self.usage()?),
        }
    }
}
