use crate::commands::{Command, CommandError, CommandResult, CommandWord};
use crate::store::Model;
use strum::IntoEnumIterator;

/// Lists the usage of every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        let text = CommandWord::iter()
            .map(|w| w.usage())
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(CommandResult::new(text))
    }
}
