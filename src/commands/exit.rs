use crate::commands::{Command, CommandError, CommandResult};
use crate::store::Model;

pub const MESSAGE_EXIT_ACKNOWLEDGEMENT: &str = "Exiting Watodo as requested ...";

#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::exiting(MESSAGE_EXIT_ACKNOWLEDGEMENT))
    }
}
