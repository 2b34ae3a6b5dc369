use crate::commands::{Command, CommandError, CommandResult};
use crate::model::TaskList;
use crate::store::Model;

pub const MESSAGE_SUCCESS: &str = "All tasks have been cleared!";

/// Clears the task manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        model.reset_data(&TaskList::new());
        Ok(CommandResult::new(MESSAGE_SUCCESS))
    }
}
