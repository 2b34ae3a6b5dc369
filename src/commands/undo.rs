use crate::commands::{Command, CommandError, CommandResult};
use crate::store::Model;

pub const MESSAGE_SUCCESS: &str = "Undid the most recent change";
pub const MESSAGE_NOTHING_TO_UNDO: &str = "Nothing to undo";

#[derive(Debug, Clone, Copy, Default)]
pub struct UndoCommand;

impl Command for UndoCommand {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        model.undo()?;
        Ok(CommandResult::new(MESSAGE_SUCCESS))
    }
}
