use crate::commands::{Command, CommandError, CommandResult};
use crate::store::Model;

pub const MESSAGE_SUCCESS: &str = "Listed all tasks";

#[derive(Debug, Clone, Copy, Default)]
pub struct ListCommand;

impl Command for ListCommand {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        model.update_filtered_list_to_show_all();
        Ok(CommandResult::new(MESSAGE_SUCCESS))
    }
}
