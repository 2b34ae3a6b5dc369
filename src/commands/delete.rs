use crate::commands::{Command, CommandError, CommandResult, task_at};
use crate::store::Model;

/// Deletes the task at a 1-based position of the filtered view.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCommand {
    pub index: usize,
}

impl DeleteCommand {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Command for DeleteCommand {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        let target = task_at(model, self.index)?;
        model.delete_task(&target)?;
        Ok(CommandResult::new(format!("Deleted Task: {target}")))
    }
}
