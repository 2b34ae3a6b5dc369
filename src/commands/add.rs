use crate::commands::{Command, CommandError, CommandResult};
use crate::model::Task;
use crate::store::Model;

#[derive(Debug, Clone)]
pub struct AddCommand {
    pub task: Task,
}

impl AddCommand {
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

impl Command for AddCommand {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        model.add_task(self.task.clone())?;
        Ok(CommandResult::new(format!("New task added: {}", self.task)))
    }
}
