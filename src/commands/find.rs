use crate::commands::{Command, CommandError, CommandResult};
use crate::store::Model;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct FindCommand {
    pub keywords: BTreeSet<String>,
}

impl FindCommand {
    pub fn new(keywords: BTreeSet<String>) -> Self {
        Self { keywords }
    }
}

impl Command for FindCommand {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        model.update_filtered_task_list(self.keywords.clone());
        let shown = model.filtered_task_list().len();
        Ok(CommandResult::new(format!("{shown} tasks listed!")))
    }
}
