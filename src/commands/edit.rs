use crate::commands::{Command, CommandError, CommandResult, task_at};
use crate::model::{DateTime, Description, Tag, Task};
use crate::store::Model;
use std::collections::BTreeSet;

pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";

/// Fields to change on an existing task. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskDescriptor {
    pub description: Option<Description>,
    pub tags: Option<BTreeSet<Tag>>,
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
    pub deadline: Option<DateTime>,
}

impl EditTaskDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.description.is_some()
            || self.tags.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.deadline.is_some()
    }

    /// Builds the edited task, re-checking the date rules on the result.
    pub fn apply(&self, original: &Task) -> Result<Task, CommandError> {
        let task = Task::new(
            self.description
                .clone()
                .unwrap_or_else(|| original.description.clone()),
            self.tags.clone().unwrap_or_else(|| original.tags.clone()),
            self.start.or(original.start),
            self.end.or(original.end),
            self.deadline.or(original.deadline),
        )?;
        Ok(task)
    }
}

#[derive(Debug, Clone)]
pub struct EditCommand {
    pub index: usize,
    pub descriptor: EditTaskDescriptor,
}

impl EditCommand {
    pub fn new(index: usize, descriptor: EditTaskDescriptor) -> Self {
        Self { index, descriptor }
    }
}

impl Command for EditCommand {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::new(MESSAGE_NOT_EDITED));
        }
        let original = task_at(model, self.index)?;
        let edited = self.descriptor.apply(&original)?;
        model.update_task(self.index - 1, edited.clone())?;
        Ok(CommandResult::new(format!("Edited Task: {edited}")))
    }
}
