// Ordered task collection that rejects duplicate values.
use crate::error::{Result, TaskError};
use crate::model::item::Task;
use serde::{Deserialize, Serialize};

/// Read access shared by the model and the storage layer.
pub trait ReadOnlyTaskList {
    fn tasks(&self) -> &[Task];

    fn len(&self) -> usize {
        self.tasks().len()
    }

    fn is_empty(&self) -> bool {
        self.tasks().is_empty()
    }

    fn contains(&self, task: &Task) -> bool {
        self.tasks().contains(task)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from `tasks` in order, failing on the first duplicate.
    pub fn from_tasks<I: IntoIterator<Item = Task>>(tasks: I) -> Result<Self> {
        let mut list = Self::new();
        for task in tasks {
            list.add_task(task)?;
        }
        Ok(list)
    }

    pub fn add_task(&mut self, task: Task) -> Result<()> {
        if self.contains(&task) {
            return Err(TaskError::DuplicateTask);
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn remove_task(&mut self, target: &Task) -> Result<Task> {
        let idx = self.position(target).ok_or(TaskError::TaskNotFound)?;
        Ok(self.tasks.remove(idx))
    }

    /// Replaces the task at `index` (backing-list position) and returns the
    /// previous value. Replacing a task with an equal value is allowed.
    pub fn replace_task(&mut self, index: usize, edited: Task) -> Result<Task> {
        let len = self.tasks.len();
        if index >= len {
            return Err(TaskError::IndexOutOfBounds { index, len });
        }
        let collides = self
            .tasks
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && *t == edited);
        if collides {
            return Err(TaskError::DuplicateTask);
        }
        Ok(std::mem::replace(&mut self.tasks[index], edited))
    }

    pub fn reset_data(&mut self, new_data: &dyn ReadOnlyTaskList) {
        self.tasks = new_data.tasks().to_vec();
    }

    pub fn position(&self, target: &Task) -> Option<usize> {
        self.tasks.iter().position(|t| t == target)
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }
}

impl ReadOnlyTaskList for TaskList {
    fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
