// In-memory model: the backing task list, its filtered view and undo history.
use crate::error::{Result, TaskError};
use crate::model::{ReadOnlyTaskList, Task, TaskList};
use std::collections::{BTreeSet, VecDeque};
use tokio::sync::mpsc;

pub const DEFAULT_UNDO_LIMIT: usize = 20;

/// Sent to subscribers after every change to the backing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    TaskListChanged { total: usize, shown: usize },
}

/// The API of the model component, as seen by commands.
pub trait Model {
    /// Clears existing data and replaces it with `new_data`.
    fn reset_data(&mut self, new_data: &dyn ReadOnlyTaskList);

    fn task_list(&self) -> &dyn ReadOnlyTaskList;

    fn delete_task(&mut self, target: &Task) -> Result<()>;

    fn add_task(&mut self, task: Task) -> Result<()>;

    /// Replaces the task shown at `filtered_index` with `edited`.
    ///
    /// Fails with `IndexOutOfBounds` when the index is outside the filtered
    /// view and `DuplicateTask` when `edited` equals another task.
    fn update_task(&mut self, filtered_index: usize, edited: Task) -> Result<()>;

    /// The tasks currently shown, in backing-list order.
    fn filtered_task_list(&self) -> Vec<&Task>;

    fn update_filtered_list_to_show_all(&mut self);

    /// Shows only tasks whose description or tags contain any of `keywords`.
    fn update_filtered_task_list(&mut self, keywords: BTreeSet<String>);

    /// Restores the backing list as it was before the last mutation.
    fn undo(&mut self) -> Result<()>;
}

#[derive(Debug)]
pub struct ModelManager {
    task_list: TaskList,
    filter: Option<BTreeSet<String>>,
    // Positions in `task_list` of the tasks in the filtered view.
    filtered: Vec<usize>,
    // Bumped whenever the filtered view is recomputed.
    revision: u64,
    history: VecDeque<TaskList>,
    undo_limit: usize,
    subscribers: Vec<mpsc::UnboundedSender<ModelEvent>>,
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(TaskList::new(), DEFAULT_UNDO_LIMIT)
    }
}

impl ModelManager {
    pub fn new(initial: TaskList, undo_limit: usize) -> Self {
        log::debug!(
            "Initializing model with {} tasks (undo limit {})",
            initial.len(),
            undo_limit
        );
        let mut model = Self {
            task_list: initial,
            filter: None,
            filtered: Vec::new(),
            revision: 0,
            history: VecDeque::new(),
            undo_limit,
            subscribers: Vec::new(),
        };
        model.refilter();
        model
    }

    /// Returns a receiver that gets a `ModelEvent` after every mutation.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ModelEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Changes whenever the filtered view may have changed, so front-ends
    /// know when to redraw.
    pub fn view_revision(&self) -> u64 {
        self.revision
    }

    fn refilter(&mut self) {
        self.filtered = self
            .task_list
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, t)| self.filter.as_ref().is_none_or(|k| t.matches_any_keyword(k)))
            .map(|(i, _)| i)
            .collect();
        self.revision += 1;
    }

    fn record(&mut self, snapshot: TaskList) {
        if self.undo_limit == 0 {
            return;
        }
        if self.history.len() == self.undo_limit {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
    }

    /// Recomputes the filtered view and tells subscribers.
    fn indicate_changed(&mut self) {
        self.refilter();
        let event = ModelEvent::TaskListChanged {
            total: self.task_list.len(),
            shown: self.filtered.len(),
        };
        // Receivers that went away are dropped.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

impl Model for ModelManager {
    fn reset_data(&mut self, new_data: &dyn ReadOnlyTaskList) {
        let snapshot = self.task_list.clone();
        self.task_list.reset_data(new_data);
        log::debug!("Model reset to {} tasks", self.task_list.len());
        self.record(snapshot);
        self.indicate_changed();
    }

    fn task_list(&self) -> &dyn ReadOnlyTaskList {
        &self.task_list
    }

    fn delete_task(&mut self, target: &Task) -> Result<()> {
        let snapshot = self.task_list.clone();
        self.task_list.remove_task(target)?;
        log::debug!("Deleted task '{}'", target.description);
        self.record(snapshot);
        self.indicate_changed();
        Ok(())
    }

    fn add_task(&mut self, task: Task) -> Result<()> {
        let snapshot = self.task_list.clone();
        log::debug!("Adding task '{}'", task.description);
        self.task_list.add_task(task)?;
        self.record(snapshot);
        self.indicate_changed();
        Ok(())
    }

    fn update_task(&mut self, filtered_index: usize, edited: Task) -> Result<()> {
        let index = *self
            .filtered
            .get(filtered_index)
            .ok_or(TaskError::IndexOutOfBounds {
                index: filtered_index,
                len: self.filtered.len(),
            })?;
        let snapshot = self.task_list.clone();
        let previous = self.task_list.replace_task(index, edited)?;
        log::debug!("Updated task '{}'", previous.description);
        self.record(snapshot);
        self.indicate_changed();
        Ok(())
    }

    fn filtered_task_list(&self) -> Vec<&Task> {
        self.filtered
            .iter()
            .filter_map(|&i| self.task_list.get(i))
            .collect()
    }

    fn update_filtered_list_to_show_all(&mut self) {
        self.filter = None;
        self.refilter();
    }

    fn update_filtered_task_list(&mut self, keywords: BTreeSet<String>) {
        log::debug!("Filtering by keywords {:?}", keywords);
        self.filter = Some(keywords);
        self.refilter();
    }

    fn undo(&mut self) -> Result<()> {
        let previous = self.history.pop_back().ok_or(TaskError::NothingToUndo)?;
        log::debug!(
            "Undo: {} tasks -> {} tasks",
            self.task_list.len(),
            previous.len()
        );
        self.task_list = previous;
        self.indicate_changed();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keyword_set;

    fn model_with(descs: &[&str]) -> ModelManager {
        let tasks = descs.iter().map(|d| Task::floating(d, &[] as &[&str]).unwrap());
        ModelManager::new(TaskList::from_tasks(tasks).unwrap(), DEFAULT_UNDO_LIMIT)
    }

    #[test]
    fn test_history_is_bounded() {
        let mut model = ModelManager::new(TaskList::new(), 2);
        for d in ["a", "b", "c"] {
            model.add_task(Task::floating(d, &[] as &[&str]).unwrap()).unwrap();
        }
        assert!(model.undo().is_ok());
        assert!(model.undo().is_ok());
        assert_eq!(model.undo(), Err(TaskError::NothingToUndo));
        assert_eq!(model.task_list().len(), 1);
    }

    #[test]
    fn test_failed_mutation_leaves_no_history() {
        let mut model = model_with(&["a"]);
        let dup = Task::floating("a", &[] as &[&str]).unwrap();
        assert_eq!(model.add_task(dup), Err(TaskError::DuplicateTask));
        assert!(!model.can_undo());
    }

    #[test]
    fn test_update_resolves_against_filtered_view() {
        let mut model = model_with(&["alpha one", "beta two", "gamma one"]);
        model.update_filtered_task_list(keyword_set(&["one"]));
        let edited = Task::floating("gamma three", &[] as &[&str]).unwrap();
        model.update_task(1, edited.clone()).unwrap();
        assert_eq!(model.task_list().tasks()[2], edited);
        // Edited task no longer matches the active filter.
        assert_eq!(model.filtered_task_list().len(), 1);
    }

    #[test]
    fn test_subscribers_are_notified() {
        let mut model = model_with(&["a"]);
        let mut rx = model.subscribe();
        model.add_task(Task::floating("b", &[] as &[&str]).unwrap()).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            ModelEvent::TaskListChanged { total: 2, shown: 2 }
        );
        // Filter changes alone are not mutations.
        model.update_filtered_task_list(keyword_set(&["zzz"]));
        assert!(rx.try_recv().is_err());

        drop(rx);
        model.add_task(Task::floating("c", &[] as &[&str]).unwrap()).unwrap();
        assert!(model.subscribers.is_empty());
    }
}
