//! Central logic controller.
//!
//! Owns the model and the command parser, runs one line of user input at a
//! time and persists the task list whenever the model reports a change.
//! Front-ends only talk to this type.
use crate::commands::{CommandError, CommandParser, CommandResult};
use crate::config::Config;
use crate::context::AppContext;
use crate::model::sample::sample_task_list;
use crate::model::{Task, TaskList};
use crate::storage::LocalStorage;
use crate::store::{Model, ModelEvent, ModelManager};
use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub struct TaskController {
    model: ModelManager,
    parser: CommandParser,
    /// `None` keeps everything in memory.
    storage_path: Option<PathBuf>,
    events: mpsc::UnboundedReceiver<ModelEvent>,
}

impl TaskController {
    pub fn new(mut model: ModelManager, parser: CommandParser, storage_path: Option<PathBuf>) -> Self {
        let events = model.subscribe();
        Self {
            model,
            parser,
            storage_path,
            events,
        }
    }

    /// Loads the task file named by `config` (or seeds sample data on a
    /// fresh installation) and builds a controller around it.
    pub fn start(ctx: &dyn AppContext, config: &Config) -> Result<Self> {
        let path = config.task_file_path(ctx)?;
        let initial = match LocalStorage::load(&path)? {
            Some(list) => list,
            None if config.load_sample_data => {
                log::info!("Fresh installation, loading sample tasks");
                sample_task_list()?
            }
            None => TaskList::new(),
        };
        let model = ModelManager::new(initial, config.undo_limit);
        Ok(Self::new(model, CommandParser::default(), Some(path)))
    }

    /// Parses and executes one line of input.
    ///
    /// A failed save does not fail the command: the change stays in memory
    /// and a warning is appended to the feedback.
    pub fn execute(&mut self, input: &str) -> Result<CommandResult, CommandError> {
        log::info!("Executing command: {}", input.trim());
        let command = self.parser.parse(input)?;
        let mut result = command.execute(&mut self.model).inspect_err(|e| {
            log::debug!("Command failed: {}", e);
        })?;

        if let Some(warning) = self.persist_changes() {
            result.feedback.push('\n');
            result.feedback.push_str(&warning);
        }
        Ok(result)
    }

    /// Drains pending model events and saves once if any arrived.
    fn persist_changes(&mut self) -> Option<String> {
        let mut changed = false;
        while let Ok(ModelEvent::TaskListChanged { total, shown }) = self.events.try_recv() {
            log::debug!("Task list changed: {} tasks, {} shown", total, shown);
            changed = true;
        }
        let path = self.storage_path.as_ref()?;
        if !changed {
            return None;
        }
        match LocalStorage::save(path, self.model.task_list()) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Failed to save tasks: {:#}", e);
                Some(format!("Warning: could not save tasks ({e:#})"))
            }
        }
    }

    pub fn model(&self) -> &ModelManager {
        &self.model
    }

    /// Tasks currently shown, numbered from 1 the way commands refer to them.
    pub fn numbered_tasks(&self) -> Vec<(usize, &Task)> {
        self.model
            .filtered_task_list()
            .into_iter()
            .enumerate()
            .map(|(i, t)| (i + 1, t))
            .collect()
    }
}
