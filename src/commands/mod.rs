//! User-facing commands.
//!
//! Every verb the user can type is a small struct implementing [`Command`].
//! The [`parser::CommandParser`] turns a line of input into one of them and
//! `execute` applies it to a [`Model`]. A command either succeeds with a
//! feedback message or fails with a [`CommandError`]; on failure the model is
//! left untouched.
pub mod add;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod exit;
pub mod find;
pub mod help;
pub mod list;
pub mod parser;
pub mod undo;

use crate::error::TaskError;
use crate::model::Task;
use crate::store::Model;
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

pub use add::AddCommand;
pub use clear::ClearCommand;
pub use delete::DeleteCommand;
pub use edit::{EditCommand, EditTaskDescriptor};
pub use exit::ExitCommand;
pub use find::FindCommand;
pub use help::HelpCommand;
pub use list::ListCommand;
pub use parser::CommandParser;
pub use undo::UndoCommand;

pub const MESSAGE_INVALID_TASK_DISPLAYED_INDEX: &str = "The task index provided is invalid";
pub const MESSAGE_DUPLICATE_TASK: &str = "This task already exists in the task manager";
pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    /// Set by `exit`: the front-end should stop reading input.
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: false,
        }
    }

    pub fn exiting(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: true,
        }
    }
}

/// A failure to parse or execute a command, carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn invalid_format(word: CommandWord) -> Self {
        Self::new(format!("Invalid command format! \n{}", word.usage()))
    }
}

impl From<TaskError> for CommandError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::DuplicateTask => Self::new(MESSAGE_DUPLICATE_TASK),
            TaskError::TaskNotFound => Self::new("The target task cannot be missing"),
            TaskError::IndexOutOfBounds { .. } => Self::new(MESSAGE_INVALID_TASK_DISPLAYED_INDEX),
            TaskError::IllegalValue(msg) => Self::new(msg),
            TaskError::NothingToUndo => Self::new(undo::MESSAGE_NOTHING_TO_UNDO),
        }
    }
}

pub trait Command: fmt::Debug {
    fn execute(&self, model: &mut dyn Model) -> Result<CommandResult, CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CommandWord {
    Add,
    Delete,
    Edit,
    Clear,
    Find,
    List,
    Undo,
    Help,
    Exit,
}

impl CommandWord {
    pub fn usage(&self) -> &'static str {
        match self {
            CommandWord::Add => {
                "add: Adds a task to the task manager.\n\
                 Parameters: DESCRIPTION [by/DATETIME] [from/DATETIME to/DATETIME] [#TAG]...\n\
                 Example: add Submit report by/friday 5pm #work"
            }
            CommandWord::Delete => {
                "delete: Deletes the task identified by the index number used in the last task listing.\n\
                 Parameters: INDEX (must be a positive integer)\n\
                 Example: delete 1"
            }
            CommandWord::Edit => {
                "edit: Edits the task identified by the index number used in the last task listing. \
                 Fields that are not given keep their value; any #TAG replaces all tags, a lone # removes them.\n\
                 Parameters: INDEX [DESCRIPTION] [by/DATETIME] [from/DATETIME] [to/DATETIME] [#TAG]...\n\
                 Example: edit 1 by/tomorrow 3pm"
            }
            CommandWord::Clear => "clear: Clears all tasks.\nExample: clear",
            CommandWord::Find => {
                "find: Finds all tasks whose description or tags contain any of the keywords \
                 (case-insensitive) and displays them as a list with index numbers.\n\
                 Parameters: KEYWORD [MORE_KEYWORDS]...\n\
                 Example: find school dance"
            }
            CommandWord::List => "list: Lists all tasks.\nExample: list",
            CommandWord::Undo => "undo: Reverts the most recent change to the task list.\nExample: undo",
            CommandWord::Help => "help: Shows program usage instructions.\nExample: help",
            CommandWord::Exit => "exit: Exits the program.\nExample: exit",
        }
    }
}

/// Looks up the task shown at the 1-based `index` of the filtered view.
pub(crate) fn task_at(model: &dyn Model, index: usize) -> Result<Task, CommandError> {
    index
        .checked_sub(1)
        .and_then(|i| model.filtered_task_list().get(i).map(|t| (*t).clone()))
        .ok_or_else(|| CommandError::new(MESSAGE_INVALID_TASK_DISPLAYED_INDEX))
}
