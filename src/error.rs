// Error types shared by the model layer.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

/// Failures raised by the task model. None of them is fatal: the command
/// layer turns each one into a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// An insert or update would make two tasks equal.
    #[error("Operation would result in duplicate tasks")]
    DuplicateTask,

    /// The task to delete or replace is not in the list.
    #[error("Cannot find the specified task")]
    TaskNotFound,

    /// A field value failed validation (blank description, bad tag, unparsable date...).
    #[error("{0}")]
    IllegalValue(String),

    /// A filtered-view index outside `0..len`.
    #[error("Index {index} is out of bounds for a list of {len} tasks")]
    IndexOutOfBounds { index: usize, len: usize },

    /// `undo` called with an empty history.
    #[error("There is no change to undo")]
    NothingToUndo,
}

impl TaskError {
    pub fn illegal(msg: impl Into<String>) -> Self {
        Self::IllegalValue(msg.into())
    }
}
