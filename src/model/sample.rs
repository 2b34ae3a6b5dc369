// Tasks used to populate a fresh installation.
use crate::error::Result;
use crate::model::{Task, TaskList};

pub fn sample_tasks() -> Result<Vec<Task>> {
    Ok(vec![
        Task::floating("Read Lord of The Rings", &["reading"])?,
        Task::floating("Do CS2103 V0.1", &["school", "homework"])?,
        Task::floating("Learn airflares", &["dance"])?,
        Task::floating("Design RPG using RPG Maker VX Ace", &["gamedesign"])?,
    ])
}

pub fn sample_task_list() -> Result<TaskList> {
    TaskList::from_tasks(sample_tasks()?)
}
