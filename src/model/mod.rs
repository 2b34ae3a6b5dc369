// File: ./src/model/mod.rs
pub mod datetime;
pub mod item;
pub mod matcher;
pub mod nlp;
pub mod sample;
pub mod task_list;

pub use datetime::{DateGroup, DateParser, DateTime};
pub use item::{Description, Tag, Task, TaskKind, tag_set};
pub use matcher::keyword_set;
pub use nlp::NaturalDateParser;
pub use task_list::{ReadOnlyTaskList, TaskList};
