use crate::error::{Result, TaskError};
use crate::model::datetime::DateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum::Display;

pub const MESSAGE_DESCRIPTION_CONSTRAINTS: &str =
    "Task descriptions can take any values, and it should not be blank";
pub const MESSAGE_TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";
pub const MESSAGE_START_WITHOUT_END: &str = "An event with a start time must also have an end time";
pub const MESSAGE_END_WITHOUT_START: &str = "An event with an end time must also have a start time";
pub const MESSAGE_START_AFTER_END: &str = "The start time of a task must not be after its end time";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TaskError::illegal(MESSAGE_DESCRIPTION_CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single alphanumeric label attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TaskError::illegal(MESSAGE_TAG_CONSTRAINTS));
        }
        Ok(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Builds a tag set, rejecting the first invalid name.
pub fn tag_set<S: AsRef<str>>(names: &[S]) -> Result<BTreeSet<Tag>> {
    names.iter().map(|n| Tag::new(n.as_ref())).collect()
}

/// Derived from which date fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TaskKind {
    Floating,
    Deadline,
    Event,
}

/// A to-do entry. Two tasks are the same task when every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub description: Description,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime>,
}

impl Task {
    pub fn new(
        description: Description,
        tags: BTreeSet<Tag>,
        start: Option<DateTime>,
        end: Option<DateTime>,
        deadline: Option<DateTime>,
    ) -> Result<Self> {
        let task = Self {
            description,
            tags,
            start,
            end,
            deadline,
        };
        task.validate()?;
        Ok(task)
    }

    /// Task without any dates.
    pub fn floating<S: AsRef<str>>(description: &str, tags: &[S]) -> Result<Self> {
        Self::new(Description::new(description)?, tag_set(tags)?, None, None, None)
    }

    /// Checks the cross-field date rules. Field-level rules are enforced by
    /// the `Description` and `Tag` constructors.
    pub fn validate(&self) -> Result<()> {
        match (self.start, self.end) {
            (Some(_), None) => Err(TaskError::illegal(MESSAGE_START_WITHOUT_END)),
            (None, Some(_)) => Err(TaskError::illegal(MESSAGE_END_WITHOUT_START)),
            (Some(start), Some(end)) if start > end => {
                Err(TaskError::illegal(MESSAGE_START_AFTER_END))
            }
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> TaskKind {
        if self.start.is_some() {
            TaskKind::Event
        } else if self.deadline.is_some() {
            TaskKind::Deadline
        } else {
            TaskKind::Floating
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)?;
        if let Some(start) = self.start {
            write!(f, " from {start}")?;
        }
        if let Some(end) = self.end {
            write!(f, " to {end}")?;
        }
        if let Some(deadline) = self.deadline {
            write!(f, " by {deadline}")?;
        }
        for tag in &self.tags {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(h: u32) -> DateTime {
        DateTime::from_instant(Utc.with_ymd_and_hms(2026, 10, 20, h, 0, 0).unwrap())
    }

    #[test]
    fn test_description_is_trimmed_and_non_blank() {
        assert_eq!(Description::new("  Buy milk ").unwrap().as_str(), "Buy milk");
        assert_eq!(
            Description::new("   "),
            Err(TaskError::IllegalValue(MESSAGE_DESCRIPTION_CONSTRAINTS.into()))
        );
    }

    #[test]
    fn test_tags_must_be_alphanumeric() {
        assert!(Tag::new("cs2103").is_ok());
        assert!(Tag::new("game design").is_err());
        assert!(Tag::new("work:urgent").is_err());
        assert!(Tag::new("").is_err());
        assert_eq!(Tag::new("school").unwrap().to_string(), "#school");
    }

    #[test]
    fn test_start_requires_end() {
        let desc = Description::new("Meeting").unwrap();
        let res = Task::new(desc.clone(), BTreeSet::new(), Some(at(9)), None, None);
        assert_eq!(res, Err(TaskError::IllegalValue(MESSAGE_START_WITHOUT_END.into())));

        let res = Task::new(desc.clone(), BTreeSet::new(), None, Some(at(9)), None);
        assert_eq!(res, Err(TaskError::IllegalValue(MESSAGE_END_WITHOUT_START.into())));

        let res = Task::new(desc.clone(), BTreeSet::new(), Some(at(11)), Some(at(9)), None);
        assert_eq!(res, Err(TaskError::IllegalValue(MESSAGE_START_AFTER_END.into())));

        let task = Task::new(desc, BTreeSet::new(), Some(at(9)), Some(at(11)), None).unwrap();
        assert_eq!(task.kind(), TaskKind::Event);
    }

    #[test]
    fn test_kind_and_display() {
        let mut task = Task::floating("Do CS2103 V0.1", &["school", "homework"]).unwrap();
        assert_eq!(task.kind(), TaskKind::Floating);
        // Tags are kept sorted.
        assert_eq!(task.to_string(), "Do CS2103 V0.1 #homework #school");

        task.deadline = Some(at(15));
        assert_eq!(task.kind(), TaskKind::Deadline);
        assert!(task.to_string().contains(" by Tue Oct 20 2026 15:00"));
    }

    #[test]
    fn test_equality_includes_tags() {
        let a = Task::floating("Read", &["books"]).unwrap();
        let b = Task::floating("Read", &["novels"]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Task::floating("Read", &["books"]).unwrap());
    }

    #[test]
    fn test_serde_rejects_invalid_tag() {
        let json = r#"{"description":"Read","tags":["not valid"]}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
        let json = r#"{"description":"Read","tags":["ok"]}"#;
        assert_eq!(
            serde_json::from_str::<Task>(json).unwrap(),
            Task::floating("Read", &["ok"]).unwrap()
        );
    }
}
