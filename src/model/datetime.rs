// Date/time value type for task start, end and deadline fields.
use crate::error::{Result, TaskError};
use crate::model::nlp::NaturalDateParser;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MESSAGE_DATETIME_CONSTRAINTS: &str =
    "Date and time format must be a date/day, time or both";

/// One contiguous date expression found in a piece of text.
///
/// A single expression can resolve to several instants, e.g. a range like
/// `tomorrow 2pm to 4pm`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateGroup {
    pub dates: Vec<chrono::DateTime<Utc>>,
    pub text: String,
}

/// Natural-language date parsing backend.
///
/// Implementations return every date expression they recognise; words that
/// are not part of a date are skipped.
pub trait DateParser: Send + Sync + fmt::Debug {
    fn parse(&self, text: &str) -> Vec<DateGroup>;
}

/// A task's start time, end time or deadline.
///
/// Only constructible from text that resolves to exactly one date group with
/// at least one concrete date. Instants are kept in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateTime {
    instant: chrono::DateTime<Utc>,
}

impl DateTime {
    /// Parses `text` with the built-in [`NaturalDateParser`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &NaturalDateParser::default())
    }

    pub fn parse_with(text: &str, parser: &dyn DateParser) -> Result<Self> {
        let mut groups = parser.parse(text.trim());
        if groups.len() != 1 {
            return Err(TaskError::illegal(MESSAGE_DATETIME_CONSTRAINTS));
        }
        let group = groups.remove(0);
        group
            .dates
            .first()
            .map(|instant| Self { instant: *instant })
            .ok_or_else(|| TaskError::illegal(MESSAGE_DATETIME_CONSTRAINTS))
    }

    pub fn is_valid(text: &str, parser: &dyn DateParser) -> bool {
        let groups = parser.parse(text.trim());
        groups.len() == 1 && !groups[0].dates.is_empty()
    }

    pub fn from_instant(instant: chrono::DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn instant(&self) -> chrono::DateTime<Utc> {
        self.instant
    }

    /// `YYYY-MM-DD HH:MM`, which the built-in parser reads back to the same instant.
    pub fn to_input_string(&self) -> String {
        self.instant.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format("%a %b %d %Y %H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug)]
    struct FixedGroups(Vec<DateGroup>);

    impl DateParser for FixedGroups {
        fn parse(&self, _text: &str) -> Vec<DateGroup> {
            self.0.clone()
        }
    }

    fn instant(h: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 20, h, 0, 0).unwrap()
    }

    #[test]
    fn test_single_group_is_accepted() {
        let parser = FixedGroups(vec![DateGroup {
            dates: vec![instant(15)],
            text: "tomorrow 3pm".into(),
        }]);
        let dt = DateTime::parse_with("  tomorrow 3pm ", &parser).unwrap();
        assert_eq!(dt.instant(), instant(15));
    }

    #[test]
    fn test_first_date_of_range_wins() {
        let parser = FixedGroups(vec![DateGroup {
            dates: vec![instant(14), instant(16)],
            text: String::new(),
        }]);
        assert_eq!(DateTime::parse_with("x", &parser).unwrap().instant(), instant(14));
    }

    #[test]
    fn test_zero_or_many_groups_rejected() {
        let none = FixedGroups(vec![]);
        assert_eq!(
            DateTime::parse_with("x", &none),
            Err(TaskError::IllegalValue(MESSAGE_DATETIME_CONSTRAINTS.into()))
        );

        let group = DateGroup {
            dates: vec![instant(9)],
            text: String::new(),
        };
        let two = FixedGroups(vec![group.clone(), group]);
        assert!(DateTime::parse_with("x", &two).is_err());
        assert!(!DateTime::is_valid("x", &two));

        let empty = FixedGroups(vec![DateGroup::default()]);
        assert!(DateTime::parse_with("x", &empty).is_err());
    }

    #[test]
    fn test_equality_follows_instant() {
        let a = DateTime::from_instant(instant(10));
        let b = DateTime::from_instant(instant(10));
        assert_eq!(a, b);
        assert!(a < DateTime::from_instant(instant(11)));
        assert_eq!(a.to_input_string(), "2026-10-20 10:00");
    }
}
