// Turns a line of user input into a Command.
//
// Syntax: the first word selects the command. Arguments are free text
// interleaved with prefixed fields:
//   by/DATETIME    deadline
//   from/DATETIME  start
//   to/DATETIME    end
//   #tag           tag (a lone '#' means "no tags")
// A prefixed date field runs until the next prefix or tag, so
// "by/next friday 5pm" is a single value.
use crate::commands::{
    AddCommand, ClearCommand, Command, CommandError, CommandWord, DeleteCommand, EditCommand,
    EditTaskDescriptor, ExitCommand, FindCommand, HelpCommand, ListCommand, MESSAGE_UNKNOWN_COMMAND,
    UndoCommand,
};
use crate::model::{DateParser, DateTime, Description, NaturalDateParser, Task, keyword_set, tag_set};

pub const PREFIX_DEADLINE: &str = "by/";
pub const PREFIX_START: &str = "from/";
pub const PREFIX_END: &str = "to/";

/// Prefixed field a word can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Deadline,
    Start,
    End,
}

/// Arguments split into free text and prefixed fields.
#[derive(Debug, Default, PartialEq, Eq)]
struct Fields {
    text: Vec<String>,
    deadline: Option<String>,
    start: Option<String>,
    end: Option<String>,
    tags: Option<Vec<String>>,
}

impl Fields {
    fn split(args: &str) -> Self {
        let mut fields = Fields::default();
        // `None` while reading free text.
        let mut current: Option<DateField> = None;

        for word in args.split_whitespace() {
            let (field, rest) = if let Some(rest) = word.strip_prefix(PREFIX_DEADLINE) {
                (DateField::Deadline, rest)
            } else if let Some(rest) = word.strip_prefix(PREFIX_START) {
                (DateField::Start, rest)
            } else if let Some(rest) = word.strip_prefix(PREFIX_END) {
                (DateField::End, rest)
            } else if let Some(tag) = word.strip_prefix('#') {
                let tags = fields.tags.get_or_insert_with(Vec::new);
                if !tag.is_empty() {
                    tags.push(tag.to_string());
                }
                current = None;
                continue;
            } else {
                match current {
                    Some(field) => fields.push_date_word(field, word),
                    None => fields.text.push(word.to_string()),
                }
                continue;
            };

            // A repeated prefix replaces the earlier value.
            current = Some(field);
            *fields.field_mut(field) = Some(String::new());
            if !rest.is_empty() {
                fields.push_date_word(field, rest);
            }
        }
        fields
    }

    fn field_mut(&mut self, field: DateField) -> &mut Option<String> {
        match field {
            DateField::Deadline => &mut self.deadline,
            DateField::Start => &mut self.start,
            DateField::End => &mut self.end,
        }
    }

    fn push_date_word(&mut self, field: DateField, word: &str) {
        let value = self.field_mut(field).get_or_insert_with(String::new);
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(word);
    }
}

#[derive(Debug)]
pub struct CommandParser {
    dates: Box<dyn DateParser>,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(Box::new(NaturalDateParser::new()))
    }
}

impl CommandParser {
    pub fn new(dates: Box<dyn DateParser>) -> Self {
        Self { dates }
    }

    pub fn parse(&self, input: &str) -> Result<Box<dyn Command>, CommandError> {
        let input = input.trim();
        let (word, args) = input
            .split_once(char::is_whitespace)
            .unwrap_or((input, ""));
        let word: CommandWord = word
            .to_lowercase()
            .parse()
            .map_err(|_| CommandError::new(MESSAGE_UNKNOWN_COMMAND))?;
        let args = args.trim();

        log::debug!("Parsing '{}' command with args '{}'", word, args);

        let command: Box<dyn Command> = match word {
            CommandWord::Add => Box::new(self.parse_add(args)?),
            CommandWord::Delete => Box::new(DeleteCommand::new(parse_index(args, word)?)),
            CommandWord::Edit => Box::new(self.parse_edit(args)?),
            CommandWord::Clear => Box::new(ClearCommand),
            CommandWord::Find => {
                let keywords = keyword_set(&[args]);
                if keywords.is_empty() {
                    return Err(CommandError::invalid_format(word));
                }
                Box::new(FindCommand::new(keywords))
            }
            CommandWord::List => Box::new(ListCommand),
            CommandWord::Undo => Box::new(UndoCommand),
            CommandWord::Help => Box::new(HelpCommand),
            CommandWord::Exit => Box::new(ExitCommand),
        };
        Ok(command)
    }

    fn parse_add(&self, args: &str) -> Result<AddCommand, CommandError> {
        let fields = Fields::split(args);
        if fields.text.is_empty() {
            return Err(CommandError::invalid_format(CommandWord::Add));
        }
        let description = Description::new(&fields.text.join(" "))?;
        let tags = tag_set(fields.tags.as_deref().unwrap_or_default())?;
        let task = Task::new(
            description,
            tags,
            self.parse_date(fields.start.as_deref())?,
            self.parse_date(fields.end.as_deref())?,
            self.parse_date(fields.deadline.as_deref())?,
        )?;
        Ok(AddCommand::new(task))
    }

    fn parse_edit(&self, args: &str) -> Result<EditCommand, CommandError> {
        let mut fields = Fields::split(args);
        if fields.text.is_empty() {
            return Err(CommandError::invalid_format(CommandWord::Edit));
        }
        let index = parse_index(&fields.text.remove(0), CommandWord::Edit)?;

        let description = if fields.text.is_empty() {
            None
        } else {
            Some(Description::new(&fields.text.join(" "))?)
        };
        let tags = match &fields.tags {
            Some(names) => Some(tag_set(names)?),
            None => None,
        };
        let descriptor = EditTaskDescriptor {
            description,
            tags,
            start: self.parse_date(fields.start.as_deref())?,
            end: self.parse_date(fields.end.as_deref())?,
            deadline: self.parse_date(fields.deadline.as_deref())?,
        };
        Ok(EditCommand::new(index, descriptor))
    }

    fn parse_date(&self, value: Option<&str>) -> Result<Option<DateTime>, CommandError> {
        value
            .map(|text| DateTime::parse_with(text, self.dates.as_ref()))
            .transpose()
            .map_err(CommandError::from)
    }
}

/// Parses a 1-based list index.
fn parse_index(arg: &str, word: CommandWord) -> Result<usize, CommandError> {
    match arg.trim().parse::<usize>() {
        Ok(i) if i > 0 => Ok(i),
        _ => Err(CommandError::invalid_format(word)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_split_multi_word_dates() {
        let f = Fields::split("Submit report by/next friday 5pm #work from/today to/tomorrow");
        assert_eq!(f.text, vec!["Submit", "report"]);
        assert_eq!(f.deadline.as_deref(), Some("next friday 5pm"));
        assert_eq!(f.start.as_deref(), Some("today"));
        assert_eq!(f.end.as_deref(), Some("tomorrow"));
        assert_eq!(f.tags, Some(vec!["work".to_string()]));
    }

    #[test]
    fn test_words_after_tag_return_to_text() {
        let f = Fields::split("buy #groceries milk");
        assert_eq!(f.text, vec!["buy", "milk"]);
    }

    #[test]
    fn test_lone_hash_means_empty_tags() {
        let f = Fields::split("1 #");
        assert_eq!(f.tags, Some(vec![]));
        let f = Fields::split("1");
        assert_eq!(f.tags, None);
    }

    #[test]
    fn test_empty_prefix_value_is_kept() {
        let f = Fields::split("x by/");
        assert_eq!(f.deadline.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index(" 3 ", CommandWord::Delete), Ok(3));
        assert!(parse_index("0", CommandWord::Delete).is_err());
        assert!(parse_index("-1", CommandWord::Delete).is_err());
        assert!(parse_index("one", CommandWord::Delete).is_err());
    }
}
