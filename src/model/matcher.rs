// Keyword matching used by the `find` filter.
//
// A task matches when any keyword equals, ignoring case, either a whole word
// of its description or one of its tag names.
use crate::model::item::Task;
use std::collections::BTreeSet;

impl Task {
    pub fn matches_any_keyword(&self, keywords: &BTreeSet<String>) -> bool {
        keywords.iter().any(|k| self.matches_keyword(k))
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        contains_word_ignore_case(self.description.as_str(), keyword)
            || self
                .tags
                .iter()
                .any(|tag| tag.name().eq_ignore_ascii_case(keyword))
    }
}

/// Whole-word, case-insensitive containment. "school" is found in
/// "Go to School" but not in "schoolbag".
pub fn contains_word_ignore_case(sentence: &str, word: &str) -> bool {
    let word = word.to_lowercase();
    sentence
        .split_whitespace()
        .any(|w| w.to_lowercase() == word)
}

/// Normalises raw user keywords: splits on whitespace and drops duplicates.
pub fn keyword_set<S: AsRef<str>>(raw: &[S]) -> BTreeSet<String> {
    raw.iter()
        .flat_map(|s| s.as_ref().split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        assert!(contains_word_ignore_case("Go to School", "school"));
        assert!(!contains_word_ignore_case("Buy schoolbag", "school"));
        assert!(!contains_word_ignore_case("", "school"));
    }

    #[test]
    fn test_matches_description_or_tag() {
        let t = Task::floating("Do CS2103 V0.1", &["school", "homework"]).unwrap();
        assert!(t.matches_any_keyword(&keyword_set(&["SCHOOL"])));
        assert!(t.matches_any_keyword(&keyword_set(&["cs2103"])));
        assert!(t.matches_any_keyword(&keyword_set(&["dance homework"])));
        assert!(!t.matches_any_keyword(&keyword_set(&["dance"])));
        assert!(!t.matches_any_keyword(&BTreeSet::new()));
    }
}
