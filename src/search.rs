//! Text matching shared by the SQL filter, the in-memory local mode and the
//! highlighter, so all three agree on what "matches".
//!
//! - `Partial`: the needle occurs anywhere in the text.
//! - `Exact`: the needle occurs as a standalone word, i.e. the characters
//!   around the occurrence are absent or not alphanumeric.
//!
//! Case-insensitive matching compares characters by their Unicode lowercase
//! form, so Cyrillic and accented text behave like ASCII.
use std::ops::Range;

use crate::models::review::SearchMode;

/// A compiled search. `None` from [`Matcher::new`] means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    needle: Vec<char>,
    mode: SearchMode,
    case_sensitive: bool,
}

impl Matcher {
    pub fn new(query: &str, mode: SearchMode, case_sensitive: bool) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            needle: query.chars().collect(),
            mode,
            case_sensitive,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.find_from(text, 0).is_some()
    }

    /// Non-overlapping byte ranges of every occurrence, left to right.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        let mut from = 0;
        while let Some(range) = self.find_from(text, from) {
            from = range.end;
            found.push(range);
        }
        found
    }

    fn find_from(&self, text: &str, from: usize) -> Option<Range<usize>> {
        text[from..].char_indices().find_map(|(offset, _)| {
            let start = from + offset;
            let end = self.match_at(text, start)?;
            (self.mode == SearchMode::Partial || is_word_bounded(text, start, end)).then_some(start..end)
        })
    }

    fn match_at(&self, text: &str, start: usize) -> Option<usize> {
        let mut chars = text[start..].char_indices();
        for &wanted in &self.needle {
            let (_, got) = chars.next()?;
            if !chars_equal(got, wanted, self.case_sensitive) {
                return None;
            }
        }
        Some(chars.next().map_or(text.len(), |(offset, _)| start + offset))
    }
}

fn chars_equal(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// What the table is currently searching for, as the renderers see it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    pub query: String,
    pub mode: SearchMode,
    pub case_sensitive: bool,
}

impl SearchFilter {
    pub fn matcher(&self) -> Option<Matcher> {
        Matcher::new(&self.query, self.mode, self.case_sensitive)
    }

    pub fn segments(&self, text: &str) -> Vec<Segment> {
        highlight(text, self.matcher().as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Splits `text` into plain and highlighted runs. Without a matcher the whole
/// text is one plain run.
pub fn highlight(text: &str, matcher: Option<&Matcher>) -> Vec<Segment> {
    let Some(matcher) = matcher else {
        return vec![Segment { text: text.to_string(), highlighted: false }];
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for range in matcher.find_all(text) {
        if range.start > cursor {
            segments.push(Segment { text: text[cursor..range.start].to_string(), highlighted: false });
        }
        segments.push(Segment { text: text[range.clone()].to_string(), highlighted: true });
        cursor = range.end;
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(Segment { text: text[cursor..].to_string(), highlighted: false });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(query: &str, mode: SearchMode, case_sensitive: bool) -> Matcher {
        Matcher::new(query, mode, case_sensitive).unwrap()
    }

    #[test]
    fn test_blank_query_is_no_filter() {
        assert!(Matcher::new("", SearchMode::Partial, false).is_none());
        assert!(Matcher::new("   ", SearchMode::Exact, true).is_none());
    }

    #[test]
    fn test_exact_does_not_match_inside_words() {
        let exact = matcher("good", SearchMode::Exact, false);
        let partial = matcher("good", SearchMode::Partial, false);

        assert!(!exact.matches("goodness gracious"));
        assert!(partial.matches("goodness gracious"));

        assert!(exact.matches("good"));
        assert!(exact.matches("very good"));
        assert!(exact.matches("good service"));
        assert!(exact.matches("it was good, really"));
        assert!(!exact.matches("notgood"));
    }

    #[test]
    fn test_exact_skips_embedded_occurrence_and_finds_later_word() {
        let exact = matcher("good", SearchMode::Exact, true);
        assert_eq!(exact.find_all("goodness then good"), vec![14..18]);
    }

    #[test]
    fn test_case_sensitivity() {
        let insensitive = matcher("GOOD", SearchMode::Partial, false);
        let sensitive = matcher("GOOD", SearchMode::Partial, true);
        assert!(insensitive.matches("pretty good"));
        assert!(!sensitive.matches("pretty good"));
        assert!(sensitive.matches("pretty GOOD"));
    }

    #[test]
    fn test_unicode_case_folding() {
        let insensitive = matcher("отлично", SearchMode::Exact, false);
        assert!(insensitive.matches("Всё ОТЛИЧНО!"));
        let sensitive = matcher("отлично", SearchMode::Exact, true);
        assert!(!sensitive.matches("Всё ОТЛИЧНО!"));
    }

    #[test]
    fn test_highlight_segments() {
        let filter = SearchFilter {
            query: "good".into(),
            mode: SearchMode::Partial,
            case_sensitive: false,
        };
        let segments = filter.segments("Good food, good mood");
        let rendered: Vec<(&str, bool)> = segments
            .iter()
            .map(|segment| (segment.text.as_str(), segment.highlighted))
            .collect();
        assert_eq!(
            rendered,
            vec![("Good", true), (" food, ", false), ("good", true), (" mood", false)]
        );
    }

    #[test]
    fn test_highlight_without_query_is_plain() {
        let filter = SearchFilter::default();
        assert_eq!(
            filter.segments("anything"),
            vec![Segment { text: "anything".into(), highlighted: false }]
        );
        assert_eq!(
            filter.segments(""),
            vec![Segment { text: String::new(), highlighted: false }]
        );
    }
}
