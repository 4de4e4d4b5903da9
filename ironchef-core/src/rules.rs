//! Keyword rule tables.
//!
//! Every decision the generator makes from free text (cooking method, amounts,
//! prep notes, ingredient tips) is an ordered slice of [`Rule`]s evaluated
//! top-to-bottom against a lowercased string. The first rule whose keywords
//! match wins, so the position of a rule in its table is part of its meaning.

/// What a rule looks for in the lowercased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keywords {
    /// Matches when any keyword is a substring of the text.
    Any(&'static [&'static str]),
    /// Matches only when the whole text equals the keyword.
    Exactly(&'static str),
}

impl Keywords {
    pub fn matches(&self, lower: &str) -> bool {
        match self {
            Keywords::Any(words) => words.iter().any(|w| lower.contains(w)),
            Keywords::Exactly(word) => lower == *word,
        }
    }
}

/// A single `keywords -> value` entry in a priority-ordered table.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub when: Keywords,
    pub then: T,
}

impl<T> Rule<T> {
    pub const fn any(words: &'static [&'static str], then: T) -> Self {
        Rule {
            when: Keywords::Any(words),
            then,
        }
    }

    pub const fn exactly(word: &'static str, then: T) -> Self {
        Rule {
            when: Keywords::Exactly(word),
            then,
        }
    }
}

/// Evaluate `rules` in order against `text` and return the first hit.
///
/// `text` is lowercased here, so callers can pass dish and ingredient names
/// exactly as the user typed them.
pub fn first_match<T: Copy>(rules: &[Rule<T>], text: &str) -> Option<T> {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.when.matches(&lower))
        .map(|rule| rule.then)
}

/// Case-insensitive substring check shared by the generator's one-off tests
/// on the dish name (e.g. "is this a soup?").
pub fn mentions(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(keyword)
}

/// Case-insensitive check for any of several keywords.
pub fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
