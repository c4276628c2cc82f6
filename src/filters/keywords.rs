use once_cell::sync::Lazy;
use regex::{escape, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

/// Case-insensitive keyword or phrase patterns.
///
/// Blank patterns are dropped when the list is built, so every stored
/// pattern is non-empty and already lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords = Vec::new();
        for pattern in patterns {
            let normalized = pattern.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                debug!("Ignoring empty keyword pattern");
                continue;
            }
            if !keywords.contains(&normalized) {
                keywords.push(normalized);
            }
        }
        KeywordList(keywords)
    }

    /// Parse comma separated input such as `"python, back end,,rust"`
    pub fn parse(text: &str) -> Self {
        Self::new(text.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if `text` contains any of the patterns
    pub fn matches(&self, text: &str) -> bool {
        contains_keywords(text, self.iter())
    }
}

impl From<Vec<String>> for KeywordList {
    fn from(patterns: Vec<String>) -> Self {
        KeywordList::new(patterns)
    }
}

impl From<KeywordList> for Vec<String> {
    fn from(list: KeywordList) -> Self {
        list.0
    }
}

impl fmt::Display for KeywordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Case-insensitive check whether `text` contains any of `keywords`
pub fn contains_keywords<'a, I>(text: &str, keywords: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let haystack = text.to_lowercase();
    keywords
        .into_iter()
        .any(|keyword| !keyword.is_empty() && haystack.contains(&keyword.to_lowercase()))
}

/// Wrap every occurrence of the keywords in `<mark>` tags.
///
/// Returns whether anything was marked together with the marked copy.
/// Keywords are matched literally and case-insensitively, in text between
/// tags only; tag names and attributes are left untouched.
pub fn mark_keywords_html(text: &str, keywords: &KeywordList) -> (bool, String) {
    if keywords.is_empty() {
        return (false, text.to_string());
    }

    // One alternation, longest first, so inserted tags are never re-matched
    let mut alternatives: Vec<&str> = keywords.iter().collect();
    alternatives.sort_by_key(|keyword| std::cmp::Reverse(keyword.len()));
    let pattern = alternatives.iter().map(|keyword| escape(keyword)).collect::<Vec<_>>().join("|");

    let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(e) => {
            debug!("Keyword marking disabled, pattern did not compile: {}", e);
            return (keywords.matches(text), text.to_string());
        }
    };

    let mut found = false;
    let mut marked = String::with_capacity(text.len());
    let mut mark_piece = |piece: &str, out: &mut String| {
        if regex.is_match(piece) {
            found = true;
            out.push_str(&regex.replace_all(piece, "<mark>$0</mark>"));
        } else {
            out.push_str(piece);
        }
    };

    let mut last = 0;
    for tag in TAG_REGEX.find_iter(text) {
        mark_piece(&text[last..tag.start()], &mut marked);
        marked.push_str(tag.as_str());
        last = tag.end();
    }
    mark_piece(&text[last..], &mut marked);

    (found, marked)
}
