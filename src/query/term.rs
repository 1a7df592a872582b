//! Search term matching for "find" queries.

use glob::{MatchOptions, Pattern};

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Case-insensitive `*term*` wildcard match against local names.
///
/// Only `*` and `?` are wildcards; brackets match themselves.
#[derive(Debug, Clone)]
pub enum TermMatcher {
    /// No term, or an empty one
    Any,
    Wildcard(Pattern),
    /// Fallback substring match when the term cannot be compiled
    Literal(String),
}

impl TermMatcher {
    pub fn new(term: Option<&str>) -> Self {
        let term = match term.map(str::trim) {
            Some(term) if !term.is_empty() => term,
            _ => return TermMatcher::Any,
        };

        match Pattern::new(&wildcard_pattern(term)) {
            Ok(pattern) => TermMatcher::Wildcard(pattern),
            Err(_) => TermMatcher::Literal(term.to_lowercase()),
        }
    }

    pub fn matches(&self, local_name: &str) -> bool {
        match self {
            TermMatcher::Any => true,
            TermMatcher::Wildcard(pattern) => pattern.matches_with(local_name, OPTIONS),
            TermMatcher::Literal(term) => local_name.to_lowercase().contains(term.as_str()),
        }
    }
}

/// `*term*` with brackets escaped and runs of `*` collapsed.
fn wildcard_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 8);
    pattern.push('*');
    for c in term.chars() {
        match c {
            '*' if pattern.ends_with('*') => {}
            '[' => pattern.push_str("[[]"),
            ']' => pattern.push_str("[]]"),
            _ => pattern.push(c),
        }
    }
    if !pattern.ends_with('*') {
        pattern.push('*');
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_matches_everything() {
        assert!(TermMatcher::new(None).matches("AudioBuffer"));
        assert!(TermMatcher::new(Some("  ")).matches("AudioBuffer"));
    }

    #[test]
    fn test_substring_case_insensitive() {
        let matcher = TermMatcher::new(Some("buffer"));
        assert!(matcher.matches("AudioBuffer"));
        assert!(matcher.matches("BufferingAudioSource"));
        assert!(!matcher.matches("AudioSource"));
    }

    #[test]
    fn test_wildcards() {
        let matcher = TermMatcher::new(Some("get?ame"));
        assert!(matcher.matches("getName"));
        assert!(matcher.matches("getXame"));
        assert!(!matcher.matches("getFrame"));
        assert!(!matcher.matches("getSize"));

        let matcher = TermMatcher::new(Some("add*Listener"));
        assert!(matcher.matches("addChangeListener"));

        let matcher = TermMatcher::new(Some("**Listener**"));
        assert!(matcher.matches("addChangeListener"));
    }

    #[test]
    fn test_brackets_are_literal() {
        let matcher = TermMatcher::new(Some("operator[]"));
        assert!(matches!(matcher, TermMatcher::Wildcard(_)));
        assert!(matcher.matches("operator[]"));
        assert!(!matcher.matches("operator()"));

        let matcher = TermMatcher::new(Some("get[x]"));
        assert!(matcher.matches("get[x]"));
        assert!(matcher.matches("GET[X]s"));
        assert!(!matcher.matches("getx"));

        let matcher = TermMatcher::new(Some("[?]"));
        assert!(matcher.matches("at[0]"));
        assert!(!matcher.matches("at(0)"));
    }
}
