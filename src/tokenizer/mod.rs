// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Name tokenizer shared by notes and intervals.
//!
//! A name is matched against a regular expression with named capture
//! groups. The match must start at the beginning of the name and consume
//! all of it; anything left over makes the whole name invalid.

use regex::{Captures, Regex};
use tracing::trace;

/// Named groups captured from a fully-consumed name
#[derive(Debug)]
pub struct Tokens<'a> {
    captures: Captures<'a>,
}

impl<'a> Tokens<'a> {
    /// Get the text of a named group, or "" if the group did not take part
    pub fn get(&self, group: &str) -> &'a str {
        self.captures.name(group).map_or("", |m| m.as_str())
    }

    /// Check whether a named group captured any text
    pub fn has(&self, group: &str) -> bool {
        !self.get(group).is_empty()
    }
}

/// Tokenize `name` against `pattern`.
///
/// Returns `None` when the pattern does not match at position 0 or when
/// trailing text remains after the match.
pub fn tokenize<'a>(name: &'a str, pattern: &Regex) -> Option<Tokens<'a>> {
    let captures = pattern.captures(name)?;
    let whole = captures.get(0)?;
    if whole.start() != 0 || whole.end() != name.len() {
        trace!(name, matched = whole.as_str(), "leftover text after token");
        return None;
    }
    Some(Tokens { captures })
}

/// Tokenize `name` against each pattern in turn, returning the first full match
pub fn tokenize_any<'a>(name: &'a str, patterns: &[&Regex]) -> Option<Tokens<'a>> {
    patterns.iter().find_map(|pattern| tokenize(name, pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        Regex::new(r"^(?P<word>[a-z]*)(?P<num>[0-9]*)").unwrap()
    }

    #[test]
    fn test_full_match() {
        let re = pattern();
        let tokens = tokenize("abc12", &re).unwrap();
        assert_eq!(tokens.get("word"), "abc");
        assert_eq!(tokens.get("num"), "12");
        assert!(tokens.has("num"));
    }

    #[test]
    fn test_missing_group_reads_empty() {
        let re = Regex::new(r"^(?P<a>x)?(?P<b>y)").unwrap();
        let tokens = tokenize("y", &re).unwrap();
        assert_eq!(tokens.get("a"), "");
        assert!(!tokens.has("a"));
        assert_eq!(tokens.get("nonexistent"), "");
    }

    #[test]
    fn test_leftover_rejected() {
        let re = pattern();
        assert!(tokenize("abc12!", &re).is_none());
        assert!(tokenize("abc 12", &re).is_none());
        assert!(tokenize(" abc", &re).is_none());
    }

    #[test]
    fn test_empty_input() {
        let re = pattern();
        let tokens = tokenize("", &re).unwrap();
        assert_eq!(tokens.get("word"), "");

        let strict = Regex::new(r"^(?P<num>[0-9]+)").unwrap();
        assert!(tokenize("", &strict).is_none());
    }

    #[test]
    fn test_tokenize_any_order() {
        let first = Regex::new(r"^(?P<n>[0-9]+)(?P<q>[a-z])").unwrap();
        let second = Regex::new(r"^(?P<q>[a-z])(?P<n>[0-9]+)").unwrap();

        let tokens = tokenize_any("3m", &[&first, &second]).unwrap();
        assert_eq!(tokens.get("n"), "3");
        assert_eq!(tokens.get("q"), "m");

        let tokens = tokenize_any("m3", &[&first, &second]).unwrap();
        assert_eq!(tokens.get("n"), "3");
        assert_eq!(tokens.get("q"), "m");

        assert!(tokenize_any("3", &[&first, &second]).is_none());
    }

    #[test]
    fn test_unicode_never_panics() {
        let re = pattern();
        for input in ["é", "ab🎵", "\u{0}", "日本語", "a\u{301}"] {
            let _ = tokenize(input, &re);
        }
    }
}
