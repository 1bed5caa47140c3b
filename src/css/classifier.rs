//! Token classification inside declaration values
//!
//! Declarations are found by the grammar; what sits inside a value is found
//! here with patterns. The two steps are kept apart so classification can be
//! checked on plain strings.

use regex::Regex;
use std::sync::OnceLock;

use crate::css::token::TokenKind;

/// Hex colors with 3, 4, 6 or 8 digits, and rgb/rgba/hsl/hsla calls with
/// three or four numeric or percentage components
const COLOR_LITERAL_PATTERN: &str = r"(?i)#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})\b|\b(?:rgb|hsl)a?\(\s*(?:-?\d*\.?\d+%?[,\s]+){2,3}\s*\d*\.?\d+%?\s*\)";

/// `var(--name)` or `var(--name, fallback)`; group 1 is the name
const VARIABLE_REFERENCE_PATTERN: &str = r"(?i)\bvar\(\s*(--[\w-]+)\s*[,)]";

fn color_literal_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(COLOR_LITERAL_PATTERN).expect("Failed to compile color literal regex")
    })
}

fn variable_reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(VARIABLE_REFERENCE_PATTERN).expect("Failed to compile variable reference regex")
    })
}

/// A classified substring of a value
///
/// `start` and `end` are byte offsets into the classified text, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedMatch<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Find every color literal and variable reference in a declaration value
///
/// Matches come back left to right. Malformed or empty input yields no matches.
pub fn classify(value_text: &str) -> Vec<ClassifiedMatch<'_>> {
    let mut matches: Vec<ClassifiedMatch> = color_literal_regex()
        .find_iter(value_text)
        .map(|m| ClassifiedMatch {
            kind: TokenKind::ColorLiteral,
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect();

    // Only the `--name` argument is reported, not the `var(...)` wrapper
    matches.extend(
        variable_reference_regex()
            .captures_iter(value_text)
            .filter_map(|captures| captures.get(1))
            .map(|name| ClassifiedMatch {
                kind: TokenKind::VariableReference,
                text: name.as_str(),
                start: name.start(),
                end: name.end(),
            }),
    );

    matches.sort_by_key(|m| m.start);
    debug_assert!(
        matches.windows(2).all(|pair| pair[0].end <= pair[1].start),
        "overlapping classifier matches in {:?}",
        value_text
    );

    matches
}
