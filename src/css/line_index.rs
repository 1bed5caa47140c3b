//! Line index of hoverable tokens
//!
//! Groups a document's tokens by the line they start on. An index is built
//! once per parse and never mutated afterwards; a re-parse produces a new one.

use std::collections::BTreeMap;

use crate::css::extractor::extract;
use crate::css::parser::CssParser;
use crate::css::token::{Token, TokenKind};
use crate::error::{IntelError, IntelResult};

/// Tokens of one document keyed by 1-based start line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    lines: BTreeMap<u32, Vec<Token>>,
}

impl LineIndex {
    /// Group tokens by start line, ordered by start column within a line
    ///
    /// Tokens without a start line are dropped. The sort is stable, so tokens
    /// sharing a start column keep their encounter order.
    pub fn build(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut lines: BTreeMap<u32, Vec<Token>> = BTreeMap::new();

        for token in tokens {
            let line = token.range.start_line;
            if line == 0 {
                log::debug!("Dropping token '{}' without start line", token.text);
                continue;
            }
            lines.entry(line).or_default().push(token);
        }

        for line_tokens in lines.values_mut() {
            line_tokens.sort_by_key(|token| token.range.start_column);
        }

        Self { lines }
    }

    /// Tokens starting on a line, empty if there are none
    pub fn line(&self, line: u32) -> &[Token] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lines that have at least one token, ascending
    pub fn line_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines.keys().copied()
    }

    /// All tokens in line order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.lines.values().flatten()
    }

    /// All tokens of one kind in line order
    pub fn tokens_of_kind(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.tokens().filter(move |token| token.kind == kind)
    }

    /// Number of tokens in the index
    pub fn len(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse stylesheet text and build its line index
pub fn index_source(parser: &mut CssParser, content: &str) -> IntelResult<LineIndex> {
    let tree = parser.parse(content).ok_or_else(|| IntelError::Parse {
        message: "parser returned no tree".to_string(),
    })?;
    let tokens = extract(&tree, content)?;

    Ok(LineIndex::build(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::Dialect;
    use crate::css::token::TokenRange;

    fn token(kind: TokenKind, text: &str, line: u32, column: u32) -> Token {
        let width = text.chars().count() as u32;
        Token {
            kind,
            text: text.to_string(),
            range: TokenRange {
                start_line: line,
                start_column: column,
                start_offset: 0,
                end_line: line,
                end_column: column + width - 1,
                end_offset: text.len(),
            },
        }
    }

    #[test]
    fn test_groups_by_line_and_sorts_columns() {
        let index = LineIndex::build(vec![
            token(TokenKind::ColorLiteral, "#fff", 2, 8),
            token(TokenKind::PropertyName, "color", 2, 1),
            token(TokenKind::PropertyName, "width", 3, 3),
        ]);

        let line_two: Vec<&str> = index.line(2).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(line_two, vec!["color", "#fff"]);
        assert_eq!(index.line(3).len(), 1);
        assert!(index.line(1).is_empty());
        assert_eq!(index.line_numbers().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_drops_tokens_without_line() {
        let index = LineIndex::build(vec![token(TokenKind::PropertyName, "color", 0, 1)]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_equal_columns_keep_encounter_order() {
        let index = LineIndex::build(vec![
            token(TokenKind::PropertyName, "first", 1, 4),
            token(TokenKind::PropertyName, "second", 1, 4),
        ]);
        let texts: Vec<&str> = index.line(1).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_index_source_is_idempotent() {
        let mut parser = CssParser::new(Dialect::Css).unwrap();
        let content = ".a {\n  color: #fff;\n  margin: var(--gap) 0;\n}";
        let first = index_source(&mut parser, content).unwrap();
        let second = index_source(&mut parser, content).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_index_source_reports_parse_failure() {
        let mut parser = CssParser::new(Dialect::Css).unwrap();
        let result = index_source(&mut parser, ".a { color: red; ");
        assert!(matches!(result, Err(IntelError::Parse { .. })));
    }

    #[test]
    fn test_index_source_follows_parser_dialect() {
        let content = "$accent: #0af;\n.a { color: $accent; }";

        let mut scss = CssParser::new(Dialect::Scss).unwrap();
        let index = index_source(&mut scss, content).unwrap();
        let colors: Vec<&str> = index
            .tokens_of_kind(TokenKind::ColorLiteral)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(colors, vec!["#0af"]);

        let mut css = CssParser::new(Dialect::Css).unwrap();
        assert!(matches!(
            index_source(&mut css, content),
            Err(IntelError::Parse { .. })
        ));
    }
}
