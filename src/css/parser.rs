//! Stylesheet parser using tree-sitter
//!
//! Plain CSS goes through tree-sitter-css, SCSS through tree-sitter-scss.
//! The SCSS grammar extends the CSS one, so both produce the same
//! `declaration` / `property_name` shape the extractor walks.

use tree_sitter::{Language, Parser, Tree};

use crate::css::constants::{LANGUAGE_CSS, LANGUAGE_SCSS};
use crate::error::{IntelError, IntelResult};

/// Stylesheet dialects we index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Css,
    Scss,
}

impl Dialect {
    /// Map an editor language id to a dialect
    pub fn from_language_id(language_id: &str) -> IntelResult<Self> {
        match language_id {
            LANGUAGE_CSS => Ok(Dialect::Css),
            LANGUAGE_SCSS => Ok(Dialect::Scss),
            other => Err(IntelError::UnsupportedDialect {
                language_id: other.to_string(),
            }),
        }
    }

    fn language(self) -> Language {
        match self {
            Dialect::Css => tree_sitter_css::LANGUAGE.into(),
            Dialect::Scss => tree_sitter_scss::language(),
        }
    }
}

/// Parser wrapper around the grammar of one dialect
pub struct CssParser {
    parser: Parser,
    dialect: Dialect,
}

impl CssParser {
    /// Create a parser for `dialect`
    pub fn new(dialect: Dialect) -> IntelResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| IntelError::Parse {
                message: format!("Failed to set up tree-sitter language: {}", e),
            })?;

        Ok(Self { parser, dialect })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse stylesheet content and return the syntax tree
    pub fn parse(&mut self, content: &str) -> Option<Tree> {
        self.parser.parse(content, None)
    }
}
