//! Token model
//!
//! A token is one thing worth hovering in a stylesheet: a declaration's
//! property name, or a color literal or variable reference inside its value.

use tower_lsp::lsp_types::{Position, Range};

/// What a token is, which also decides the hover capability it gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Property identifier of a declaration, e.g. `color`
    PropertyName,
    /// Hex or functional color, e.g. `#fff`, `rgb(0, 0, 0)`
    ColorLiteral,
    /// Custom property inside `var(...)`, e.g. `--accent`
    VariableReference,
}

/// Source span of a token
///
/// Lines and columns are 1-based and columns count characters. `end_column`
/// is the column of the last character (inclusive). Offsets are byte offsets
/// into the document; `end_offset` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenRange {
    pub start_line: u32,
    pub start_column: u32,
    pub start_offset: usize,
    pub end_line: u32,
    pub end_column: u32,
    pub end_offset: usize,
}

impl TokenRange {
    /// Convert to an LSP range (0-based, exclusive end)
    pub fn to_lsp_range(&self) -> Range {
        Range {
            start: Position {
                line: self.start_line.saturating_sub(1),
                character: self.start_column.saturating_sub(1),
            },
            end: Position {
                line: self.end_line.saturating_sub(1),
                character: self.end_column,
            },
        }
    }

    /// Byte length of the span
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text of the token
    pub text: String,
    pub range: TokenRange,
}

/// A hover position, 1-based on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: u32,
    pub column: u32,
}

impl Cursor {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl From<Position> for Cursor {
    fn from(position: Position) -> Self {
        Self {
            line: position.line.saturating_add(1),
            column: position.character.saturating_add(1),
        }
    }
}
