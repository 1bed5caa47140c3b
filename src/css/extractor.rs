//! Declaration extraction
//!
//! Walks a CSS or SCSS syntax tree and turns every declaration into a
//! property-name token followed by the color literals and variable
//! references found in its value. All positions come from byte offsets in
//! the tree, so the separator between property and value can be any length
//! and values may span several lines.
//!
//! SCSS adds three shapes: `$name: value` declarations, whose property is
//! the `$name`; nested property blocks (`font: { size: 1em; }`), whose inner
//! declarations are walked like any other; and `@include` arguments, which
//! contribute value tokens without a property name.

use tree_sitter::{Node, Tree};

use crate::css::classifier::classify;
use crate::css::constants::*;
use crate::css::token::{Token, TokenKind, TokenRange};
use crate::error::{IntelError, IntelResult};
use crate::language::tree_utils::{LinePositions, node_text};

/// Extract tokens from every declaration of a parsed stylesheet
///
/// A tree with syntax errors yields `IntelError::Parse` and no tokens at all.
/// Tokens whose position cannot be resolved are dropped.
pub fn extract(tree: &Tree, content: &str) -> IntelResult<Vec<Token>> {
    let root = tree.root_node();
    if root.has_error() {
        let (row, column) = first_error_position(root);
        return Err(IntelError::Parse {
            message: format!("syntax error in stylesheet at {}:{}", row, column),
        });
    }

    let positions = LinePositions::new(content);
    let mut tokens = Vec::new();
    walk_node_for_declarations(root, content, &positions, &mut tokens);

    Ok(tokens)
}

/// Recursively walk the syntax tree to find declarations
fn walk_node_for_declarations(
    node: Node,
    content: &str,
    positions: &LinePositions,
    tokens: &mut Vec<Token>,
) {
    match node.kind() {
        NODE_DECLARATION => extract_declaration(node, content, positions, tokens),
        NODE_INCLUDE_STATEMENT => extract_include(node, content, positions, tokens),
        kind if is_comment(kind) => {}
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                walk_node_for_declarations(child, content, positions, tokens);
            }
        }
    }
}

fn extract_declaration(
    declaration: Node,
    content: &str,
    positions: &LinePositions,
    tokens: &mut Vec<Token>,
) {
    let mut cursor = declaration.walk();
    let children: Vec<Node> = declaration.children(&mut cursor).collect();

    // `property_name` in CSS; SCSS variables may surface as their own kind
    let Some(property) = children
        .iter()
        .take_while(|c| c.kind() != TOKEN_COLON)
        .find(|c| c.is_named() && !is_comment(c.kind()))
    else {
        log::debug!(
            "Declaration without property name: '{}'",
            node_text(declaration, content)
        );
        return;
    };

    push_token(
        TokenKind::PropertyName,
        property.start_byte(),
        property.end_byte(),
        content,
        positions,
        tokens,
    );

    // Value nodes are the named children after the colon, minus `!important`
    let after_colon: Vec<&Node> = children
        .iter()
        .skip_while(|c| c.kind() != TOKEN_COLON)
        .skip(1)
        .filter(|c| c.is_named() && !is_comment(c.kind()))
        .collect();
    let value_nodes: Vec<&Node> = after_colon
        .iter()
        .copied()
        .filter(|c| c.kind() != NODE_IMPORTANT && c.kind() != NODE_BLOCK)
        .collect();

    if let (Some(first), Some(last)) = (value_nodes.first(), value_nodes.last()) {
        push_value_tokens(first.start_byte(), last.end_byte(), content, positions, tokens);
    }

    // Nested properties
    for block in after_colon.iter().filter(|c| c.kind() == NODE_BLOCK) {
        walk_node_for_declarations(**block, content, positions, tokens);
    }
}

/// Value tokens from the arguments of `@include name(...)`
fn extract_include(
    include: Node,
    content: &str,
    positions: &LinePositions,
    tokens: &mut Vec<Token>,
) {
    let mut cursor = include.walk();
    let children: Vec<Node> = include.children(&mut cursor).collect();

    let Some(name) = children.iter().find(|c| c.is_named() && !is_comment(c.kind())) else {
        return;
    };
    let block = children.iter().find(|c| c.kind() == NODE_BLOCK);
    let arguments_end = block.map_or(include.end_byte(), |b| b.start_byte());

    push_value_tokens(name.end_byte(), arguments_end, content, positions, tokens);

    // Content block passed to the mixin
    if let Some(block) = block {
        walk_node_for_declarations(*block, content, positions, tokens);
    }
}

/// Classify `content[start..end]` and push its matches
fn push_value_tokens(
    value_start: usize,
    value_end: usize,
    content: &str,
    positions: &LinePositions,
    tokens: &mut Vec<Token>,
) {
    let Some(value_text) = content.get(value_start..value_end) else {
        log::debug!("Value span {}..{} is not valid UTF-8", value_start, value_end);
        return;
    };

    for classified in classify(value_text) {
        push_token(
            classified.kind,
            value_start + classified.start,
            value_start + classified.end,
            content,
            positions,
            tokens,
        );
    }
}

fn push_token(
    kind: TokenKind,
    start: usize,
    end: usize,
    content: &str,
    positions: &LinePositions,
    tokens: &mut Vec<Token>,
) {
    match token_range(start, end, content, positions) {
        Ok(range) => tokens.push(Token {
            kind,
            text: content[start..end].to_string(),
            range,
        }),
        Err(e) => log::debug!("Dropping {:?} token: {}", kind, e),
    }
}

/// Build the range of a non-empty byte span
fn token_range(
    start: usize,
    end: usize,
    content: &str,
    positions: &LinePositions,
) -> IntelResult<TokenRange> {
    let unresolved = || IntelError::UnresolvedPosition {
        kind: format!("span {}..{}", start, end),
    };

    let text = content.get(start..end).ok_or_else(unresolved)?;
    let last_char = text.chars().next_back().ok_or_else(unresolved)?;
    let last_char_start = end - last_char.len_utf8();

    let (start_line, start_column) = positions.locate(start).ok_or_else(unresolved)?;
    let (end_line, end_column) = positions.locate(last_char_start).ok_or_else(unresolved)?;

    Ok(TokenRange {
        start_line,
        start_column,
        start_offset: start,
        end_line,
        end_column,
        end_offset: end,
    })
}

fn is_comment(kind: &str) -> bool {
    kind == NODE_COMMENT || kind == NODE_JS_COMMENT || kind == NODE_SINGLE_LINE_COMMENT
}

/// 1-based row and column of the first error or missing node, for logging
fn first_error_position(node: Node) -> (usize, usize) {
    if node.is_error() || node.is_missing() {
        let point = node.start_position();
        return (point.row + 1, point.column + 1);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_position(child);
        }
    }

    let point = node.start_position();
    (point.row + 1, point.column + 1)
}
