//! Hover Resolver
//!
//! Resolves a cursor to the token under it and renders hover markdown for
//! that token with the capability matching its kind:
//! - color literals get a color preview
//! - variable references get a cross-reference to their definition
//! - property names get their reference documentation
//!
//! Only the selected token's capability runs, and lookups are bounded by a
//! timeout. A failing capability means no hover; it never surfaces as an
//! error to the editor.

use std::sync::Arc;
use std::time::Duration;

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};

use crate::css::color::Color;
use crate::css::constants::{CUSTOM_PROPERTY_PREFIX, SCSS_VARIABLE_PREFIX};
use crate::css::docs::render_property_doc;
use crate::css::line_index::LineIndex;
use crate::css::token::{Cursor, Token, TokenKind, TokenRange};
use crate::css::variables::render_variable_preview;
use crate::error::{IntelResult, LookupError};
use crate::language::repository_uri::parse_repository_uri;
use crate::lookup::{DocumentationSource, SnippetRequest, SnippetSource, VariableSearch};

/// Rendered hover for one token
#[derive(Debug, Clone, PartialEq)]
pub struct HoverContent {
    pub markdown: String,
    /// Range of the hovered token
    pub range: TokenRange,
}

impl HoverContent {
    pub fn to_lsp_hover(&self) -> Hover {
        Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: self.markdown.clone(),
            }),
            range: Some(self.range.to_lsp_range()),
        }
    }
}

/// Token under the cursor, if any
///
/// A token covers its line from its start column up to, not including, the
/// start of the next token that starts further right; the last such token
/// covers the rest of the line. Tokens sharing a start column resolve to the
/// first one.
pub fn resolve(index: &LineIndex, cursor: Cursor) -> Option<&Token> {
    select_token(index.line(cursor.line), cursor.column)
}

/// Pick the token covering `column` among tokens sorted by start column
fn select_token(tokens: &[Token], column: u32) -> Option<&Token> {
    tokens.iter().enumerate().find_map(|(i, token)| {
        let start = token.range.start_column;
        if column < start {
            return None;
        }

        let next_start = tokens[i + 1..]
            .iter()
            .map(|next| next.range.start_column)
            .find(|&next_start| next_start > start);

        match next_start {
            Some(next_start) if column >= next_start => None,
            _ => Some(token),
        }
    })
}

/// Markdown preview of a color literal
pub fn render_color_preview(literal: &str) -> String {
    let mut markdown = format!("#### Color preview\n\n`{}`", literal);

    if let Some(color) = Color::parse(literal) {
        let hex = if color.a < 1.0 {
            color.to_hex_with_alpha()
        } else {
            color.to_hex()
        };
        markdown.push_str(&format!("\n\n`{}` `{}`", color, hex));
    }

    markdown
}

/// Dispatches hovers to the capability of the hovered token
pub struct HoverProvider {
    variables: Arc<dyn VariableSearch>,
    snippets: Arc<dyn SnippetSource>,
    docs: Arc<dyn DocumentationSource>,
    timeout: Duration,
}

impl HoverProvider {
    pub fn new(
        variables: Arc<dyn VariableSearch>,
        snippets: Arc<dyn SnippetSource>,
        docs: Arc<dyn DocumentationSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            variables,
            snippets,
            docs,
            timeout,
        }
    }

    /// Hover for the token under `cursor`, or `None` if there is no token or
    /// its capability had nothing to show
    pub async fn hover(
        &self,
        index: &LineIndex,
        cursor: Cursor,
        document_uri: &str,
    ) -> Option<HoverContent> {
        let token = resolve(index, cursor)?.clone();

        let markdown = match tokio::time::timeout(self.timeout, self.render(&token, document_uri)).await {
            Ok(Ok(markdown)) => markdown,
            Ok(Err(e)) => {
                log::debug!("No hover for {:?} '{}': {}", token.kind, token.text, e);
                return None;
            }
            Err(_) => {
                log::debug!(
                    "No hover for {:?} '{}': {}",
                    token.kind,
                    token.text,
                    LookupError::Timeout(self.timeout)
                );
                return None;
            }
        };

        Some(HoverContent {
            markdown,
            range: token.range,
        })
    }

    async fn render(&self, token: &Token, document_uri: &str) -> IntelResult<String> {
        match token.kind {
            TokenKind::ColorLiteral => Ok(render_color_preview(&token.text)),
            TokenKind::VariableReference => self.variable_hover(&token.text, document_uri).await,
            TokenKind::PropertyName => self.documentation_hover(&token.text).await,
        }
    }

    async fn variable_hover(&self, variable: &str, document_uri: &str) -> IntelResult<String> {
        let locator = parse_repository_uri(document_uri)?;
        let location = self
            .variables
            .find_definition(&locator.repository, variable)
            .await?;

        let request = SnippetRequest::around(&location);
        let lines = match self.snippets.fetch_lines(&request).await {
            Ok(lines) => lines,
            Err(e) => {
                log::debug!("No preview for '{}': {}", variable, e);
                Vec::new()
            }
        };

        Ok(render_variable_preview(
            &location,
            request.start,
            &lines,
            self.variables.definition_url(&location).as_deref(),
            self.variables
                .search_url(&locator.repository, variable)
                .as_deref(),
        ))
    }

    async fn documentation_hover(&self, property: &str) -> IntelResult<String> {
        let no_match = || LookupError::NoMatch {
            query: property.to_string(),
        };

        // Author-defined names have no reference page
        if property.starts_with(CUSTOM_PROPERTY_PREFIX)
            || property.starts_with(SCSS_VARIABLE_PREFIX)
        {
            return Err(no_match().into());
        }

        let markdown = self.docs.fetch_property_doc(property).await?;
        let property_url = self.docs.property_url(property);

        render_property_doc(property, &markdown, self.docs.site_url(), property_url.as_deref())
            .ok_or_else(|| no_match().into())
    }
}
