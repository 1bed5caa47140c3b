//! Color decorations
//!
//! Color literal tokens are the only input of the editor's inline color
//! swatches. This module lists them as `(range, value)` pairs and converts
//! them to LSP color information.

use tower_lsp::lsp_types::{Color as LspColor, ColorInformation, ColorPresentation, Range, TextEdit};

use crate::css::color::Color;
use crate::css::line_index::LineIndex;
use crate::css::token::{TokenKind, TokenRange};

/// A color literal to decorate
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDecoration {
    pub range: TokenRange,
    /// Literal as written in the source, e.g. `#fff`
    pub value: String,
}

/// All color literals of a document, in line order
pub fn color_decorations(index: &LineIndex) -> Vec<ColorDecoration> {
    index
        .tokens_of_kind(TokenKind::ColorLiteral)
        .map(|token| ColorDecoration {
            range: token.range,
            value: token.text.clone(),
        })
        .collect()
}

/// Convert decorations to LSP color information
///
/// Literals that do not describe a color are skipped.
pub fn to_color_information(decorations: &[ColorDecoration]) -> Vec<ColorInformation> {
    decorations
        .iter()
        .filter_map(|decoration| {
            let Some(color) = Color::parse(&decoration.value) else {
                log::debug!("Skipping unparseable color literal '{}'", decoration.value);
                return None;
            };

            Some(ColorInformation {
                range: decoration.range.to_lsp_range(),
                color: LspColor {
                    red: color.r as f32 / 255.0,
                    green: color.g as f32 / 255.0,
                    blue: color.b as f32 / 255.0,
                    alpha: color.a,
                },
            })
        })
        .collect()
}

/// Ways to write a picked color back into the document: hex, then functional
pub fn color_presentations(color: &LspColor, range: Range) -> Vec<ColorPresentation> {
    let channel = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u8;
    let picked = Color::new_rgba(
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        color.alpha.clamp(0.0, 1.0),
    );

    let hex = if picked.a < 1.0 {
        picked.to_hex_with_alpha()
    } else {
        picked.to_hex()
    };

    [hex, picked.to_string()]
        .into_iter()
        .map(|label| ColorPresentation {
            text_edit: Some(TextEdit {
                range,
                new_text: label.clone(),
            }),
            label,
            additional_text_edits: None,
        })
        .collect()
}
