//! CSS and SCSS hover intel
//!
//! Stylesheets are parsed with tree-sitter-css, every declaration is turned
//! into hoverable tokens, and the tokens are indexed by line so a cursor can
//! be resolved to the token under it.

pub mod classifier;
pub mod color;
pub mod constants;
pub mod decorations;
pub mod docs;
pub mod document_cache;
pub mod extractor;
pub mod hover;
pub mod line_index;
pub mod parser;
pub mod token;
pub mod variables;

#[cfg(test)]
mod extractor_tests;
