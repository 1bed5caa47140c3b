//! CSS Tree-sitter Node Kind Constants
//!
//! Node kinds from tree-sitter-css and tree-sitter-scss that the extractor
//! relies on, plus the language ids and defaults shared across the crate.
//! Centralizing these constants helps prevent mistakes when the grammar
//! changes.

// Basic structural nodes
/// A single property-value pair (e.g., `color: red;`)
pub const NODE_DECLARATION: &str = "declaration";
/// CSS property name (e.g., `color`, `--accent`)
pub const NODE_PROPERTY_NAME: &str = "property_name";
/// `!important` flag at the end of a declaration
pub const NODE_IMPORTANT: &str = "important";
/// `{ ... }` block of a rule, at-rule, or SCSS nested property
pub const NODE_BLOCK: &str = "block";
/// `/* */` comment, anywhere in the tree
pub const NODE_COMMENT: &str = "comment";
/// `//` comment as tree-sitter-css names it
pub const NODE_JS_COMMENT: &str = "js_comment";
/// `//` comment as tree-sitter-scss names it
pub const NODE_SINGLE_LINE_COMMENT: &str = "single_line_comment";

// SCSS nodes
/// `@include name(args);`
pub const NODE_INCLUDE_STATEMENT: &str = "include_statement";
/// Colon separating property and value
pub const TOKEN_COLON: &str = ":";

// Language ids
/// Language id of plain CSS documents
pub const LANGUAGE_CSS: &str = "css";
/// Language id of SCSS documents
pub const LANGUAGE_SCSS: &str = "scss";

/// Prefix of CSS custom properties
pub const CUSTOM_PROPERTY_PREFIX: &str = "--";
/// Prefix of SCSS variables
pub const SCSS_VARIABLE_PREFIX: &str = "$";

// Defaults
/// Quiet period before a changed document is re-indexed
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 600;
/// Longest a burst of changes may postpone re-indexing
pub const DEFAULT_DEBOUNCE_MAX_WAIT_MS: u64 = 1500;
/// Time budget for one hover lookup
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5000;
/// Code search instance used for variable cross-references
pub const DEFAULT_SOURCEGRAPH_URL: &str = "https://sourcegraph.com";
/// Raw markdown sources of the MDN CSS reference
pub const DEFAULT_DOCS_BASE_URL: &str =
    "https://raw.githubusercontent.com/mdn/content/main/files/en-us/web/css";
/// Public MDN site, for links in documentation hovers
pub const DEFAULT_DOCS_SITE_URL: &str = "https://developer.mozilla.org";
/// Path of the CSS reference on the MDN site
pub const DOCS_CSS_PATH: &str = "/en-US/docs/Web/CSS";
