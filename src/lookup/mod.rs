//! External lookups used by hover capabilities
//!
//! Hovers over variable references and property names need data the
//! document does not have: where a custom property is defined, what those
//! lines look like, and what a property does. Each source sits behind a
//! trait so the hover provider can be driven by fakes in tests.

pub mod mdn;
pub mod sourcegraph;

use crate::error::LookupError;

/// Where a custom property is defined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionLocation {
    pub repository: String,
    pub file_path: String,
    pub revision: String,
    /// 0-based line of the definition
    pub line: u32,
}

/// Lines `start..end` (0-based, exclusive end) of a file at a revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetRequest {
    pub repository: String,
    pub revision: String,
    pub file_path: String,
    pub start: u32,
    pub end: u32,
}

impl SnippetRequest {
    /// A preview window around a definition: one line before, two after
    pub fn around(location: &DefinitionLocation) -> Self {
        Self {
            repository: location.repository.clone(),
            revision: location.revision.clone(),
            file_path: location.file_path.clone(),
            start: location.line.saturating_sub(1),
            end: location.line + 2,
        }
    }
}

/// Finds the definition of a custom property in a repository
#[tower_lsp::async_trait]
pub trait VariableSearch: Send + Sync {
    async fn find_definition(
        &self,
        repository: &str,
        variable: &str,
    ) -> Result<DefinitionLocation, LookupError>;

    /// Link to the definition, if the backend has a web view
    fn definition_url(&self, _location: &DefinitionLocation) -> Option<String> {
        None
    }

    /// Link to a search for the variable, if the backend has a web view
    fn search_url(&self, _repository: &str, _variable: &str) -> Option<String> {
        None
    }
}

/// Fetches source lines for previews
#[tower_lsp::async_trait]
pub trait SnippetSource: Send + Sync {
    async fn fetch_lines(&self, request: &SnippetRequest) -> Result<Vec<String>, LookupError>;
}

/// Fetches reference documentation for a property, as markdown
#[tower_lsp::async_trait]
pub trait DocumentationSource: Send + Sync {
    async fn fetch_property_doc(&self, property: &str) -> Result<String, LookupError>;

    /// Public page of the property documentation
    fn property_url(&self, _property: &str) -> Option<String> {
        None
    }

    /// Root that relative links in the documentation resolve against
    fn site_url(&self) -> Option<&str> {
        None
    }
}
