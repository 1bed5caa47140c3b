//! Test utilities shared across the codebase
//!
//! In-memory stand-ins for the lookup backends. Each fake counts its calls
//! so tests can check which capability a hover dispatched to.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::css::hover::HoverProvider;
use crate::error::LookupError;
use crate::lookup::{
    DefinitionLocation, DocumentationSource, SnippetRequest, SnippetSource, VariableSearch,
};

/// Document URI of a file in a repository at a fixed revision
pub const TEST_DOCUMENT_URI: &str = "git://github.com/acme/styles?3f2a9c1#src/button.css";

/// Variable search answering from a fixed location, or with no match
#[derive(Default)]
pub struct FakeVariableSearch {
    pub location: Option<DefinitionLocation>,
    /// Artificial latency per call
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeVariableSearch {
    pub fn found(line: u32) -> Self {
        Self {
            location: Some(DefinitionLocation {
                repository: "github.com/acme/styles".to_string(),
                file_path: "src/tokens.css".to_string(),
                revision: "3f2a9c1".to_string(),
                line,
            }),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[tower_lsp::async_trait]
impl VariableSearch for FakeVariableSearch {
    async fn find_definition(
        &self,
        _repository: &str,
        variable: &str,
    ) -> Result<DefinitionLocation, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.location.clone().ok_or_else(|| LookupError::NoMatch {
            query: variable.to_string(),
        })
    }

    fn definition_url(&self, location: &DefinitionLocation) -> Option<String> {
        Some(format!("https://code.example.com/{}?L{}", location.file_path, location.line + 1))
    }
}

/// Snippet source serving lines from an in-memory file
#[derive(Default)]
pub struct FakeSnippetSource {
    pub content: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeSnippetSource {
    pub fn with_content(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            ..Default::default()
        }
    }
}

#[tower_lsp::async_trait]
impl SnippetSource for FakeSnippetSource {
    async fn fetch_lines(&self, request: &SnippetRequest) -> Result<Vec<String>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let content = self.content.as_ref().ok_or_else(|| LookupError::Backend {
            message: "file unavailable".to_string(),
        })?;
        Ok(content
            .lines()
            .skip(request.start as usize)
            .take((request.end - request.start) as usize)
            .map(str::to_string)
            .collect())
    }
}

/// Documentation source answering every property with the same page
#[derive(Default)]
pub struct FakeDocumentationSource {
    pub page: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeDocumentationSource {
    pub fn with_page(page: &str) -> Self {
        Self {
            page: Some(page.to_string()),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[tower_lsp::async_trait]
impl DocumentationSource for FakeDocumentationSource {
    async fn fetch_property_doc(&self, property: &str) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.page.clone().ok_or_else(|| LookupError::NoMatch {
            query: property.to_string(),
        })
    }

    fn property_url(&self, property: &str) -> Option<String> {
        Some(format!("https://docs.example.org/css/{}", property))
    }

    fn site_url(&self) -> Option<&str> {
        Some("https://docs.example.org")
    }
}

/// Hover provider over the given fakes
pub fn hover_provider(
    variables: Arc<FakeVariableSearch>,
    snippets: Arc<FakeSnippetSource>,
    docs: Arc<FakeDocumentationSource>,
    timeout: Duration,
) -> HoverProvider {
    HoverProvider::new(variables, snippets, docs, timeout)
}
