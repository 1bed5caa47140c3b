//! Sourcegraph backend
//!
//! Variable definitions are found with a code search for `--name:` inside
//! the document's repository; previews are cut from the file contents at
//! the matched revision. Both go through the GraphQL API.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::SourcegraphConfig;
use crate::error::{IntelResult, LookupError};
use crate::lookup::{DefinitionLocation, SnippetRequest, SnippetSource, VariableSearch};

const SEARCH_QUERY: &str = r#"
query Search($query: String!) {
    search(query: $query) {
        results {
            results {
                __typename
                ... on FileMatch {
                    lineMatches { lineNumber }
                    repository {
                        name
                        defaultBranch { target { oid } }
                    }
                    file { path }
                }
            }
        }
    }
}
"#;

const FILE_CONTENT_QUERY: &str = r#"
query FileContent($repoName: String!, $commitID: String!, $filePath: String!) {
    repository(name: $repoName) {
        commit(rev: $commitID) {
            file(path: $filePath) { content }
        }
    }
}
"#;

/// Revision used when a repository reports no default branch
const FALLBACK_REVISION: &str = "HEAD";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    search: Option<SearchPayload>,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    results: SearchResults,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
enum SearchResult {
    FileMatch(FileMatch),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMatch {
    line_matches: Vec<LineMatch>,
    repository: RepositoryNode,
    file: FileNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineMatch {
    line_number: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    name: String,
    default_branch: Option<BranchNode>,
}

#[derive(Debug, Deserialize)]
struct BranchNode {
    target: TargetNode,
}

#[derive(Debug, Deserialize)]
struct TargetNode {
    oid: String,
}

#[derive(Debug, Deserialize)]
struct FileNode {
    path: String,
}

#[derive(Debug, Deserialize)]
struct ContentData {
    repository: Option<ContentRepository>,
}

#[derive(Debug, Deserialize)]
struct ContentRepository {
    commit: Option<ContentCommit>,
}

#[derive(Debug, Deserialize)]
struct ContentCommit {
    file: Option<ContentFile>,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    content: String,
}

/// Search query that finds the declaration of `variable` in `repository`
pub fn definition_query(repository: &str, variable: &str) -> String {
    format!("{} {}: count:all", repository_filter(repository), variable)
}

fn repository_filter(repository: &str) -> String {
    format!("repo:^({})$", regex::escape(repository))
}

/// Decode a GraphQL response body, surfacing payload errors
fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, LookupError> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let message = response
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(LookupError::Backend { message });
    }

    response.data.ok_or_else(|| LookupError::Backend {
        message: "response has no data".to_string(),
    })
}

/// First file match of a search, as a definition location
fn first_definition(data: SearchData, query: &str) -> Result<DefinitionLocation, LookupError> {
    let no_match = || LookupError::NoMatch {
        query: query.to_string(),
    };

    data.search
        .ok_or_else(no_match)?
        .results
        .results
        .into_iter()
        .find_map(|result| match result {
            SearchResult::FileMatch(file_match) => {
                let line = file_match.line_matches.first()?.line_number;
                let revision = file_match
                    .repository
                    .default_branch
                    .map(|branch| branch.target.oid)
                    .filter(|oid| !oid.is_empty())
                    .unwrap_or_else(|| FALLBACK_REVISION.to_string());

                Some(DefinitionLocation {
                    repository: file_match.repository.name,
                    file_path: file_match.file.path,
                    revision,
                    line,
                })
            }
            SearchResult::Other => None,
        })
        .ok_or_else(no_match)
}

/// Lines `start..end` of a file's content
fn content_lines(data: ContentData, request: &SnippetRequest) -> Result<Vec<String>, LookupError> {
    let content = data
        .repository
        .and_then(|repository| repository.commit)
        .and_then(|commit| commit.file)
        .map(|file| file.content)
        .ok_or_else(|| LookupError::NoMatch {
            query: format!("{}@{}:{}", request.repository, request.revision, request.file_path),
        })?;

    Ok(content
        .lines()
        .skip(request.start as usize)
        .take(request.end.saturating_sub(request.start) as usize)
        .map(str::to_string)
        .collect())
}

/// GraphQL client for a Sourcegraph instance
pub struct SourcegraphClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl SourcegraphClient {
    pub fn new(config: &SourcegraphConfig, timeout: Duration) -> IntelResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, LookupError> {
        let mut request = self
            .http
            .post(format!("{}/.api/graphql", self.base_url))
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let body = request.send().await?.error_for_status()?.text().await?;
        decode_response(&body)
    }
}

#[tower_lsp::async_trait]
impl VariableSearch for SourcegraphClient {
    async fn find_definition(
        &self,
        repository: &str,
        variable: &str,
    ) -> Result<DefinitionLocation, LookupError> {
        let query = definition_query(repository, variable);
        log::debug!("Searching variable definition: {}", query);

        let data: SearchData = self.query(SEARCH_QUERY, json!({ "query": query })).await?;
        first_definition(data, &query)
    }

    fn definition_url(&self, location: &DefinitionLocation) -> Option<String> {
        Some(format!(
            "{}/{}@{}/-/blob/{}?L{}",
            self.base_url,
            location.repository,
            location.revision,
            location.file_path,
            location.line + 1
        ))
    }

    fn search_url(&self, repository: &str, variable: &str) -> Option<String> {
        let query = format!("{} {}:", repository_filter(repository), variable);
        Some(format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(&query)
        ))
    }
}

#[tower_lsp::async_trait]
impl SnippetSource for SourcegraphClient {
    async fn fetch_lines(&self, request: &SnippetRequest) -> Result<Vec<String>, LookupError> {
        let data: ContentData = self
            .query(
                FILE_CONTENT_QUERY,
                json!({
                    "repoName": request.repository,
                    "commitID": request.revision,
                    "filePath": request.file_path,
                }),
            )
            .await?;
        content_lines(data, request)
    }
}
