//! Repository locators carried in document URIs
//!
//! Documents opened from a code host are identified by URIs like
//! `git://github.com/acme/styles?3f2a9c1#src/theme.scss`: the authority and
//! path name the repository, the query holds the revision, and the fragment
//! holds the file path.

use url::Url;

use crate::error::{IntelError, IntelResult};

const GIT_SCHEME: &str = "git";

/// Repository and revision a document belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    /// Repository name, e.g. `github.com/acme/styles`
    pub repository: String,
    /// Revision (commit id or ref)
    pub revision: String,
}

/// Resolve the repository and revision from a document URI
pub fn parse_repository_uri(uri: &str) -> IntelResult<RepositoryLocator> {
    let invalid = |message: &str| IntelError::InvalidUri {
        uri: uri.to_string(),
        message: message.to_string(),
    };

    let url = Url::parse(uri).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != GIT_SCHEME {
        return Err(invalid(&format!("unsupported scheme '{}'", url.scheme())));
    }

    let host = url.host_str().unwrap_or("");
    let path = urlencoding::decode(url.path()).map_err(|e| invalid(&e.to_string()))?;
    let repository = format!("{}{}", host, path)
        .trim_start_matches('/')
        .to_string();
    if repository.is_empty() {
        return Err(invalid("missing repository"));
    }

    let revision = urlencoding::decode(url.query().unwrap_or(""))
        .map_err(|e| invalid(&e.to_string()))?
        .into_owned();
    if revision.is_empty() {
        return Err(invalid("could not determine revision"));
    }

    Ok(RepositoryLocator {
        repository,
        revision,
    })
}
