//! MDN property reference
//!
//! Raw markdown is fetched from the MDN content repository; the public site
//! is used for links.

use std::time::Duration;

use crate::config::DocsConfig;
use crate::css::constants::DOCS_CSS_PATH;
use crate::error::{IntelResult, LookupError};
use crate::lookup::DocumentationSource;

pub struct MdnDocs {
    http: reqwest::Client,
    base_url: String,
    site_url: String,
}

impl MdnDocs {
    pub fn new(config: &DocsConfig, timeout: Duration) -> IntelResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
        })
    }

    fn source_url(&self, property: &str) -> String {
        format!("{}/{}/index.md", self.base_url, property.to_ascii_lowercase())
    }
}

#[tower_lsp::async_trait]
impl DocumentationSource for MdnDocs {
    async fn fetch_property_doc(&self, property: &str) -> Result<String, LookupError> {
        let url = self.source_url(property);
        log::debug!("Fetching property documentation: {}", url);

        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NoMatch {
                query: property.to_string(),
            });
        }

        Ok(response.error_for_status()?.text().await?)
    }

    fn property_url(&self, property: &str) -> Option<String> {
        Some(format!(
            "{}{}/{}",
            self.site_url,
            DOCS_CSS_PATH,
            property.to_ascii_lowercase()
        ))
    }

    fn site_url(&self) -> Option<&str> {
        Some(&self.site_url)
    }
}
