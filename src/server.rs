//! CSS Intel Language Server Implementation
//!
//! Provides hover and color decorations for CSS and SCSS files using tower-lsp.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use crate::config::IntelConfig;
use crate::css::decorations::{color_decorations, color_presentations, to_color_information};
use crate::css::document_cache::DocumentCache;
use crate::css::hover::HoverProvider;
use crate::css::token::Cursor;
use crate::error::IntelResult;
use crate::lookup::mdn::MdnDocs;
use crate::lookup::sourcegraph::SourcegraphClient;

/// Everything built from the effective configuration
struct Services {
    cache: DocumentCache,
    hover_provider: HoverProvider,
}

impl Services {
    fn new(config: &IntelConfig) -> IntelResult<Self> {
        let timeout = config.lookup.timeout();
        let sourcegraph = Arc::new(SourcegraphClient::new(&config.sourcegraph, timeout)?);
        let docs = Arc::new(MdnDocs::new(&config.docs, timeout)?);

        Ok(Self {
            cache: DocumentCache::new(config.debounce.clone())?,
            hover_provider: HoverProvider::new(sourcegraph.clone(), sourcegraph, docs, timeout),
        })
    }
}

/// CSS Intel Language Server
pub struct CssIntelLanguageServer {
    client: Client,
    /// Configuration before the client's initialization options are applied
    base_config: IntelConfig,
    /// Set once in `initialize`
    services: OnceLock<Arc<Services>>,
    /// Language id of every open document, needed again on change
    languages: Mutex<HashMap<Url, String>>,
}

impl CssIntelLanguageServer {
    pub fn new(client: Client, base_config: IntelConfig) -> Self {
        Self {
            client,
            base_config,
            services: OnceLock::new(),
            languages: Mutex::new(HashMap::new()),
        }
    }

    fn services(&self) -> Option<Arc<Services>> {
        let services = self.services.get().cloned();
        if services.is_none() {
            log::warn!("Request received before initialize");
        }
        services
    }

    fn language_of(&self, uri: &Url) -> Option<String> {
        self.languages.lock().ok()?.get(uri).cloned()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for CssIntelLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let config = match params.initialization_options {
            Some(options) => self.base_config.clone().with_layer(options).unwrap_or_else(|e| {
                log::warn!("Ignoring initialization options: {}", e);
                self.base_config.clone()
            }),
            None => self.base_config.clone(),
        };
        log::info!("Effective configuration: {:?}", config);

        let services = Services::new(&config).map_err(|e| {
            log::error!("Failed to create services: {}", e);
            tower_lsp::jsonrpc::Error::internal_error()
        })?;
        if self.services.set(Arc::new(services)).is_err() {
            log::warn!("initialize called more than once, keeping the first services");
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                color_provider: Some(ColorProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "CSS Intel Language Server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let language_id = params.text_document.language_id;

        if let Ok(mut languages) = self.languages.lock() {
            languages.insert(uri.clone(), language_id.clone());
        }
        if let Some(services) = self.services() {
            services
                .cache
                .put_now(&uri, params.text_document.text, &language_id);
        }

        self.client
            .log_message(MessageType::INFO, format!("Opened document: {}", uri))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // Full sync: the last change carries the whole document
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        let Some(language_id) = self.language_of(&uri) else {
            log::warn!("[did_change] Change for unopened document {}", uri);
            return;
        };

        if let Some(services) = self.services() {
            services.cache.put(&uri, change.text, &language_id);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        if let Ok(mut languages) = self.languages.lock() {
            languages.remove(&uri);
        }
        if let Some(services) = self.services() {
            services.cache.remove(&uri);
        }

        self.client
            .log_message(MessageType::INFO, format!("Closed document: {}", uri))
            .await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(services) = self.services() else {
            return Ok(None);
        };
        let Some(index) = services.cache.get(&uri) else {
            log::debug!("No index for hover in {}", uri);
            return Ok(None);
        };

        let hover = services
            .hover_provider
            .hover(&index, Cursor::from(position), uri.as_str())
            .await;

        Ok(hover.map(|content| content.to_lsp_hover()))
    }

    async fn document_color(&self, params: DocumentColorParams) -> Result<Vec<ColorInformation>> {
        let uri = params.text_document.uri;

        let colors = match self.services().and_then(|services| services.cache.get(&uri)) {
            Some(index) => to_color_information(&color_decorations(&index)),
            None => Vec::new(),
        };

        Ok(colors)
    }

    async fn color_presentation(
        &self,
        params: ColorPresentationParams,
    ) -> Result<Vec<ColorPresentation>> {
        Ok(color_presentations(&params.color, params.range))
    }
}

/// Create and start the CSS Intel language server on stdio
pub async fn start_language_server(config: IntelConfig) -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(|client| CssIntelLanguageServer::new(client, config.clone()));
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
