//! Document Cache
//!
//! Holds the latest line index of every open stylesheet. Changes are
//! debounced: a burst of `put` calls for one document coalesces into a
//! single rebuild that runs once the document has been quiet for the
//! debounce delay, or once the burst has lasted the maximum wait.
//!
//! Every `put` takes a fresh [`DocumentVersion`]. A rebuild result is only
//! committed if its version is still the newest one requested for the
//! document, so a slow rebuild can never overwrite a newer one. Readers get
//! an `Arc` to a finished index; entries are replaced whole, never mutated.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tokio::time::Instant;
use tower_lsp::lsp_types::Url;

use crate::config::DebounceConfig;
use crate::css::line_index::{LineIndex, index_source};
use crate::css::parser::{CssParser, Dialect};
use crate::error::IntelResult;
use crate::language::document::{DocumentVersion, VersionCounter};

/// Text waiting for its debounce deadline
struct PendingRebuild {
    text: String,
    dialect: Dialect,
    version: DocumentVersion,
    /// First change of the current burst
    first_event: Instant,
}

#[derive(Default)]
struct Schedule {
    /// Newest version requested per document
    latest: HashMap<Url, DocumentVersion>,
    pending: HashMap<Url, PendingRebuild>,
}

/// One parser per dialect
struct Parsers {
    css: CssParser,
    scss: CssParser,
}

impl Parsers {
    fn new() -> IntelResult<Self> {
        Ok(Self {
            css: CssParser::new(Dialect::Css)?,
            scss: CssParser::new(Dialect::Scss)?,
        })
    }

    fn for_dialect(&mut self, dialect: Dialect) -> &mut CssParser {
        match dialect {
            Dialect::Css => &mut self.css,
            Dialect::Scss => &mut self.scss,
        }
    }
}

struct Shared {
    // Lock order: schedule, then entries
    schedule: Mutex<Schedule>,
    entries: RwLock<HashMap<Url, Arc<LineIndex>>>,
    parsers: Mutex<Parsers>,
    versions: VersionCounter,
    debounce: DebounceConfig,
    rebuilds: AtomicU64,
}

/// Line indexes of open documents, rebuilt in the background
#[derive(Clone)]
pub struct DocumentCache {
    shared: Arc<Shared>,
}

impl DocumentCache {
    pub fn new(debounce: DebounceConfig) -> IntelResult<Self> {
        Ok(Self {
            shared: Arc::new(Shared {
                schedule: Mutex::new(Schedule::default()),
                entries: RwLock::new(HashMap::new()),
                parsers: Mutex::new(Parsers::new()?),
                versions: VersionCounter::new(),
                debounce,
                rebuilds: AtomicU64::new(0),
            }),
        })
    }

    /// Schedule a debounced rebuild of `uri` from `text`
    ///
    /// Documents of other languages than CSS and SCSS are ignored. Outside a
    /// tokio runtime the rebuild happens immediately.
    pub fn put(&self, uri: &Url, text: String, language_id: &str) {
        let dialect = match Dialect::from_language_id(language_id) {
            Ok(dialect) => dialect,
            Err(e) => {
                log::debug!("Not indexing {}: {}", uri, e);
                return;
            }
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            self.rebuild_now(uri, text, dialect);
            return;
        };

        let version = self.shared.versions.next_version();
        let now = Instant::now();
        let deadline = {
            let Ok(mut schedule) = self.shared.schedule.lock() else {
                log::error!("[put] Failed to acquire schedule lock");
                return;
            };

            let first_event = schedule
                .pending
                .get(uri)
                .map(|pending| pending.first_event)
                .unwrap_or(now);
            schedule.latest.insert(uri.clone(), version);
            schedule.pending.insert(
                uri.clone(),
                PendingRebuild {
                    text,
                    dialect,
                    version,
                    first_event,
                },
            );

            (now + self.shared.debounce.delay()).min(first_event + self.shared.debounce.max_wait())
        };

        let shared = self.shared.clone();
        let uri = uri.clone();
        runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            shared.flush(&uri, version);
        });
    }

    /// Rebuild `uri` from `text` right away, dropping any pending rebuild
    pub fn put_now(&self, uri: &Url, text: String, language_id: &str) {
        match Dialect::from_language_id(language_id) {
            Ok(dialect) => self.rebuild_now(uri, text, dialect),
            Err(e) => log::debug!("Not indexing {}: {}", uri, e),
        }
    }

    fn rebuild_now(&self, uri: &Url, text: String, dialect: Dialect) {
        let version = self.shared.versions.next_version();
        if let Ok(mut schedule) = self.shared.schedule.lock() {
            schedule.latest.insert(uri.clone(), version);
            schedule.pending.remove(uri);
        }

        self.shared.rebuild(uri, &text, dialect, version);
    }

    /// Latest index of a document, `None` if it is unknown, not yet built,
    /// or failed to parse
    pub fn get(&self, uri: &Url) -> Option<Arc<LineIndex>> {
        self.shared.entries.read().ok()?.get(uri).cloned()
    }

    /// Forget a document, including any pending rebuild
    pub fn remove(&self, uri: &Url) {
        let Ok(mut schedule) = self.shared.schedule.lock() else {
            log::error!("[remove] Failed to acquire schedule lock");
            return;
        };
        schedule.latest.remove(uri);
        schedule.pending.remove(uri);

        if let Ok(mut entries) = self.shared.entries.write() {
            entries.remove(uri);
        }
    }

    /// Number of rebuilds run so far
    pub fn rebuild_count(&self) -> u64 {
        self.shared.rebuilds.load(Ordering::Relaxed)
    }
}

impl Shared {
    /// Run the pending rebuild of `uri` if it is still the one for `version`
    fn flush(&self, uri: &Url, version: DocumentVersion) {
        let pending = {
            let Ok(mut schedule) = self.schedule.lock() else {
                log::error!("[flush] Failed to acquire schedule lock");
                return;
            };
            // A newer change or a removal supersedes this timer
            let current = schedule
                .pending
                .get(uri)
                .is_some_and(|pending| pending.version == version);
            if current {
                schedule.pending.remove(uri)
            } else {
                None
            }
        };

        if let Some(pending) = pending {
            self.rebuild(uri, &pending.text, pending.dialect, pending.version);
        }
    }

    fn rebuild(&self, uri: &Url, text: &str, dialect: Dialect, version: DocumentVersion) {
        self.rebuilds.fetch_add(1, Ordering::Relaxed);

        let result = match self.parsers.lock() {
            Ok(mut parsers) => index_source(parsers.for_dialect(dialect), text),
            Err(_) => {
                log::error!("[rebuild] Failed to acquire parser lock");
                return;
            }
        };

        let Ok(schedule) = self.schedule.lock() else {
            log::error!("[rebuild] Failed to acquire schedule lock");
            return;
        };
        if schedule.latest.get(uri) != Some(&version) {
            log::debug!("Discarding stale index of {} ({:?})", uri, version);
            return;
        }

        let Ok(mut entries) = self.entries.write() else {
            log::error!("[rebuild] Failed to acquire entries lock");
            return;
        };
        match result {
            Ok(index) => {
                log::debug!("Indexed {} tokens in {} ({:?})", index.len(), uri, version);
                entries.insert(uri.clone(), Arc::new(index));
            }
            Err(e) => {
                log::warn!("No index for {}: {}", uri, e);
                entries.remove(uri);
            }
        }
    }
}
