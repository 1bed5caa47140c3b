//! Server configuration
//!
//! Settings come in three layers, later ones overriding earlier ones:
//! built-in defaults, an optional JSON file named by `CSS_INTEL_CONFIG`,
//! and the client's `initializationOptions`. Layers are merged as JSON
//! objects, so a layer only needs to carry the keys it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::css::constants::*;
use crate::error::{IntelError, IntelResult, IoContext};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "CSS_INTEL_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DebounceConfig {
    pub delay_ms: u64,
    pub max_wait_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            max_wait_ms: DEFAULT_DEBOUNCE_MAX_WAIT_MS,
        }
    }
}

impl DebounceConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Longest a burst may postpone a rebuild, never shorter than the delay
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms.max(self.delay_ms))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LookupConfig {
    pub timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SourcegraphConfig {
    pub url: String,
    /// Access token, sent as `Authorization: token <value>`
    pub token: Option<String>,
}

impl Default for SourcegraphConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCEGRAPH_URL.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DocsConfig {
    /// Root of the raw markdown sources
    pub base_url: String,
    /// Root of the public site, for links
    pub site_url: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            site_url: DEFAULT_DOCS_SITE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IntelConfig {
    pub debounce: DebounceConfig,
    pub lookup: LookupConfig,
    pub sourcegraph: SourcegraphConfig,
    pub docs: DocsConfig,
    /// One of `error`, `warn`, `info`, `debug`, `trace`, `off`
    pub log_level: String,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            debounce: DebounceConfig::default(),
            lookup: LookupConfig::default(),
            sourcegraph: SourcegraphConfig::default(),
            docs: DocsConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl IntelConfig {
    /// Defaults overlaid with the file named by `CSS_INTEL_CONFIG`, if set
    pub fn load() -> IntelResult<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::default().with_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Overlay a JSON configuration file
    pub fn with_file(self, path: &Path) -> IntelResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_io_context(&format!("Failed to read config file {}", path.display()))?;
        let layer: Value = serde_json::from_str(&content).map_err(|e| IntelError::Config {
            message: format!("{} is not valid JSON: {}", path.display(), e),
        })?;

        self.with_layer(layer)
    }

    /// Overlay a JSON object; `null` leaves the configuration unchanged
    pub fn with_layer(self, layer: Value) -> IntelResult<Self> {
        if layer.is_null() {
            return Ok(self);
        }
        if !layer.is_object() {
            return Err(IntelError::Config {
                message: format!("expected a JSON object, got {}", layer),
            });
        }

        let mut merged = serde_json::to_value(&self).map_err(|e| IntelError::Config {
            message: e.to_string(),
        })?;
        merge_values(&mut merged, layer);

        serde_json::from_value(merged).map_err(|e| IntelError::Config {
            message: e.to_string(),
        })
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Recursively overlay `layer` onto `base`; objects merge, everything else replaces
fn merge_values(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}
