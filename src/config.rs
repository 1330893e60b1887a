//! Configuration file loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. an explicit path (e.g. the CLI's `--config` flag)
//! 2. `~/.corenlp/config.toml` (user)
//! 3. `/etc/corenlp/config.toml` (system)
//!
//! ```toml
//! [server]
//! url = "http://localhost:9000"
//! language = "en"
//! annotators = "tokenize,ssplit,pos,ner"
//! timeout_ms = 60000
//!
//! # Instead of `server.url`: launch a server from a local download.
//! [local]
//! dir = "/opt/stanford-corenlp-4.5.0"
//! port = 9000
//! max_memory_gb = 4
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{
    CoreNlp, CoreNlpBuilder, DEFAULT_JAVA_BIN, DEFAULT_LANGUAGE, DEFAULT_MAX_MEMORY_GB,
    DEFAULT_PORT, DEFAULT_TIMEOUT_MS,
};
use crate::{CoreNlpError, Result};

/// Client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub local: Option<LocalConfig>,
}

/// Connection and pipeline settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// URL of a running server.
    #[serde(default)]
    pub url: Option<String>,
    /// Pipeline language (default: "en").
    #[serde(default = "default_language")]
    pub language: String,
    /// Comma-separated default pipeline. Unknown annotators make the client
    /// fall back to the full pipeline rather than fail.
    #[serde(default)]
    pub annotators: Option<String>,
    /// Request timeout in milliseconds (default: 60000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Normalize whitespace before `annotate` (default: true).
    #[serde(default = "default_clean_text")]
    pub clean_text: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            language: default_language(),
            annotators: None,
            timeout_ms: default_timeout_ms(),
            clean_text: default_clean_text(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_clean_text() -> bool {
    true
}

/// Settings for launching a local server.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalConfig {
    /// Directory holding the CoreNLP jars.
    pub dir: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_memory_gb")]
    pub max_memory_gb: u32,
    /// Server worker threads (default: logical CPUs).
    #[serde(default)]
    pub threads: Option<usize>,
    /// Pause before the warm-up request, in milliseconds (default: 1000).
    #[serde(default = "default_startup_wait_ms")]
    pub startup_wait_ms: u64,
    #[serde(default = "default_java_bin")]
    pub java_bin: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_memory_gb() -> u32 {
    DEFAULT_MAX_MEMORY_GB
}

fn default_startup_wait_ms() -> u64 {
    1000
}

fn default_java_bin() -> String {
    DEFAULT_JAVA_BIN.to_string()
}

impl ClientConfig {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.corenlp/config.toml`
    /// 3. `/etc/corenlp/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        let content = fs::read_to_string(&path).map_err(|e| {
            CoreNlpError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            CoreNlpError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CoreNlpError::Configuration(e.to_string()))
    }

    /// First existing file among the explicit path or the search locations.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        let candidates = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => Self::search_paths(),
        };
        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            return Ok(found.clone());
        }

        let tried = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(CoreNlpError::Configuration(match explicit {
            Some(_) => format!("Config file not found: {tried}"),
            None => format!("No config file found (looked in {tried})"),
        }))
    }

    /// Per-user file first, then the system-wide one.
    fn search_paths() -> Vec<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".corenlp").join("config.toml"))
            .into_iter()
            .chain([PathBuf::from("/etc/corenlp/config.toml")])
            .collect()
    }

    /// A client builder carrying these settings.
    pub fn builder(&self) -> CoreNlpBuilder {
        let mut builder = CoreNlp::builder()
            .language(self.server.language.clone())
            .timeout_ms(self.server.timeout_ms)
            .clean_text(self.server.clean_text);

        if let Some(annotators) = &self.server.annotators {
            builder = builder.annotators(annotators);
        }
        if let Some(url) = &self.server.url {
            builder = builder.url(url.clone());
        }
        if let Some(local) = &self.local {
            builder = builder
                .local_dir(local.dir.clone())
                .port(local.port)
                .max_memory_gb(local.max_memory_gb)
                .startup_wait(Duration::from_millis(local.startup_wait_ms))
                .java_bin(local.java_bin.clone());
            if let Some(threads) = local.threads {
                builder = builder.threads(threads);
            }
        }
        builder
    }
}
