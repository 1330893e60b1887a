//! Builder for configuring client instances

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use super::corenlp::{CoreNlpClient, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_MS, http_client};
use super::server::{LaunchOptions, ServerProcess};
use crate::types::AnnotatorSet;
use crate::{CoreNlpError, Result};

/// Default port for a locally launched server.
pub const DEFAULT_PORT: u16 = 9000;

/// Default JVM heap for a locally launched server, in gigabytes.
pub const DEFAULT_MAX_MEMORY_GB: u32 = 4;

/// Default pause between spawning a local server and the warm-up request.
pub const DEFAULT_STARTUP_WAIT: Duration = Duration::from_secs(1);

/// Default runtime used to launch a local server.
pub const DEFAULT_JAVA_BIN: &str = "java";

/// Main entry point for creating clients.
pub struct CoreNlp;

impl CoreNlp {
    /// Create a new builder for configuring the client.
    pub fn builder() -> CoreNlpBuilder {
        CoreNlpBuilder::new()
    }
}

/// Builder for configuring client instances.
///
/// Exactly one of [`url`](CoreNlpBuilder::url) or
/// [`local_dir`](CoreNlpBuilder::local_dir) must be set.
#[derive(Debug, Clone)]
pub struct CoreNlpBuilder {
    url: Option<String>,
    local_dir: Option<PathBuf>,
    language: String,
    annotators: AnnotatorSet,
    port: u16,
    max_memory_gb: u32,
    threads: usize,
    timeout: Duration,
    startup_wait: Duration,
    java_bin: String,
    clean_text: bool,
}

impl CoreNlpBuilder {
    pub fn new() -> Self {
        Self {
            url: None,
            local_dir: None,
            language: DEFAULT_LANGUAGE.to_string(),
            annotators: AnnotatorSet::all(),
            port: DEFAULT_PORT,
            max_memory_gb: DEFAULT_MAX_MEMORY_GB,
            threads: default_threads(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            startup_wait: DEFAULT_STARTUP_WAIT,
            java_bin: DEFAULT_JAVA_BIN.to_string(),
            clean_text: true,
        }
    }

    /// Use an already running server.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Launch a server from the CoreNLP jars in `dir` and own it.
    pub fn local_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_dir = Some(dir.into());
        self
    }

    /// Pipeline language (default: `en`).
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Default pipeline as a comma-separated list, e.g. `"tokenize,ssplit,pos"`.
    ///
    /// A list containing an unknown annotator is ignored and the full default
    /// pipeline is used instead. This never makes [`build`](CoreNlpBuilder::build)
    /// fail; a warning is logged.
    pub fn annotators(mut self, csv: impl AsRef<str>) -> Self {
        self.annotators = AnnotatorSet::parse_or_default(csv.as_ref());
        self
    }

    /// Default pipeline as a typed set.
    pub fn annotator_set(mut self, annotators: AnnotatorSet) -> Self {
        self.annotators = annotators;
        self
    }

    /// Port for a locally launched server (default: 9000).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// JVM heap for a locally launched server, in gigabytes (default: 4).
    pub fn max_memory_gb(mut self, gb: u32) -> Self {
        self.max_memory_gb = gb;
        self
    }

    /// Worker threads for a locally launched server (default: logical CPUs).
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Per-request timeout in milliseconds (default: 60000).
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Duration::from_millis(ms);
        self
    }

    /// Pause between spawning a local server and warming it up (default: 1s).
    pub fn startup_wait(mut self, wait: Duration) -> Self {
        self.startup_wait = wait;
        self
    }

    /// Runtime executable for a locally launched server (default: `java`).
    pub fn java_bin(mut self, java_bin: impl Into<String>) -> Self {
        self.java_bin = java_bin.into();
        self
    }

    /// Normalize whitespace before [`CoreNlpClient::annotate`] (default: on).
    pub fn clean_text(mut self, clean: bool) -> Self {
        self.clean_text = clean;
        self
    }

    /// Build the client.
    ///
    /// With a local directory this validates the directory, checks the
    /// runtime, spawns the server, waits for the startup delay and sends an
    /// empty warm-up request. A warm-up that cannot reach the server is only
    /// logged, since a slow JVM may still be binding its port. A warm-up whose
    /// response cannot be read fails the build and the process is killed.
    pub async fn build(self) -> Result<CoreNlpClient> {
        let http = http_client(self.timeout)?;

        match (self.url, self.local_dir) {
            (Some(_), Some(_)) => Err(CoreNlpError::Configuration(
                "url and local_dir are mutually exclusive".to_string(),
            )),
            (None, None) => Err(CoreNlpError::Configuration(
                "either url or local_dir must be set".to_string(),
            )),
            (Some(url), None) => Ok(CoreNlpClient::from_parts(
                http,
                url.trim_end_matches('/').to_string(),
                self.language,
                self.annotators,
                self.clean_text,
                None,
            )),
            (None, Some(dir)) => {
                let options = LaunchOptions {
                    dir,
                    port: self.port,
                    max_memory_gb: self.max_memory_gb,
                    threads: self.threads,
                    java_bin: self.java_bin,
                };
                let server = ServerProcess::launch(&options)?;
                let client = CoreNlpClient::from_parts(
                    http,
                    format!("http://127.0.0.1:{}", self.port),
                    self.language,
                    self.annotators,
                    self.clean_text,
                    Some(server),
                );

                tokio::time::sleep(self.startup_wait).await;
                match client.warm_up().await {
                    Ok(()) => {}
                    // Still starting up; the first real request reports it if it never does.
                    Err(e) if e.is_transport() => {
                        warn!(port = self.port, error = %e, "warm-up request failed, server may still be starting");
                    }
                    Err(e) => {
                        warn!(port = self.port, error = %e, "warm-up response unreadable, stopping server");
                        return Err(e);
                    }
                }
                Ok(client)
            }
        }
    }
}

impl Default for CoreNlpBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let builder = CoreNlp::builder();
        assert_eq!(builder.language, "en");
        assert_eq!(builder.port, 9000);
        assert_eq!(builder.max_memory_gb, 4);
        assert!(builder.threads >= 1);
        assert_eq!(builder.timeout, Duration::from_secs(60));
        assert_eq!(builder.annotators, AnnotatorSet::all());
        assert!(builder.clean_text);
    }

    #[test]
    fn invalid_annotators_fall_back_to_default() {
        let builder = CoreNlp::builder().annotators("tokenize,lemma");
        assert_eq!(builder.annotators, AnnotatorSet::all());
    }

    #[test]
    fn valid_annotators_are_kept() {
        let builder = CoreNlp::builder().annotators("tokenize,ssplit");
        assert_eq!(builder.annotators.to_string(), "tokenize,ssplit");
    }
}
