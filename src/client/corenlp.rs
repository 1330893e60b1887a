//! HTTP client for a CoreNLP server.
//!
//! Every call is one `POST /` round trip. The server reads the pipeline from
//! the `properties` query parameter and the text from the request body.
//! See: <https://stanfordnlp.github.io/CoreNLP/corenlp-server.html>

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use super::server::ServerProcess;
use crate::text::normalize_text;
use crate::types::annotation::decode_body;
use crate::types::{Annotation, Annotator, AnnotatorSet, NamedEntity, TokenEntity};
use crate::{CoreNlpError, Result, telemetry};

/// Default pipeline language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default request timeout, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Result of [`CoreNlpClient::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenized {
    /// Words grouped by sentence.
    Sentences(Vec<Vec<String>>),
    /// All words of the text without sentence boundaries.
    Flat(Vec<String>),
}

impl Tokenized {
    /// Words grouped by sentence; a flat result counts as one sentence.
    pub fn into_sentences(self) -> Vec<Vec<String>> {
        match self {
            Tokenized::Sentences(sentences) => sentences,
            Tokenized::Flat(words) => vec![words],
        }
    }
}

/// Client for a CoreNLP server.
///
/// Either talks to a server at a given URL, or owns a server it launched
/// itself (see [`CoreNlpBuilder::local_dir`](super::CoreNlpBuilder::local_dir)).
/// An owned server is killed by [`CoreNlpClient::close`] or, failing that,
/// when the client is dropped.
#[derive(Debug)]
pub struct CoreNlpClient {
    http: Client,
    endpoint: String,
    language: String,
    annotators: AnnotatorSet,
    clean_text: bool,
    server: Option<ServerProcess>,
}

impl CoreNlpClient {
    /// Client for a running server with default settings.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_options(
            url,
            DEFAULT_LANGUAGE,
            AnnotatorSet::all(),
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
        )
    }

    /// Client for a running server.
    pub fn with_options(
        url: impl Into<String>,
        language: impl Into<String>,
        annotators: AnnotatorSet,
        timeout: Duration,
    ) -> Result<Self> {
        let http = http_client(timeout)?;
        let url = url.into();
        Ok(Self {
            http,
            endpoint: url.trim_end_matches('/').to_string(),
            language: language.into(),
            annotators,
            clean_text: true,
            server: None,
        })
    }

    pub(crate) fn from_parts(
        http: Client,
        endpoint: String,
        language: String,
        annotators: AnnotatorSet,
        clean_text: bool,
        server: Option<ServerProcess>,
    ) -> Self {
        Self {
            http,
            endpoint,
            language,
            annotators,
            clean_text,
            server,
        }
    }

    /// Server URL, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Pipeline used by [`CoreNlpClient::annotate`].
    pub fn annotators(&self) -> &AnnotatorSet {
        &self.annotators
    }

    /// Whether this client launched and still owns a server process.
    pub fn owns_server(&self) -> bool {
        self.server.is_some()
    }

    /// Process id of the owned server.
    pub fn server_pid(&self) -> Option<u32> {
        self.server.as_ref().and_then(ServerProcess::id)
    }

    /// Kill the owned server, if any, and wait for it to exit.
    ///
    /// Safe to call repeatedly and on clients that never launched a server.
    pub fn close(&mut self) {
        if let Some(mut server) = self.server.take() {
            server.terminate();
        }
    }

    /// Run the configured pipeline over `text`.
    ///
    /// Whitespace is normalized first (see [`normalize_text`]) unless the
    /// client was built with `clean_text(false)`.
    pub async fn annotate(&self, text: &str) -> Result<Annotation> {
        let text = if self.clean_text {
            normalize_text(text)
        } else {
            text.to_string()
        };
        self.run("annotate", &text, &self.annotators).await
    }

    /// Run an explicit pipeline over `text`, as given.
    pub async fn annotate_with(&self, text: &str, annotators: &AnnotatorSet) -> Result<Annotation> {
        self.run("annotate", text, annotators).await
    }

    /// Split `text` into words, grouped by sentence when `split_sentences` is set.
    pub async fn tokenize(&self, text: &str, split_sentences: bool) -> Result<Tokenized> {
        if split_sentences {
            let annotators = AnnotatorSet::from([Annotator::Tokenize, Annotator::Ssplit]);
            let annotation = self.run("tokenize", text, &annotators).await?;
            Ok(Tokenized::Sentences(annotation.words()))
        } else {
            let annotators = AnnotatorSet::from([Annotator::Tokenize]);
            let annotation = self.run("tokenize", text, &annotators).await?;
            Ok(Tokenized::Flat(
                annotation.words().into_iter().flatten().collect(),
            ))
        }
    }

    /// Part-of-speech tags, one list per sentence.
    pub async fn pos_tag(&self, text: &str) -> Result<Vec<Vec<String>>> {
        let annotators =
            AnnotatorSet::from([Annotator::Tokenize, Annotator::Ssplit, Annotator::Pos]);
        let annotation = self.run("pos_tag", text, &annotators).await?;
        Ok(annotation.pos_tags())
    }

    /// Entity mentions with character spans, one list per sentence.
    pub async fn named_entities(&self, text: &str) -> Result<Vec<Vec<NamedEntity>>> {
        let annotation = self.run("named_entities", text, &ner_pipeline()).await?;
        Ok(annotation.named_entities())
    }

    /// Token-level entity tags, one map per sentence keyed by token position.
    ///
    /// Older form of NER output, kept for callers that want per-token tags with
    /// normalized values. Prefer [`CoreNlpClient::named_entities`].
    pub async fn ner_tags(&self, text: &str) -> Result<Vec<BTreeMap<usize, TokenEntity>>> {
        let annotation = self.run("ner_tags", text, &ner_pipeline()).await?;
        Ok(annotation.token_entities())
    }

    /// Send `text` through `annotators` and return the decoded JSON body.
    ///
    /// Fails with [`CoreNlpError::Http`] if the server cannot be reached or the
    /// timeout elapses, [`CoreNlpError::Api`] on a non-success status, and
    /// [`CoreNlpError::ResponseFormat`] if the body is not a JSON object.
    #[instrument(skip(self, text, annotators), fields(endpoint = %self.endpoint, annotators = %annotators))]
    pub async fn request(&self, text: &str, annotators: &AnnotatorSet) -> Result<Value> {
        let properties = serde_json::json!({ "annotators": annotators.to_string() }).to_string();
        let body = urlencoding::encode(text).into_owned();
        debug!(bytes = text.len(), language = %self.language, "sending annotation request");

        let response = self
            .http
            .post(format!("{}/", self.endpoint))
            .query(&[
                ("properties", properties.as_str()),
                ("pipelineLanguage", self.language.as_str()),
            ])
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CoreNlpError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        decode_body(&body)
    }

    /// Empty request that makes a freshly launched server load its models.
    pub(crate) async fn warm_up(&self) -> Result<()> {
        debug!(endpoint = %self.endpoint, "warming up server");
        self.run("warm_up", "", &self.annotators).await.map(|_| ())
    }

    async fn run(
        &self,
        operation: &'static str,
        text: &str,
        annotators: &AnnotatorSet,
    ) -> Result<Annotation> {
        let start = Instant::now();
        let result = self.request(text, annotators).await.map(Annotation::from_json);
        record_request(operation, start, result.is_ok());
        result
    }
}

/// Build the HTTP client shared by all requests of one [`CoreNlpClient`].
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CoreNlpError::Configuration(format!("failed to build HTTP client: {e}")))
}

fn ner_pipeline() -> AnnotatorSet {
    AnnotatorSet::from([
        Annotator::Tokenize,
        Annotator::Ssplit,
        Annotator::Pos,
        Annotator::Ner,
    ])
}

/// Record request outcome metrics (counter + histogram).
fn record_request(operation: &'static str, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "operation" => operation,
    )
    .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_drops_trailing_slash() {
        let client = CoreNlpClient::new("http://localhost:9000//").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000");
        assert!(!client.owns_server());
    }

    #[test]
    fn flat_tokens_count_as_one_sentence() {
        let tokenized = Tokenized::Flat(vec!["a".into(), "b".into()]);
        assert_eq!(tokenized.into_sentences(), vec![vec!["a", "b"]]);
    }

    #[test]
    fn close_without_server_is_noop() {
        let mut client = CoreNlpClient::new("http://localhost:9000").unwrap();
        client.close();
        client.close();
        assert!(!client.owns_server());
    }
}
