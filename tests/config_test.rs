use std::io::Write;
use std::time::Duration;

use corenlp_client::{AnnotatorSet, ClientConfig, CoreNlpError};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_explicit_path() {
    let file = write_config(
        r#"
        [server]
        url = "http://nlp.example:9000"
        language = "de"
        timeout_ms = 5000
        clean_text = false
        "#,
    );

    let config = ClientConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.server.url.as_deref(), Some("http://nlp.example:9000"));
    assert_eq!(config.server.language, "de");
    assert_eq!(config.server.timeout_ms, 5000);
    assert!(!config.server.clean_text);
    assert!(config.local.is_none());
}

#[test]
fn test_invalid_toml_is_configuration_error() {
    let file = write_config("[server\nurl = ");
    let err = ClientConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, CoreNlpError::Configuration(_)));
}

#[test]
fn test_unknown_types_rejected() {
    let err = ClientConfig::from_toml_str("[server]\ntimeout_ms = \"soon\"").unwrap_err();
    assert!(matches!(err, CoreNlpError::Configuration(_)));
}

#[tokio::test]
async fn test_builder_from_config() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("pipelineLanguage", "fr"))
        .and(query_param("properties", r#"{"annotators":"tokenize,ssplit,pos"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"sentences": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::from_toml_str(&format!(
        r#"
        [server]
        url = "{}"
        language = "fr"
        annotators = "tokenize,ssplit,pos"
        "#,
        mock_server.uri()
    ))
    .unwrap();

    let client = config.builder().build().await.unwrap();
    assert_eq!(client.language(), "fr");
    assert_eq!(
        client.annotators(),
        &AnnotatorSet::parse("tokenize,ssplit,pos").unwrap()
    );
    client.annotate("Bonjour.").await.unwrap();
}

#[tokio::test]
async fn test_config_with_bad_annotators_falls_back() {
    let config = ClientConfig::from_toml_str(
        r#"
        [server]
        url = "http://localhost:9000"
        annotators = "tokenize,coref"
        "#,
    )
    .unwrap();

    let client = config.builder().build().await.unwrap();
    assert_eq!(client.annotators(), &AnnotatorSet::all());
}

#[tokio::test]
async fn test_config_with_url_and_local_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::from_toml_str(&format!(
        r#"
        [server]
        url = "http://localhost:9000"

        [local]
        dir = "{}"
        startup_wait_ms = 0
        "#,
        dir.path().display()
    ))
    .unwrap();

    let local = config.local.as_ref().unwrap();
    assert_eq!(Duration::from_millis(local.startup_wait_ms), Duration::ZERO);

    let err = config.builder().build().await.unwrap_err();
    assert!(matches!(err, CoreNlpError::Configuration(_)));
}
