//! corenlp-client - Client for the Stanford CoreNLP annotation server
//!
//! This crate sends text to a CoreNLP server over HTTP and turns the nested
//! JSON it returns into typed, per-sentence accessors. It can also launch a
//! server from a local CoreNLP download and shut it down again when the
//! client goes away.
//!
//! # Example
//!
//! ```rust,no_run
//! use corenlp_client::{CoreNlp, Tokenized};
//!
//! #[tokio::main]
//! async fn main() -> corenlp_client::Result<()> {
//!     let client = CoreNlp::builder()
//!         .url("http://localhost:9000")
//!         .annotators("tokenize,ssplit,pos,ner")
//!         .build()
//!         .await?;
//!
//!     if let Tokenized::Sentences(sentences) = client.tokenize("The cat sat.", true).await? {
//!         println!("{sentences:?}");
//!     }
//!
//!     for sentence in client.named_entities("Obama was born in Hawaii.").await? {
//!         for entity in sentence {
//!             println!("{} {:?} {}", entity.text, entity.span, entity.entity_type);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Local server
//!
//! ```rust,ignore
//! let mut client = CoreNlp::builder()
//!     .local_dir("/opt/stanford-corenlp-4.5.0")
//!     .port(9001)
//!     .max_memory_gb(6)
//!     .build()
//!     .await?;
//!
//! let annotation = client.annotate("The quick brown fox jumped.").await?;
//! if let Some(tree) = annotation.pretty_parse(0) {
//!     println!("{}", tree?);
//! }
//!
//! // Also happens when `client` is dropped.
//! client.close();
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod text;
pub mod types;

// Re-export main types at crate root
pub use client::{CoreNlp, CoreNlpBuilder, CoreNlpClient, Tokenized};
pub use config::ClientConfig;
pub use error::{CoreNlpError, Result};
pub use text::normalize_text;

// Re-export all types
pub use types::{
    Annotation, Annotator, AnnotatorSet, Dependency, EntityMention, NamedEntity, OpenIeTriple,
    ParseTree, Token, TokenEntity,
};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
