//! Client for the CoreNLP annotation server.
//!
//! [`CoreNlpClient`] talks to a server over HTTP; [`CoreNlpBuilder`] creates
//! one, optionally launching a local server that the client then owns.

mod builder;
mod corenlp;
pub mod server;

pub use builder::{
    CoreNlp, CoreNlpBuilder, DEFAULT_JAVA_BIN, DEFAULT_MAX_MEMORY_GB, DEFAULT_PORT,
    DEFAULT_STARTUP_WAIT,
};
pub use corenlp::{CoreNlpClient, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT_MS, Tokenized};
pub use server::{LaunchOptions, ServerProcess};
