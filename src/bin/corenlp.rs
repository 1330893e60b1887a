//! corenlp: command-line front end for a CoreNLP server.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use corenlp_client::{Annotator, AnnotatorSet, ClientConfig, CoreNlpBuilder, Tokenized};

/// Server used when neither flags nor a config file name one.
const DEFAULT_URL: &str = "http://localhost:9000";

/// CoreNLP command-line client
#[derive(Parser)]
#[command(name = "corenlp")]
#[command(version = corenlp_client::PKG_VERSION)]
#[command(about = "Annotate text with a Stanford CoreNLP server")]
struct Args {
    /// Server URL
    #[arg(short, long, env = "CORENLP_URL")]
    url: Option<String>,

    /// Launch a server from this CoreNLP directory instead of connecting to one
    #[arg(long, env = "CORENLP_HOME")]
    local_dir: Option<PathBuf>,

    /// Port for a launched server
    #[arg(long)]
    port: Option<u16>,

    /// Pipeline language
    #[arg(short, long)]
    language: Option<String>,

    /// Configuration file (default: ~/.corenlp/config.toml, then /etc/corenlp/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the configured pipeline and print the raw JSON response
    Annotate {
        /// Text to annotate (or omit to read from stdin)
        text: Option<String>,
        /// Comma-separated annotators overriding the configured pipeline
        #[arg(short, long)]
        annotators: Option<String>,
    },

    /// Split text into words
    Tokenize {
        /// Text to tokenize (or omit to read from stdin)
        text: Option<String>,
        /// Do not group words by sentence
        #[arg(long)]
        no_split: bool,
    },

    /// Part-of-speech tag text
    Pos {
        /// Text to tag (or omit to read from stdin)
        text: Option<String>,
    },

    /// Recognize named entities
    Ner {
        /// Text to analyze (or omit to read from stdin)
        text: Option<String>,
        /// Print per-token tags with normalized values instead of mentions
        #[arg(long)]
        per_token: bool,
    },

    /// Print indented constituency parses
    Tree {
        /// Text to parse (or omit to read from stdin)
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let mut client = builder_from_args(&args)?.build().await?;

    match args.command {
        Command::Annotate { text, annotators } => {
            let text = read_text(text)?;
            let annotation = match annotators {
                Some(csv) => {
                    let set = AnnotatorSet::parse(&csv)?;
                    client.annotate_with(&text, &set).await?
                }
                None => client.annotate(&text).await?,
            };
            println!("{}", serde_json::to_string_pretty(annotation.raw())?);
        }
        Command::Tokenize { text, no_split } => {
            let text = read_text(text)?;
            match client.tokenize(&text, !no_split).await? {
                Tokenized::Sentences(sentences) => {
                    for sentence in sentences {
                        println!("{}", sentence.join(" "));
                    }
                }
                Tokenized::Flat(words) => println!("{}", words.join(" ")),
            }
        }
        Command::Pos { text } => {
            let text = read_text(text)?;
            let set = AnnotatorSet::from([Annotator::Tokenize, Annotator::Ssplit, Annotator::Pos]);
            let annotation = client.annotate_with(&text, &set).await?;
            for (sentence, tags) in annotation.words().iter().zip(&annotation.pos_tags()) {
                let tagged: Vec<String> = sentence
                    .iter()
                    .zip(tags)
                    .map(|(word, tag)| format!("{word}/{tag}"))
                    .collect();
                println!("{}", tagged.join(" "));
            }
        }
        Command::Ner { text, per_token } => {
            let text = read_text(text)?;
            if per_token {
                let tags = client.ner_tags(&text).await?;
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else {
                for (i, sentence) in client.named_entities(&text).await?.iter().enumerate() {
                    for entity in sentence {
                        println!(
                            "{i}\t{}\t{}..{}\t{}",
                            entity.text, entity.span.0, entity.span.1, entity.entity_type
                        );
                    }
                }
            }
        }
        Command::Tree { text } => {
            let text = read_text(text)?;
            let set = AnnotatorSet::from([
                Annotator::Tokenize,
                Annotator::Ssplit,
                Annotator::Pos,
                Annotator::Parse,
            ]);
            let annotation = client.annotate_with(&text, &set).await?;
            for i in 0..annotation.parse_trees().len() {
                if let Some(tree) = annotation.pretty_parse(i) {
                    println!("{}\n", tree?);
                }
            }
        }
    }

    client.close();
    Ok(())
}

/// Config file settings, overridden by command-line flags.
fn builder_from_args(args: &Args) -> corenlp_client::Result<CoreNlpBuilder> {
    let mut config = match ClientConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        // Only an explicitly requested config file has to exist.
        Err(e) if args.config.is_some() => return Err(e),
        Err(_) => ClientConfig::default(),
    };

    // Endpoint flags replace whatever endpoint the file configured.
    if args.url.is_some() || args.local_dir.is_some() {
        config.server.url = args.url.clone();
        config.local = None;
    }
    if config.server.url.is_none() && config.local.is_none() && args.local_dir.is_none() {
        config.server.url = Some(DEFAULT_URL.to_string());
    }

    let mut builder = config.builder();
    if let Some(dir) = &args.local_dir {
        builder = builder.local_dir(dir.clone());
    }
    if let Some(port) = args.port {
        builder = builder.port(port);
    }
    if let Some(language) = &args.language {
        builder = builder.language(language.clone());
    }
    Ok(builder)
}

/// Use the argument if given, otherwise read stdin.
fn read_text(arg: Option<String>) -> io::Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("reading text from stdin (end with Ctrl-D)");
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf)
}
