//! Token types for annotation results.

use serde::{Deserialize, Serialize};

/// A single token as returned by the server.
///
/// Only `word` is always filled by the tokenizer; the remaining fields
/// depend on which annotators ran.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Token {
    /// 1-based index within the sentence.
    pub index: usize,
    /// Surface form after tokenization.
    pub word: String,
    /// Text exactly as it appeared in the input.
    pub original_text: String,
    /// Lemma (requires `lemma`, which the server adds for `ner`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    /// Start character offset in the original text.
    pub character_offset_begin: usize,
    /// End character offset in the original text (exclusive).
    pub character_offset_end: usize,
    /// Part-of-speech tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Named entity tag, `"O"` outside entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ner: Option<String>,
    /// Normalized entity value (dates, numbers, ...).
    #[serde(rename = "normalizedNER", skip_serializing_if = "Option::is_none")]
    pub normalized_ner: Option<String>,
    /// Whitespace preceding the token.
    pub before: String,
    /// Whitespace following the token.
    pub after: String,
}

impl Token {
    /// Create a token with just a surface form and character offsets.
    pub fn new(index: usize, word: impl Into<String>, begin: usize, end: usize) -> Self {
        let word = word.into();
        Self {
            index,
            original_text: word.clone(),
            word,
            character_offset_begin: begin,
            character_offset_end: end,
            ..Default::default()
        }
    }

    /// Character length of this token in the original text.
    pub fn char_len(&self) -> usize {
        self.character_offset_end
            .saturating_sub(self.character_offset_begin)
    }

    /// Whether the token sits inside a named entity.
    pub fn is_entity(&self) -> bool {
        matches!(self.ner.as_deref(), Some(tag) if tag != "O")
    }
}

/// One labeled head → dependent relation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Dependency {
    /// Relation label, e.g. `nsubj`; the root relation is `ROOT`.
    #[serde(rename = "dep")]
    pub relation: String,
    /// 1-based index of the head token; 0 for the root.
    pub governor: usize,
    pub governor_gloss: String,
    /// 1-based index of the dependent token.
    pub dependent: usize,
    pub dependent_gloss: String,
}

impl Dependency {
    pub fn is_root(&self) -> bool {
        self.governor == 0
    }
}

/// A subject / relation / object triple from open information extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenIeTriple {
    pub subject: String,
    /// Token span `[begin, end)` of the subject.
    pub subject_span: (usize, usize),
    pub relation: String,
    pub relation_span: (usize, usize),
    pub object: String,
    pub object_span: (usize, usize),
}
