//! Named entity types.

use serde::{Deserialize, Serialize};

/// An entity mention as reported under a sentence's `entitymentions` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityMention {
    pub text: String,
    /// Token offsets within the sentence, `[begin, end)`.
    pub token_begin: usize,
    pub token_end: usize,
    pub doc_token_begin: usize,
    pub doc_token_end: usize,
    pub character_offset_begin: usize,
    pub character_offset_end: usize,
    pub ner: String,
    #[serde(rename = "normalizedNER", skip_serializing_if = "Option::is_none")]
    pub normalized_ner: Option<String>,
}

/// A recognized entity: its text, character span and type label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedEntity {
    pub text: String,
    /// Character offsets `[begin, end)` in the submitted text.
    pub span: (usize, usize),
    pub entity_type: String,
}

impl From<&EntityMention> for NamedEntity {
    fn from(mention: &EntityMention) -> Self {
        Self {
            text: mention.text.clone(),
            span: (
                mention.character_offset_begin,
                mention.character_offset_end,
            ),
            entity_type: mention.ner.clone(),
        }
    }
}

/// Per-token entity tag with its normalized value.
///
/// This is the older token-level view of NER output; prefer
/// [`NamedEntity`], which groups tokens into whole mentions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenEntity {
    pub tag: String,
    pub normalized: String,
}
