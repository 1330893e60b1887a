//! Typed view over one annotation response.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::entity::{EntityMention, NamedEntity, TokenEntity};
use super::token::{Dependency, OpenIeTriple, Token};
use super::tree::ParseTree;
use crate::{CoreNlpError, Result};

/// Read-only view over a server response.
///
/// Every per-sentence field is filled only from sentences that carry the
/// corresponding key, so the sequences are empty for annotators that did not
/// run. A missing or wrongly typed key is never an error.
///
/// When the response has no `sentences` array (tokenizer-only requests), the
/// top-level `tokens` array becomes a single entry of [`Annotation::tokens`].
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    raw: Value,
    sentence_split: bool,
    tokens: Vec<Vec<Token>>,
    parse: Vec<String>,
    binary_parse: Vec<String>,
    basic_dependencies: Vec<Vec<Dependency>>,
    enhanced_dependencies: Vec<Vec<Dependency>>,
    enhanced_plus_plus_dependencies: Vec<Vec<Dependency>>,
    entity_mentions: Vec<Vec<EntityMention>>,
    openie: Vec<Vec<OpenIeTriple>>,
}

impl Annotation {
    /// Build the view from a decoded response body.
    pub fn from_json(raw: Value) -> Self {
        let mut annotation = Annotation::default();

        match raw.get("sentences").and_then(Value::as_array) {
            Some(sentences) => {
                annotation.sentence_split = true;
                for sentence in sentences {
                    annotation.push_sentence(sentence);
                }
            }
            None => {
                if let Some(tokens) = field::<Vec<Token>>(&raw, "tokens") {
                    annotation.tokens.push(tokens);
                }
            }
        }

        annotation.raw = raw;
        annotation
    }

    /// Decode a response body and build the view.
    ///
    /// Fails with [`CoreNlpError::ResponseFormat`] if the body is not a JSON object.
    pub fn from_body(body: &str) -> Result<Self> {
        decode_body(body).map(Self::from_json)
    }

    fn push_sentence(&mut self, sentence: &Value) {
        if let Some(tokens) = field(sentence, "tokens") {
            self.tokens.push(tokens);
        }
        if let Some(parse) = field::<String>(sentence, "parse") {
            self.parse.push(collapse_whitespace(&parse));
        }
        if let Some(parse) = field::<String>(sentence, "binaryParse") {
            self.binary_parse.push(collapse_whitespace(&parse));
        }
        if let Some(deps) = field(sentence, "basicDependencies") {
            self.basic_dependencies.push(deps);
        }
        if let Some(deps) = field(sentence, "enhancedDependencies") {
            self.enhanced_dependencies.push(deps);
        }
        if let Some(deps) = field(sentence, "enhancedPlusPlusDependencies") {
            self.enhanced_plus_plus_dependencies.push(deps);
        }
        if let Some(mentions) = field(sentence, "entitymentions") {
            self.entity_mentions.push(mentions);
        }
        if let Some(triples) = field(sentence, "openie") {
            self.openie.push(triples);
        }
    }

    /// The response exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Whether the response was grouped into sentences.
    pub fn is_sentence_split(&self) -> bool {
        self.sentence_split
    }

    /// Tokens, one list per sentence.
    pub fn tokens(&self) -> &[Vec<Token>] {
        &self.tokens
    }

    /// Constituency parses with whitespace runs collapsed to one space.
    pub fn parse_trees(&self) -> &[String] {
        &self.parse
    }

    /// Binarized constituency parses with whitespace runs collapsed.
    pub fn binary_parse_trees(&self) -> &[String] {
        &self.binary_parse
    }

    pub fn basic_dependencies(&self) -> &[Vec<Dependency>] {
        &self.basic_dependencies
    }

    pub fn enhanced_dependencies(&self) -> &[Vec<Dependency>] {
        &self.enhanced_dependencies
    }

    pub fn enhanced_plus_plus_dependencies(&self) -> &[Vec<Dependency>] {
        &self.enhanced_plus_plus_dependencies
    }

    pub fn entity_mentions(&self) -> &[Vec<EntityMention>] {
        &self.entity_mentions
    }

    pub fn openie(&self) -> &[Vec<OpenIeTriple>] {
        &self.openie
    }

    /// Word surfaces, one list per sentence.
    pub fn words(&self) -> Vec<Vec<String>> {
        self.tokens
            .iter()
            .map(|sentence| sentence.iter().map(|t| t.word.clone()).collect())
            .collect()
    }

    /// Part-of-speech tags, one list per sentence.
    ///
    /// Tokens without a tag contribute an empty string so that tag lists
    /// stay aligned with [`Annotation::words`].
    pub fn pos_tags(&self) -> Vec<Vec<String>> {
        self.tokens
            .iter()
            .map(|sentence| {
                sentence
                    .iter()
                    .map(|t| t.pos.clone().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Entity mentions with their character spans, one list per sentence.
    pub fn named_entities(&self) -> Vec<Vec<NamedEntity>> {
        self.entity_mentions
            .iter()
            .map(|mentions| mentions.iter().map(NamedEntity::from).collect())
            .collect()
    }

    /// Token-level entity tags, one map per sentence keyed by token position.
    ///
    /// Only tokens tagged with something other than `"O"` and carrying a
    /// non-empty normalized value are included.
    pub fn token_entities(&self) -> Vec<BTreeMap<usize, TokenEntity>> {
        self.tokens
            .iter()
            .map(|sentence| {
                sentence
                    .iter()
                    .enumerate()
                    .filter(|(_, token)| token.is_entity())
                    .filter_map(|(idx, token)| {
                        let tag = token.ner.as_deref()?;
                        let normalized = token.normalized_ner.as_deref().filter(|n| !n.is_empty())?;
                        Some((
                            idx,
                            TokenEntity {
                                tag: tag.to_string(),
                                normalized: normalized.to_string(),
                            },
                        ))
                    })
                    .collect()
            })
            .collect()
    }

    /// Parse the `index`-th constituency tree.
    pub fn parse_tree(&self, index: usize) -> Option<Result<ParseTree>> {
        self.parse.get(index).map(|s| ParseTree::parse(s))
    }

    /// Indented rendering of the `index`-th constituency tree.
    pub fn pretty_parse(&self, index: usize) -> Option<Result<String>> {
        self.parse_tree(index).map(|tree| tree.map(|t| t.pretty()))
    }
}

impl TryFrom<&str> for Annotation {
    type Error = CoreNlpError;

    fn try_from(body: &str) -> Result<Self> {
        Annotation::from_body(body)
    }
}

/// Decode a response body, which must be a JSON object.
pub(crate) fn decode_body(body: &str) -> Result<Value> {
    let raw: Value = serde_json::from_str(body)
        .map_err(|e| CoreNlpError::ResponseFormat(format!("body is not valid JSON: {e}")))?;
    if !raw.is_object() {
        return Err(CoreNlpError::ResponseFormat(format!(
            "expected a JSON object, got {}",
            json_kind(&raw)
        )));
    }
    Ok(raw)
}

/// Decode `object[key]`, treating absence or a type mismatch as "not present".
fn field<T: DeserializeOwned>(object: &Value, key: &str) -> Option<T> {
    let value = object.get(key)?;
    match <T as serde::Deserialize>::deserialize(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(key, error = %e, "ignoring malformed annotation field");
            None
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_joins_lines() {
        assert_eq!(
            collapse_whitespace("(ROOT\n  (S\n    (NN Hi)))"),
            "(ROOT (S (NN Hi)))"
        );
    }

    #[test]
    fn field_ignores_type_mismatch() {
        let value = serde_json::json!({"parse": 42});
        assert!(field::<String>(&value, "parse").is_none());
        assert!(field::<String>(&value, "missing").is_none());
    }
}
