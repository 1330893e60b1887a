//! Annotator names and ordered annotator sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A processing stage of the CoreNLP pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Annotator {
    /// Word tokenization
    Tokenize,
    /// Sentence splitting
    Ssplit,
    /// Part-of-speech tagging
    Pos,
    /// Named entity recognition
    Ner,
    /// Constituency parsing
    Parse,
    /// Dependency parsing
    Depparse,
    /// Open information extraction
    Openie,
}

impl Annotator {
    /// Every annotator the client knows about, in pipeline order.
    pub const ALL: [Annotator; 7] = [
        Annotator::Tokenize,
        Annotator::Ssplit,
        Annotator::Pos,
        Annotator::Ner,
        Annotator::Parse,
        Annotator::Depparse,
        Annotator::Openie,
    ];

    /// Name as understood by the server's `annotators` property.
    pub fn as_str(&self) -> &'static str {
        match self {
            Annotator::Tokenize => "tokenize",
            Annotator::Ssplit => "ssplit",
            Annotator::Pos => "pos",
            Annotator::Ner => "ner",
            Annotator::Parse => "parse",
            Annotator::Depparse => "depparse",
            Annotator::Openie => "openie",
        }
    }
}

impl fmt::Display for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Annotator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Annotator::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown annotator: {s}. Valid values: tokenize, ssplit, pos, ner, parse, depparse, openie"
                )
            })
    }
}

/// Ordered, duplicate-free list of annotators sent with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnnotatorSet(Vec<Annotator>);

impl AnnotatorSet {
    /// The full default pipeline.
    pub fn all() -> Self {
        Self(Annotator::ALL.to_vec())
    }

    /// Build a set from annotators, dropping repeats but keeping first-seen order.
    pub fn new(annotators: impl IntoIterator<Item = Annotator>) -> Self {
        let mut out = Vec::new();
        for annotator in annotators {
            if !out.contains(&annotator) {
                out.push(annotator);
            }
        }
        Self(out)
    }

    /// Parse a comma-separated annotator list strictly.
    ///
    /// Fails if the list is empty or any entry is not a known annotator.
    pub fn parse(csv: &str) -> Result<Self, String> {
        if csv.trim().is_empty() {
            return Err("annotator list is empty".to_string());
        }
        let annotators = csv
            .split(',')
            .map(|name| name.trim().parse::<Annotator>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(annotators))
    }

    /// Parse a comma-separated annotator list, falling back to [`AnnotatorSet::all`]
    /// when the list contains anything unrecognized.
    ///
    /// The fallback is silent apart from a `warn!` log line: a bad annotator
    /// list never makes client construction fail.
    pub fn parse_or_default(csv: &str) -> Self {
        match Self::parse(csv) {
            Ok(set) => set,
            Err(reason) => {
                tracing::warn!(
                    annotators = csv,
                    %reason,
                    "annotator list rejected, using the default pipeline"
                );
                Self::all()
            }
        }
    }

    pub fn contains(&self, annotator: Annotator) -> bool {
        self.0.contains(&annotator)
    }

    pub fn iter(&self) -> impl Iterator<Item = Annotator> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AnnotatorSet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for AnnotatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, annotator) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(annotator.as_str())?;
        }
        Ok(())
    }
}

impl TryFrom<String> for AnnotatorSet {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AnnotatorSet> for String {
    fn from(set: AnnotatorSet) -> Self {
        set.to_string()
    }
}

impl<const N: usize> From<[Annotator; N]> for AnnotatorSet {
    fn from(annotators: [Annotator; N]) -> Self {
        Self::new(annotators)
    }
}
