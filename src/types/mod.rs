//! Public types for the CoreNLP client API.

pub(crate) mod annotation;
mod annotator;
mod entity;
mod token;
mod tree;

pub use annotation::Annotation;
pub use annotator::{Annotator, AnnotatorSet};
pub use entity::{EntityMention, NamedEntity, TokenEntity};
pub use token::{Dependency, OpenIeTriple, Token};
pub use tree::ParseTree;
