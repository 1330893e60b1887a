//! Constituency parse trees in bracketed notation.
//!
//! The server returns trees such as `(ROOT (S (NP (DT The) (NN cat)) (VP (VBD sat))))`.
//! [`ParseTree::parse`] reads that notation and [`ParseTree::pretty`] lays it out
//! one phrase per line.

use std::fmt;

use crate::{CoreNlpError, Result};

const INDENT: &str = "  ";

/// A node of a constituency tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
    /// A labeled phrase or part-of-speech node.
    Node {
        label: String,
        children: Vec<ParseTree>,
    },
    /// A word.
    Leaf(String),
}

impl ParseTree {
    /// Parse bracketed tree notation.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = lex(input);
        let mut pos = 0;
        let tree = parse_node(&tokens, &mut pos)?;
        if pos != tokens.len() {
            return Err(CoreNlpError::ResponseFormat(format!(
                "trailing input after parse tree at token {pos}"
            )));
        }
        Ok(tree)
    }

    pub fn label(&self) -> &str {
        match self {
            ParseTree::Node { label, .. } => label,
            ParseTree::Leaf(word) => word,
        }
    }

    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Node { children, .. } => children,
            ParseTree::Leaf(_) => &[],
        }
    }

    /// Words at the leaves, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ParseTree::Leaf(word) => out.push(word),
            ParseTree::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of levels from this node down to its deepest leaf.
    pub fn height(&self) -> usize {
        match self {
            ParseTree::Leaf(_) => 0,
            ParseTree::Node { children, .. } => {
                1 + children.iter().map(ParseTree::height).max().unwrap_or(0)
            }
        }
    }

    /// Whether this node only spans words and part-of-speech nodes, so it fits on one line.
    fn is_flat(&self) -> bool {
        self.height() <= 2
    }

    /// Indented multi-line rendering.
    ///
    /// Phrases whose children are all part-of-speech nodes stay on one line;
    /// every other child starts a new line, indented one level deeper.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        if self.is_flat() {
            out.push_str(&self.to_string());
            return;
        }
        let ParseTree::Node { label, children } = self else {
            unreachable!("leaves are always flat");
        };
        out.push('(');
        out.push_str(label);
        for child in children {
            out.push('\n');
            out.push_str(&INDENT.repeat(depth + 1));
            child.write_pretty(out, depth + 1);
        }
        out.push(')');
    }
}

impl fmt::Display for ParseTree {
    /// Compact single-line bracketed notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTree::Leaf(word) => f.write_str(word),
            ParseTree::Node { label, children } => {
                write!(f, "({label}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl std::str::FromStr for ParseTree {
    type Err = CoreNlpError;

    fn from_str(s: &str) -> Result<Self> {
        ParseTree::parse(s)
    }
}

#[derive(Debug, PartialEq)]
enum Lexeme<'a> {
    Open,
    Close,
    Atom(&'a str),
}

fn lex(input: &str) -> Vec<Lexeme<'_>> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in input.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(Lexeme::Atom(&input[s..i]));
            }
            match c {
                '(' => out.push(Lexeme::Open),
                ')' => out.push(Lexeme::Close),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(Lexeme::Atom(&input[s..]));
    }
    out
}

fn parse_node(tokens: &[Lexeme<'_>], pos: &mut usize) -> Result<ParseTree> {
    match tokens.get(*pos) {
        Some(Lexeme::Atom(word)) => {
            *pos += 1;
            Ok(ParseTree::Leaf((*word).to_string()))
        }
        Some(Lexeme::Open) => {
            *pos += 1;
            // Unlabeled root, as in "( (S ...))"
            let label = match tokens.get(*pos) {
                Some(Lexeme::Atom(label)) => {
                    *pos += 1;
                    (*label).to_string()
                }
                _ => String::new(),
            };
            let mut children = Vec::new();
            loop {
                match tokens.get(*pos) {
                    Some(Lexeme::Close) => {
                        *pos += 1;
                        return Ok(ParseTree::Node { label, children });
                    }
                    Some(_) => children.push(parse_node(tokens, pos)?),
                    None => {
                        return Err(CoreNlpError::ResponseFormat(format!(
                            "unbalanced parse tree: missing ')' for '{label}'"
                        )));
                    }
                }
            }
        }
        Some(Lexeme::Close) => Err(CoreNlpError::ResponseFormat(format!(
            "unexpected ')' in parse tree at token {pos}"
        ))),
        None => Err(CoreNlpError::ResponseFormat(
            "empty parse tree".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_splits_brackets_and_atoms() {
        assert_eq!(
            lex("(NP (DT The))"),
            vec![
                Lexeme::Open,
                Lexeme::Atom("NP"),
                Lexeme::Open,
                Lexeme::Atom("DT"),
                Lexeme::Atom("The"),
                Lexeme::Close,
                Lexeme::Close,
            ]
        );
    }

    #[test]
    fn height_counts_levels() {
        let tree = ParseTree::parse("(NP (DT The) (NN cat))").unwrap();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.children()[0].height(), 1);
    }

    #[test]
    fn unlabeled_root() {
        let tree = ParseTree::parse("( (S (NN Hi)))").unwrap();
        assert_eq!(tree.label(), "");
        assert_eq!(tree.leaves(), vec!["Hi"]);
    }
}
