//! Input text normalization.

use std::sync::LazyLock;

use regex::Regex;

static CARRIAGE_RETURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r+").expect("valid carriage return pattern"));

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x{3000}]+").expect("valid blank run pattern"));

/// Tidy whitespace line by line before sending text to the server.
///
/// Each line is trimmed of surrounding whitespace, carriage returns are
/// removed, and runs of spaces, tabs and ideographic spaces (U+3000) become
/// one ASCII space. Line breaks are kept, so two lines are never merged.
/// Applying it twice gives the same result as applying it once.
pub fn normalize_text(text: &str) -> String {
    text.split('\n')
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    let line = CARRIAGE_RETURNS.replace_all(line.trim(), "");
    BLANK_RUNS.replace_all(&line, " ").into_owned()
}
