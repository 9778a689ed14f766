use std::collections::BTreeSet;

/// Returns the set of unique whitespace delimited words in `content`.
///
/// Only ASCII whitespace (space, tab, newline, vertical tab, form feed and
/// carriage return) separates words; other Unicode spaces are part of a word.
/// Words are compared exactly as written; no case folding or punctuation
/// stripping is done. Training and prediction must both go through here so
/// the vocabulary stays consistent.
pub fn unique_words(content: &str) -> BTreeSet<&str> {
    content
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .collect()
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
