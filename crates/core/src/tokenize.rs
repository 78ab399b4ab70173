//! Text tokenizers
//!
//! Two tokenizations feed the engine: diff tokens (whitespace-delimited,
//! punctuation attached) drive the sequence aligner, and word tokens
//! (lowercased, alphabetic-bearing) drive the classifier and the
//! content-word delta.

/// Split text into whitespace-delimited diff tokens.
///
/// Punctuation stays attached to its word ("hardship," is one token), so
/// the edit script reconstructs the input verbatim up to whitespace runs.
pub fn diff_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Split text into lowercase word tokens for classification.
///
/// A token is a maximal run of alphanumeric characters plus internal
/// apostrophes and hyphens ("don't", "well-worn"). Tokens without at
/// least one alphabetic character (bare numbers, stray punctuation) are
/// discarded as structural noise.
pub fn word_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if is_word_char(ch) {
            current.push(ch);
        } else if !current.is_empty() {
            push_word(&mut tokens, &mut current);
        }
    }
    if !current.is_empty() {
        push_word(&mut tokens, &mut current);
    }

    tokens
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}' || ch == '-'
}

fn push_word(tokens: &mut Vec<String>, current: &mut String) {
    // Joiner characters only bind *inside* a word
    let trimmed = current.trim_matches(|c| c == '\'' || c == '\u{2019}' || c == '-');
    if trimmed.chars().any(|c| c.is_alphabetic()) {
        tokens.push(trimmed.to_lowercase());
    }
    current.clear();
}

/// Collapse whitespace runs to single spaces and strip the edges.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
