//! Natural language analysis seam
//!
//! The classifier needs exactly four language-dependent operations:
//! sentence splitting, POS tagging, lemmatization, and stopword testing.
//! They live behind the [`LanguageAnalyzer`] trait so the engine can run
//! against any backend; [`EnglishAnalyzer`] is the shipped rule-based
//! implementation.

pub mod english;

pub use english::EnglishAnalyzer;

/// Coarse part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Modal,
    Number,
    Other,
}

impl PosTag {
    /// Whether this tag counts toward verb+adjective density
    pub fn is_verb_or_adjective(&self) -> bool {
        matches!(self, PosTag::Verb | PosTag::Adjective)
    }
}

/// Narrow interface over a natural-language toolkit.
///
/// Implementations must be deterministic: the classifier's output is a
/// pure function of its inputs, and that only holds if the analyzer
/// underneath is too.
pub trait LanguageAnalyzer: Send + Sync {
    /// Split text into sentences. Empty or whitespace-only text yields
    /// an empty list; text without terminal punctuation is one sentence.
    fn split_sentences(&self, text: &str) -> Vec<String>;

    /// Tag each token with a coarse part of speech.
    ///
    /// Tokens are expected lowercased (the output of
    /// [`word_tokens`](crate::tokenize::word_tokens)).
    fn tag_pos(&self, tokens: &[String]) -> Vec<PosTag>;

    /// Reduce a token to its base lemma.
    fn lemmatize(&self, token: &str) -> String;

    /// Whether a token is a high-frequency function word.
    fn is_stopword(&self, token: &str) -> bool;
}
