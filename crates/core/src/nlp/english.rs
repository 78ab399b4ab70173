//! Rule-based English analyzer
//!
//! A self-contained implementation of [`LanguageAnalyzer`]: regex sentence
//! splitting, closed-class + suffix POS tagging, and a two-pass
//! (verb-then-noun) suffix lemmatizer with irregular-form tables. It trades
//! dictionary coverage for determinism and zero runtime data dependencies,
//! which is the right trade for structural heuristics over paragraph-length
//! text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::nlp::{LanguageAnalyzer, PosTag};

// ============================================================================
// Static word tables
// ============================================================================

/// English stopwords (function words excluded from content comparisons).
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "can", "will", "just", "don't", "should", "should've", "now", "ain't",
    "aren't", "couldn't", "didn't", "doesn't", "hadn't", "hasn't", "haven't", "isn't", "mightn't",
    "mustn't", "needn't", "shan't", "shouldn't", "wasn't", "weren't", "won't", "wouldn't",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "either", "neither",
    "some", "any", "no", "another",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "who", "whom",
    "whose", "which", "what", "something", "someone", "anything", "anyone", "nothing", "nobody",
    "everything", "everyone", "itself", "himself", "herself", "themselves",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "through",
    "during", "before", "after", "above", "below", "over", "under", "between", "against",
    "about", "across", "behind", "beneath", "beside", "beyond", "near", "toward", "towards",
    "upon", "within", "without",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "while", "whereas",
    "unless", "until", "since", "if",
];

const MODALS: &[&str] = &[
    "can", "could", "will", "would", "shall", "should", "may", "might", "must",
];

/// Forms of be/have/do. Tagged as verbs, matching Penn Treebank VB* tags.
const AUX_VERBS: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing",
];

/// Frequent adjectives that no suffix rule can recover.
const COMMON_ADJECTIVES: &[&str] = &[
    "old", "new", "good", "bad", "great", "small", "big", "long", "short", "high", "low",
    "dark", "bright", "quiet", "silent", "heavy", "light", "cold", "warm", "hard", "soft",
    "deep", "shallow", "weary", "tired", "grim", "pale", "faint", "strong", "weak", "sharp",
    "dull", "thin", "thick", "young", "ancient", "empty", "full", "rough", "smooth", "still",
];

/// Irregular past/participle forms mapped to their base verb.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("was", "be"), ("were", "be"), ("is", "be"), ("are", "be"), ("am", "be"), ("been", "be"),
    ("has", "have"), ("had", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
    ("went", "go"), ("gone", "go"), ("ran", "run"), ("saw", "see"), ("seen", "see"),
    ("said", "say"), ("made", "make"), ("took", "take"), ("taken", "take"), ("came", "come"),
    ("knew", "know"), ("known", "know"), ("got", "get"), ("gave", "give"), ("given", "give"),
    ("found", "find"), ("thought", "think"), ("told", "tell"), ("became", "become"),
    ("left", "leave"), ("felt", "feel"), ("brought", "bring"), ("began", "begin"),
    ("kept", "keep"), ("held", "hold"), ("stood", "stand"), ("wrote", "write"),
    ("written", "write"), ("sat", "sit"), ("lost", "lose"), ("met", "meet"), ("spoke", "speak"),
    ("spoken", "speak"), ("broke", "break"), ("broken", "break"), ("wore", "wear"),
    ("worn", "wear"), ("chose", "choose"), ("fell", "fall"), ("fallen", "fall"),
    ("drew", "draw"), ("drawn", "draw"), ("grew", "grow"), ("grown", "grow"),
    ("threw", "throw"), ("thrown", "throw"), ("flew", "fly"), ("drove", "drive"),
    ("driven", "drive"), ("rose", "rise"), ("risen", "rise"), ("ate", "eat"), ("eaten", "eat"),
    ("heard", "hear"), ("meant", "mean"), ("sent", "send"), ("spent", "spend"),
    ("built", "build"), ("caught", "catch"), ("taught", "teach"), ("bought", "buy"),
    ("sought", "seek"), ("fought", "fight"), ("lay", "lie"), ("laid", "lay"), ("paid", "pay"),
    ("shone", "shine"), ("struck", "strike"), ("swung", "swing"), ("hung", "hang"),
    ("sang", "sing"), ("sung", "sing"), ("sank", "sink"), ("bore", "bear"), ("borne", "bear"),
];

/// Irregular plural nouns mapped to their singular.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"), ("feet", "foot"),
    ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"), ("knives", "knife"),
    ("wives", "wife"), ("lives", "life"), ("selves", "self"), ("shelves", "shelf"),
    ("wolves", "wolf"), ("leaves", "leaf"), ("halves", "half"), ("thieves", "thief"),
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());
static DETERMINER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DETERMINERS.iter().copied().collect());
static PRONOUN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| PRONOUNS.iter().copied().collect());
static PREPOSITION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| PREPOSITIONS.iter().copied().collect());
static CONJUNCTION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CONJUNCTIONS.iter().copied().collect());
static MODAL_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| MODALS.iter().copied().collect());
static AUX_VERB_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| AUX_VERBS.iter().copied().collect());
static COMMON_ADJECTIVE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| COMMON_ADJECTIVES.iter().copied().collect());
static IRREGULAR_VERB_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_VERBS.iter().copied().collect());
static IRREGULAR_VERB_FORMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| IRREGULAR_VERBS.iter().map(|(form, _)| *form).collect());
static IRREGULAR_NOUN_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_NOUNS.iter().copied().collect());

/// A sentence ends at a run of terminal punctuation, optionally followed by
/// closing quotes or brackets, then whitespace.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+["'\u{2019})\]]*\s+"#).unwrap());

// ============================================================================
// Analyzer
// ============================================================================

/// Rule-based English implementation of [`LanguageAnalyzer`].
///
/// Stateless and shareable; all tables are static and built once.
#[derive(Debug, Clone, Default)]
pub struct EnglishAnalyzer;

impl EnglishAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Verb-inflection pass. Returns `None` when no verb rule applies, in
    /// which case the caller falls back to noun lemmatization.
    fn verb_lemma(&self, token: &str) -> Option<String> {
        if let Some(base) = IRREGULAR_VERB_MAP.get(token) {
            return Some((*base).to_string());
        }

        let n = token.len();
        if let Some(stem) = token.strip_suffix("ies") {
            if n > 4 {
                return Some(format!("{stem}y"));
            }
        }
        if let Some(stem) = token.strip_suffix("eed") {
            // agreed → agree, freed → free
            if n > 4 {
                return Some(format!("{stem}ee"));
            }
        }
        if let Some(stem) = token.strip_suffix("ied") {
            if n > 4 {
                return Some(format!("{stem}y"));
            }
        }
        if let Some(stem) = token.strip_suffix("ed") {
            if n > 4 {
                return Some(undo_inflection(stem));
            }
        }
        if let Some(stem) = token.strip_suffix("ing") {
            if n > 4 {
                return Some(undo_inflection(stem));
            }
        }
        if let Some(stem) = token.strip_suffix("es") {
            if n > 4 && has_sibilant_ending(stem) {
                return Some(stem.to_string());
            }
        }
        if let Some(stem) = token.strip_suffix('s') {
            if n > 3 && !token.ends_with("ss") && !token.ends_with("us") && !token.ends_with("is")
            {
                return Some(stem.to_string());
            }
        }

        None
    }

    /// Noun-plural pass. Always produces a lemma (possibly the token itself).
    fn noun_lemma(&self, token: &str) -> String {
        if let Some(base) = IRREGULAR_NOUN_MAP.get(token) {
            return (*base).to_string();
        }

        let n = token.len();
        if let Some(stem) = token.strip_suffix("ies") {
            if n > 4 {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = token.strip_suffix("ves") {
            if n > 4 {
                return format!("{stem}f");
            }
        }
        if let Some(stem) = token.strip_suffix("es") {
            if n > 4 && has_sibilant_ending(stem) {
                return stem.to_string();
            }
        }
        if let Some(stem) = token.strip_suffix('s') {
            if n > 3 && !token.ends_with("ss") && !token.ends_with("us") && !token.ends_with("is")
            {
                return stem.to_string();
            }
        }

        token.to_string()
    }

    fn tag_one(&self, token: &str) -> PosTag {
        if !token.is_empty() && token.chars().all(|c| c.is_numeric()) {
            return PosTag::Number;
        }
        if DETERMINER_SET.contains(token) {
            return PosTag::Determiner;
        }
        if PRONOUN_SET.contains(token) {
            return PosTag::Pronoun;
        }
        if MODAL_SET.contains(token) {
            return PosTag::Modal;
        }
        if AUX_VERB_SET.contains(token) {
            return PosTag::Verb;
        }
        if PREPOSITION_SET.contains(token) {
            return PosTag::Preposition;
        }
        if CONJUNCTION_SET.contains(token) {
            return PosTag::Conjunction;
        }
        if STOPWORD_SET.contains(token) {
            // Remaining function words (negation, degree adverbs, particles)
            return PosTag::Other;
        }
        if COMMON_ADJECTIVE_SET.contains(token) {
            return PosTag::Adjective;
        }
        if IRREGULAR_VERB_FORMS.contains(token) {
            return PosTag::Verb;
        }
        if let Some(rest) = token.strip_prefix("un") {
            // Negated participles: unspoken, unbroken, unending
            if IRREGULAR_VERB_FORMS.contains(rest)
                || (rest.len() > 3 && (rest.ends_with("ed") || rest.ends_with("ing")))
            {
                return PosTag::Verb;
            }
        }

        let n = token.len();
        if token.ends_with("ly") && n > 3 {
            return PosTag::Adverb;
        }
        if (token.ends_with("ing") && n > 4) || (token.ends_with("ed") && n > 3) {
            return PosTag::Verb;
        }
        if has_adjective_suffix(token) {
            return PosTag::Adjective;
        }

        PosTag::Noun
    }
}

impl LanguageAnalyzer for EnglishAnalyzer {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        let mut start = 0;
        for boundary in SENTENCE_BOUNDARY.find_iter(trimmed) {
            let sentence = trimmed[start..boundary.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = boundary.end();
        }
        if start < trimmed.len() {
            let rest = trimmed[start..].trim();
            if !rest.is_empty() {
                sentences.push(rest.to_string());
            }
        }

        sentences
    }

    fn tag_pos(&self, tokens: &[String]) -> Vec<PosTag> {
        tokens.iter().map(|t| self.tag_one(t)).collect()
    }

    fn lemmatize(&self, token: &str) -> String {
        // Verb pass first (carries → carry, failing → fail), then fall back
        // to noun plural reduction (figures → figure).
        match self.verb_lemma(token) {
            Some(lemma) => lemma,
            None => self.noun_lemma(token),
        }
    }

    fn is_stopword(&self, token: &str) -> bool {
        STOPWORD_SET.contains(token.to_lowercase().as_str())
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !is_vowel(ch)
}

/// Stems ending in a sibilant take "-es" in the plural / third person.
fn has_sibilant_ending(stem: &str) -> bool {
    stem.ends_with('x')
        || stem.ends_with('z')
        || stem.ends_with("ch")
        || stem.ends_with("sh")
        || stem.ends_with("ss")
}

/// Repair a stem after stripping "-ed"/"-ing": undo consonant doubling
/// (stopp → stop) or restore a dropped final e (mak → make).
fn undo_inflection(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    if n >= 3
        && chars[n - 1] == chars[n - 2]
        && is_consonant(chars[n - 1])
        && chars[n - 1] != 'l'
        && chars[n - 1] != 's'
    {
        return chars[..n - 1].iter().collect();
    }

    // Consonant + l stems dropped an e: settl → settle, struggl → struggle
    if n >= 4 && chars[n - 1] == 'l' && is_consonant(chars[n - 2]) && chars[n - 2] != 'l' {
        return format!("{stem}e");
    }

    // Short stems that dropped a final e: mak → make, hop → hope
    if (3..=4).contains(&n)
        && is_consonant(chars[n - 1])
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
        && is_vowel(chars[n - 2])
        && is_consonant(chars[n - 3])
    {
        return format!("{stem}e");
    }

    stem.to_string()
}

fn has_adjective_suffix(token: &str) -> bool {
    const SUFFIXES: &[&str] = &[
        "ous", "ful", "ive", "less", "able", "ible", "ish", "ary", "al", "ic",
    ];
    token.len() > 4 && SUFFIXES.iter().any(|s| token.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> EnglishAnalyzer {
        EnglishAnalyzer::new()
    }

    fn tags(words: &[&str]) -> Vec<PosTag> {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        analyzer().tag_pos(&tokens)
    }

    #[test]
    fn test_split_two_sentences() {
        let sents = analyzer().split_sentences("He left. She stayed behind.");
        assert_eq!(sents, vec!["He left.", "She stayed behind."]);
    }

    #[test]
    fn test_split_no_terminal_punctuation() {
        let sents = analyzer().split_sentences("etched with lines that speak of hardship");
        assert_eq!(sents.len(), 1);
    }

    #[test]
    fn test_split_empty_is_zero_sentences() {
        assert!(analyzer().split_sentences("").is_empty());
        assert!(analyzer().split_sentences("   ").is_empty());
    }

    #[test]
    fn test_split_handles_quotes_after_terminal() {
        let sents = analyzer().split_sentences("\"Enough.\" He turned away.");
        assert_eq!(sents.len(), 2);
    }

    #[test]
    fn test_lemmatize_verb_inflections() {
        let a = analyzer();
        assert_eq!(a.lemmatize("carries"), "carry");
        assert_eq!(a.lemmatize("failing"), "fail");
        assert_eq!(a.lemmatize("walked"), "walk");
        assert_eq!(a.lemmatize("looked"), "look");
        assert_eq!(a.lemmatize("stopped"), "stop");
        assert_eq!(a.lemmatize("making"), "make");
        assert_eq!(a.lemmatize("agreed"), "agree");
        assert_eq!(a.lemmatize("battered"), "batter");
        assert_eq!(a.lemmatize("settled"), "settle");
    }

    #[test]
    fn test_lemmatize_irregular_verbs() {
        let a = analyzer();
        assert_eq!(a.lemmatize("was"), "be");
        assert_eq!(a.lemmatize("spoke"), "speak");
        assert_eq!(a.lemmatize("held"), "hold");
    }

    #[test]
    fn test_lemmatize_noun_plurals() {
        let a = analyzer();
        assert_eq!(a.lemmatize("figures"), "figure");
        assert_eq!(a.lemmatize("goblins"), "goblin");
        assert_eq!(a.lemmatize("stories"), "story");
        assert_eq!(a.lemmatize("boxes"), "box");
        assert_eq!(a.lemmatize("men"), "man");
    }

    #[test]
    fn test_lemmatize_base_form_unchanged() {
        let a = analyzer();
        assert_eq!(a.lemmatize("weary"), "weary");
        assert_eq!(a.lemmatize("shadow"), "shadow");
        assert_eq!(a.lemmatize("glass"), "glass");
        assert_eq!(a.lemmatize("this"), "this");
    }

    #[test]
    fn test_stopwords() {
        let a = analyzer();
        assert!(a.is_stopword("the"));
        assert!(a.is_stopword("was"));
        assert!(a.is_stopword("don't"));
        assert!(!a.is_stopword("weary"));
        assert!(!a.is_stopword("threat"));
    }

    #[test]
    fn test_tag_closed_classes() {
        assert_eq!(
            tags(&["the", "of", "and", "must", "was"]),
            vec![
                PosTag::Determiner,
                PosTag::Preposition,
                PosTag::Conjunction,
                PosTag::Modal,
                PosTag::Verb,
            ]
        );
    }

    #[test]
    fn test_tag_suffix_rules() {
        assert_eq!(
            tags(&["slowly", "running", "etched", "perilous", "stone"]),
            vec![
                PosTag::Adverb,
                PosTag::Verb,
                PosTag::Verb,
                PosTag::Adjective,
                PosTag::Noun,
            ]
        );
    }

    #[test]
    fn test_tag_negated_participles() {
        assert_eq!(tags(&["unspoken", "unbroken"]), vec![PosTag::Verb, PosTag::Verb]);
    }

    #[test]
    fn test_tag_common_adjectives_and_numbers() {
        assert_eq!(tags(&["old", "42"]), vec![PosTag::Adjective, PosTag::Number]);
    }

    #[test]
    fn test_verb_and_adjective_density_helper() {
        assert!(PosTag::Verb.is_verb_or_adjective());
        assert!(PosTag::Adjective.is_verb_or_adjective());
        assert!(!PosTag::Noun.is_verb_or_adjective());
    }
}
