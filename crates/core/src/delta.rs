//! Content-word delta (signal isolation)
//!
//! Structure-blind counterpart of the clause aligner: both texts are
//! reduced to sets of lemmatized content words, and the symmetric
//! difference surfaces the vocabulary that actually changed. Runs
//! independently of the sequence aligner.

use serde::Serialize;
use std::collections::HashSet;

use crate::nlp::LanguageAnalyzer;
use crate::tokenize::word_tokens;

/// Lemmatized content words unique to one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentWordDelta {
    /// Lemmas present in the baseline but absent from the current text,
    /// in first-occurrence order
    pub removed: Vec<String>,
    /// Lemmas present in the current text but absent from the baseline
    pub added: Vec<String>,
}

impl ContentWordDelta {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Compute the content-word delta between two texts.
///
/// Each text is tokenized into lowercase word tokens, lemmatized, and
/// stripped of stopwords; the surviving lemma sets are differenced. A
/// lemma appearing in both texts appears in neither output. Output lists
/// keep first-occurrence order with duplicates collapsed; identical texts
/// yield two empty lists.
pub fn content_word_delta(
    baseline: &str,
    current: &str,
    analyzer: &dyn LanguageAnalyzer,
) -> ContentWordDelta {
    let (baseline_ordered, baseline_set) = content_lemmas(baseline, analyzer);
    let (current_ordered, current_set) = content_lemmas(current, analyzer);

    ContentWordDelta {
        removed: baseline_ordered
            .into_iter()
            .filter(|lemma| !current_set.contains(lemma))
            .collect(),
        added: current_ordered
            .into_iter()
            .filter(|lemma| !baseline_set.contains(lemma))
            .collect(),
    }
}

/// Extract the deduplicated content lemmas of one text, both as an
/// ordered list (first occurrence) and as a set for O(1) membership.
fn content_lemmas(text: &str, analyzer: &dyn LanguageAnalyzer) -> (Vec<String>, HashSet<String>) {
    let mut ordered = Vec::new();
    let mut seen = HashSet::new();

    for token in word_tokens(text) {
        let lemma = analyzer.lemmatize(&token);
        if analyzer.is_stopword(&lemma) {
            continue;
        }
        if seen.insert(lemma.clone()) {
            ordered.push(lemma);
        }
    }

    (ordered, seen)
}
