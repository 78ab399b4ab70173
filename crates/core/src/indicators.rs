//! Micro-indicator classification for clause rows
//!
//! Clause rows reveal *what* changed between two texts; micro-indicators
//! label the *structural character* of each change with deterministic,
//! rule-based heuristics — no inference, no embeddings, no hidden state.
//! Classification is a pure function of the row, the lexicon store, the
//! configuration, and the language analyzer.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::IndicatorConfig;
use crate::diff::{ClauseRow, LabeledRow};
use crate::lexicon::LexiconStore;
use crate::nlp::{LanguageAnalyzer, PosTag};
use crate::tokenize::word_tokens;

/// The closed vocabulary of structural-shift labels.
///
/// A row may carry any subset; evaluation order is fixed and matches the
/// declaration order here. `ToneReframing` and `LexicalPivot` are
/// fallbacks: they are only consulted when no earlier indicator fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Many tokens condensed into fewer
    Compression,
    /// Short phrase rewritten into a longer clause
    Expansion,
    /// Abstract vocabulary replaced by physical vocabulary
    EmbodimentShift,
    /// Concrete vocabulary replaced by abstract vocabulary
    AbstractionUp,
    /// A word moved up an intensity scale
    IntensityUp,
    /// A word moved down an intensity scale
    IntensityDown,
    /// Sentences merged into fewer
    Consolidation,
    /// A clause split into more sentences
    Fragmentation,
    /// Verb/adjective density changed markedly
    ModalityShift,
    /// A substitution with no other structural signature
    ToneReframing,
    /// Rare content word swapped for another rare content word
    LexicalPivot,
}

impl Indicator {
    /// Every indicator, in evaluation order
    pub const ALL: [Indicator; 11] = [
        Indicator::Compression,
        Indicator::Expansion,
        Indicator::EmbodimentShift,
        Indicator::AbstractionUp,
        Indicator::IntensityUp,
        Indicator::IntensityDown,
        Indicator::Consolidation,
        Indicator::Fragmentation,
        Indicator::ModalityShift,
        Indicator::ToneReframing,
        Indicator::LexicalPivot,
    ];

    const LABELS: [&'static str; 11] = [
        "compression",
        "expansion",
        "embodiment shift",
        "abstraction \u{2191}",
        "intensity \u{2191}",
        "intensity \u{2193}",
        "consolidation",
        "fragmentation",
        "modality shift",
        "tone reframing",
        "lexical pivot",
    ];

    /// Display label, also used on the wire
    pub fn label(&self) -> &'static str {
        Self::LABELS[*self as usize]
    }

    /// Parse a display label back into an indicator
    pub fn from_label(label: &str) -> Option<Indicator> {
        Self::ALL.iter().copied().find(|i| i.label() == label)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Indicator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Indicator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Indicator::from_label(&label)
            .ok_or_else(|| de::Error::unknown_variant(&label, &Indicator::LABELS))
    }
}

/// Rule-based classifier over clause rows.
///
/// Holds only shared immutable collaborators, so one classifier can serve
/// concurrent analyses; classifying row *i* never depends on row *j*.
pub struct RowClassifier {
    lexicons: Arc<LexiconStore>,
    analyzer: Arc<dyn LanguageAnalyzer>,
    config: IndicatorConfig,
}

impl RowClassifier {
    pub fn new(lexicons: Arc<LexiconStore>, analyzer: Arc<dyn LanguageAnalyzer>) -> Self {
        Self { lexicons, analyzer, config: IndicatorConfig::default() }
    }

    pub fn with_config(mut self, config: IndicatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Classify one replacement row.
    ///
    /// Returns the indicators that fired, in evaluation order. Rows with
    /// a blank side are not classified (classification only applies to
    /// replacements) and yield an empty list. Never fails: a heuristic
    /// with no lexicon match simply contributes no tag.
    pub fn classify_row(&self, removed: &str, added: &str) -> Vec<Indicator> {
        if removed.trim().is_empty() || added.trim().is_empty() {
            return Vec::new();
        }

        let removed_tokens = word_tokens(removed);
        let added_tokens = word_tokens(added);
        let mut fired = Vec::new();

        // -- Size indicators (arithmetically exclusive pair) ----------------

        if self.config.is_enabled(Indicator::Compression)
            && check_compression(&removed_tokens, &added_tokens, &self.config)
        {
            fired.push(Indicator::Compression);
        }
        if self.config.is_enabled(Indicator::Expansion)
            && check_expansion(&removed_tokens, &added_tokens, &self.config)
        {
            fired.push(Indicator::Expansion);
        }

        // -- Lexicon polarity indicators (independent; may co-occur) --------

        if self.config.is_enabled(Indicator::EmbodimentShift)
            && self.lexicons.embodiment.shift_applies(&removed_tokens, &added_tokens)
        {
            fired.push(Indicator::EmbodimentShift);
        }
        if self.config.is_enabled(Indicator::AbstractionUp)
            && self.lexicons.abstraction.shift_applies(&removed_tokens, &added_tokens)
        {
            fired.push(Indicator::AbstractionUp);
        }

        // -- Intensity scales -----------------------------------------------

        if self.config.is_enabled(Indicator::IntensityUp)
            || self.config.is_enabled(Indicator::IntensityDown)
        {
            if let Some(direction) = self.check_intensity(&removed_tokens, &added_tokens) {
                if self.config.is_enabled(direction) {
                    fired.push(direction);
                }
            }
        }

        // -- Sentence boundaries (opposite deltas, cannot both fire) --------

        let sentences_removed = self.analyzer.split_sentences(removed).len();
        let sentences_added = self.analyzer.split_sentences(added).len();
        if self.config.is_enabled(Indicator::Consolidation)
            && sentences_removed > sentences_added
        {
            fired.push(Indicator::Consolidation);
        }
        if self.config.is_enabled(Indicator::Fragmentation) && sentences_added > sentences_removed
        {
            fired.push(Indicator::Fragmentation);
        }

        // -- POS density ----------------------------------------------------

        if self.config.is_enabled(Indicator::ModalityShift)
            && self.check_modality(&removed_tokens, &added_tokens)
        {
            fired.push(Indicator::ModalityShift);
        }

        // -- Fallbacks ------------------------------------------------------
        // Tone reframing: something was substituted, but no structural
        // heuristic claimed it. Lexical pivot: still nothing claimed it,
        // and rare content words moved on both sides.

        let removed_set: HashSet<&str> = removed_tokens.iter().map(String::as_str).collect();
        let added_set: HashSet<&str> = added_tokens.iter().map(String::as_str).collect();

        if fired.is_empty()
            && self.config.is_enabled(Indicator::ToneReframing)
            && !removed_tokens.is_empty()
            && !added_tokens.is_empty()
            && removed_set != added_set
        {
            fired.push(Indicator::ToneReframing);
        }

        if fired.is_empty()
            && self.config.is_enabled(Indicator::LexicalPivot)
            && self.check_pivot(&removed_set, &added_set)
        {
            fired.push(Indicator::LexicalPivot);
        }

        fired
    }

    /// Classify every row of a transformation map.
    ///
    /// Non-replacement rows (one side empty) pass through with an empty
    /// indicator list.
    pub fn classify_rows(&self, rows: &[ClauseRow]) -> Vec<LabeledRow> {
        rows.iter()
            .map(|row| LabeledRow {
                removed: row.removed.clone(),
                added: row.added.clone(),
                indicators: if row.is_replacement() {
                    self.classify_row(&row.removed, &row.added)
                } else {
                    Vec::new()
                },
            })
            .collect()
    }

    /// First removed/added token pair sharing an intensity scale at
    /// different ranks decides the direction. Iteration is in token and
    /// scale-index order, so the result is deterministic.
    fn check_intensity(&self, removed: &[String], added: &[String]) -> Option<Indicator> {
        for word_removed in removed {
            for placement_removed in self.lexicons.intensity.placements(word_removed) {
                for word_added in added {
                    for placement_added in self.lexicons.intensity.placements(word_added) {
                        if placement_added.scale == placement_removed.scale
                            && placement_added.rank != placement_removed.rank
                        {
                            return Some(if placement_added.rank > placement_removed.rank {
                                Indicator::IntensityUp
                            } else {
                                Indicator::IntensityDown
                            });
                        }
                    }
                }
            }
        }
        None
    }

    fn check_modality(&self, removed: &[String], added: &[String]) -> bool {
        if removed.is_empty() || added.is_empty() {
            return false;
        }

        let density_removed = verb_adjective_density(&self.analyzer.tag_pos(removed));
        let density_added = verb_adjective_density(&self.analyzer.tag_pos(added));

        (density_added - density_removed).abs() > self.config.modality_density_threshold
    }

    fn check_pivot(&self, removed_set: &HashSet<&str>, added_set: &HashSet<&str>) -> bool {
        let unique_rare = |own: &HashSet<&str>, other: &HashSet<&str>| {
            own.iter().any(|token| {
                !other.contains(token)
                    && !self.analyzer.is_stopword(token)
                    && !self.lexicons.is_known(token)
            })
        };

        unique_rare(removed_set, added_set) && unique_rare(added_set, removed_set)
    }
}

fn check_compression(removed: &[String], added: &[String], config: &IndicatorConfig) -> bool {
    !added.is_empty()
        && removed.len() >= config.min_tokens
        && removed.len() as f64 >= config.compression_ratio * added.len() as f64
}

fn check_expansion(removed: &[String], added: &[String], config: &IndicatorConfig) -> bool {
    !removed.is_empty()
        && added.len() >= config.min_tokens
        && added.len() as f64 >= config.expansion_ratio * removed.len() as f64
}

fn verb_adjective_density(tags: &[PosTag]) -> f64 {
    let hits = tags.iter().filter(|t| t.is_verb_or_adjective()).count();
    hits as f64 / tags.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{IntensityIndex, PolarityTable};
    use crate::nlp::EnglishAnalyzer;
    use std::collections::BTreeMap;

    fn strs(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn test_store() -> LexiconStore {
        let embodiment = PolarityTable::new(
            "embodiment",
            strs(&["tension", "burden", "dread"]),
            strs(&["hands", "face", "eyes", "shoulders"]),
        )
        .unwrap();
        let abstraction = PolarityTable::new(
            "abstraction",
            strs(&["coat", "boots", "lantern"]),
            strs(&["authority", "influence"]),
        )
        .unwrap();
        let mut scales = BTreeMap::new();
        scales.insert(
            "unease".to_string(),
            strs(&["calm", "uneasy", "anxious", "perilous"]),
        );
        scales.insert("strength".to_string(), strs(&["fragile", "sturdy", "unbreakable"]));

        LexiconStore::new(embodiment, abstraction, IntensityIndex::new(scales).unwrap())
    }

    fn classifier() -> RowClassifier {
        RowClassifier::new(Arc::new(test_store()), Arc::new(EnglishAnalyzer::new()))
    }

    fn classifier_with(config: IndicatorConfig) -> RowClassifier {
        classifier().with_config(config)
    }

    #[test]
    fn test_label_round_trip() {
        for indicator in Indicator::ALL {
            assert_eq!(Indicator::from_label(indicator.label()), Some(indicator));
        }
        assert_eq!(Indicator::from_label("unknown"), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Indicator::IntensityUp).unwrap();
        assert_eq!(json, "\"intensity \u{2191}\"");
        let parsed: Indicator = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Indicator::IntensityUp);
    }

    #[test]
    fn test_clear_compression() {
        let labels = classifier()
            .classify_row("etched with lines that speak of hardship", "suggesting");
        assert!(labels.contains(&Indicator::Compression));
        assert!(!labels.contains(&Indicator::Expansion));
        // The fallbacks stay silent once a structural indicator fires
        assert!(!labels.contains(&Indicator::ToneReframing));
        assert!(!labels.contains(&Indicator::LexicalPivot));
    }

    #[test]
    fn test_no_compression_on_similar_length() {
        let labels = classifier().classify_row("a quiet word", "a gentle word");
        assert!(!labels.contains(&Indicator::Compression));
    }

    #[test]
    fn test_compression_min_tokens_guard() {
        // 1 → 0-ish swaps stay unflagged: larger side below min_tokens
        let labels = classifier().classify_row("weary", "exhausted");
        assert!(!labels.contains(&Indicator::Compression));
        assert!(!labels.contains(&Indicator::Expansion));
    }

    #[test]
    fn test_compression_threshold_is_monotonic() {
        let removed = "five worn words stacked here";
        let added = "two words";

        let fired_at = |ratio: f64| {
            classifier_with(IndicatorConfig::new().with_compression_ratio(ratio))
                .classify_row(removed, added)
                .contains(&Indicator::Compression)
        };

        assert!(fired_at(2.0));
        assert!(fired_at(2.5));
        assert!(!fired_at(3.0));
    }

    #[test]
    fn test_clear_expansion() {
        let labels = classifier().classify_row("suggesting", "etched with lines that speak");
        assert!(labels.contains(&Indicator::Expansion));
        assert!(!labels.contains(&Indicator::Compression));
    }

    #[test]
    fn test_embodiment_shift() {
        let labels = classifier().classify_row("a knot of tension", "clenched hands");
        assert!(labels.contains(&Indicator::EmbodimentShift));
    }

    #[test]
    fn test_embodiment_needs_both_sides() {
        let labels = classifier().classify_row("steady hands", "tired eyes");
        assert!(!labels.contains(&Indicator::EmbodimentShift));
    }

    #[test]
    fn test_abstraction_up() {
        let labels = classifier().classify_row("a heavy coat", "an air of authority");
        assert!(labels.contains(&Indicator::AbstractionUp));
    }

    #[test]
    fn test_embodiment_and_abstraction_may_cooccur() {
        // Coverage gap in one lexicon must not suppress the other
        let labels = classifier()
            .classify_row("tension under the coat", "hands gripping authority");
        assert!(labels.contains(&Indicator::EmbodimentShift));
        assert!(labels.contains(&Indicator::AbstractionUp));
    }

    #[test]
    fn test_intensity_up_and_down() {
        let up = classifier().classify_row("an uneasy silence", "a perilous silence");
        assert!(up.contains(&Indicator::IntensityUp));

        let down = classifier().classify_row("a perilous silence", "an uneasy silence");
        assert!(down.contains(&Indicator::IntensityDown));
    }

    #[test]
    fn test_intensity_symmetry() {
        let forward = classifier().classify_row("uneasy steps", "perilous steps");
        let backward = classifier().classify_row("perilous steps", "uneasy steps");
        assert!(forward.contains(&Indicator::IntensityUp));
        assert!(backward.contains(&Indicator::IntensityDown));
    }

    #[test]
    fn test_intensity_ignores_cross_scale_pairs() {
        let labels = classifier().classify_row("an uneasy gait", "a fragile gait");
        assert!(!labels.contains(&Indicator::IntensityUp));
        assert!(!labels.contains(&Indicator::IntensityDown));
    }

    #[test]
    fn test_intensity_same_word_no_shift() {
        let labels = classifier().classify_row("uneasy quiet", "uneasy hush");
        assert!(!labels.contains(&Indicator::IntensityUp));
        assert!(!labels.contains(&Indicator::IntensityDown));
    }

    #[test]
    fn test_consolidation() {
        let labels = classifier().classify_row(
            "He stopped. He waited by the gate.",
            "He stopped and waited by the gate.",
        );
        assert!(labels.contains(&Indicator::Consolidation));
        assert!(!labels.contains(&Indicator::Fragmentation));
    }

    #[test]
    fn test_fragmentation() {
        let labels = classifier().classify_row(
            "He stopped and waited by the gate.",
            "He stopped. He waited by the gate.",
        );
        assert!(labels.contains(&Indicator::Fragmentation));
        assert!(!labels.contains(&Indicator::Consolidation));
    }

    #[test]
    fn test_modality_shift() {
        // All nouns → all verbs/adjectives is the clearest density swing
        let labels = classifier().classify_row("stone wall gate", "gleaming shimmering");
        assert!(labels.contains(&Indicator::ModalityShift));
    }

    #[test]
    fn test_modality_below_threshold_is_silent() {
        let config = IndicatorConfig::new().with_modality_density_threshold(1.0);
        let labels =
            classifier_with(config).classify_row("stone wall gate", "gleaming shimmering lamp");
        assert!(!labels.contains(&Indicator::ModalityShift));
    }

    #[test]
    fn test_tone_reframing_is_sole_fallback() {
        let labels = classifier().classify_row("a silent threat", "an unspoken intensity");
        assert_eq!(labels, vec![Indicator::ToneReframing]);
    }

    #[test]
    fn test_tone_reframing_silent_when_sets_match() {
        let labels = classifier().classify_row("the goblin waited", "waited the goblin");
        assert!(!labels.contains(&Indicator::ToneReframing));
    }

    #[test]
    fn test_lexical_pivot_when_tone_disabled() {
        let config = IndicatorConfig::new().with_enabled(vec![Indicator::LexicalPivot]);
        let labels = classifier_with(config).classify_row("a silent threat", "an unspoken omen");
        assert_eq!(labels, vec![Indicator::LexicalPivot]);
    }

    #[test]
    fn test_lexical_pivot_needs_rare_words_on_both_sides() {
        let config = IndicatorConfig::new().with_enabled(vec![Indicator::LexicalPivot]);
        // "uneasy" is on an intensity scale and the rest are stopwords,
        // so the added side has no rare unique word
        let labels = classifier_with(config).classify_row("a silent threat", "it was uneasy");
        assert!(labels.is_empty());
    }

    #[test]
    fn test_enabled_subset_limits_output() {
        let config = IndicatorConfig::new().with_enabled(vec![Indicator::Expansion]);
        let labels = classifier_with(config)
            .classify_row("etched with lines that speak of hardship", "suggesting");
        assert!(labels.is_empty());
    }

    #[test]
    fn test_empty_side_is_never_classified() {
        assert!(classifier().classify_row("", "anything").is_empty());
        assert!(classifier().classify_row("anything", "").is_empty());
        assert!(classifier().classify_row("  ", "  ").is_empty());
    }

    #[test]
    fn test_classify_rows_isolates_non_replacements() {
        let rows = vec![
            ClauseRow::new("an uneasy silence", "a perilous silence"),
            ClauseRow::new("dropped entirely", ""),
        ];
        let labeled = classifier().classify_rows(&rows);
        assert!(labeled[0].indicators.contains(&Indicator::IntensityUp));
        assert!(labeled[1].indicators.is_empty());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let c = classifier();
        let a = c.classify_row("an uneasy, heavy coat", "a perilous air of authority");
        let b = c.classify_row("an uneasy, heavy coat", "a perilous air of authority");
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_follows_evaluation_order() {
        // Compression and intensity ↓ together: compression is listed first
        let labels = classifier()
            .classify_row("a perilous and heavy stretch of road", "uneasy path");
        let compression_pos = labels.iter().position(|i| *i == Indicator::Compression);
        let intensity_pos = labels.iter().position(|i| *i == Indicator::IntensityDown);
        assert!(compression_pos.is_some());
        assert!(intensity_pos.is_some());
        assert!(compression_pos < intensity_pos);
    }
}
