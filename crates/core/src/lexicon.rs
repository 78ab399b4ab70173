//! Lexicon store for the micro-indicator classifier
//!
//! Three fixed vocabularies back the lexicon-driven indicators: an
//! embodiment polarity table (abstract → physical), an abstraction polarity
//! table (concrete → abstract), and one or more named ordered intensity
//! scales. They are loaded once at process start from JSON documents and
//! are immutable afterwards.
//!
//! The store is an explicitly constructed, injected value — never ambient
//! global state — so the classifier can be exercised with synthetic
//! vocabularies in tests.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::LexiconError;

/// A two-sided polarity vocabulary.
///
/// A shift "applies" to a clause row when the removed side touches the
/// origin vocabulary and the added side touches the destination vocabulary
/// (e.g. abstract words out, physical words in).
#[derive(Debug, Clone)]
pub struct PolarityTable {
    from_terms: HashSet<String>,
    to_terms: HashSet<String>,
}

impl PolarityTable {
    /// Build a table from the two word lists. Words are lowercased;
    /// either list being empty is a fatal configuration error.
    pub fn new(
        table: &'static str,
        from_terms: Vec<String>,
        to_terms: Vec<String>,
    ) -> Result<Self, LexiconError> {
        if from_terms.is_empty() {
            return Err(LexiconError::EmptyTable { table, side: "from" });
        }
        if to_terms.is_empty() {
            return Err(LexiconError::EmptyTable { table, side: "to" });
        }

        Ok(Self {
            from_terms: lowercase_set(from_terms),
            to_terms: lowercase_set(to_terms),
        })
    }

    /// True when a removed token sits in the origin vocabulary and an
    /// added token sits in the destination vocabulary.
    pub fn shift_applies(&self, removed: &[String], added: &[String]) -> bool {
        removed.iter().any(|t| self.from_terms.contains(t))
            && added.iter().any(|t| self.to_terms.contains(t))
    }

    fn words(&self) -> impl Iterator<Item = &String> {
        self.from_terms.iter().chain(self.to_terms.iter())
    }
}

/// Position of a word on one intensity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleRank {
    /// Index of the scale in deterministic (name-sorted) order
    pub scale: usize,
    /// Zero-based band position within the scale
    pub rank: usize,
}

/// Index over one or more ordered intensity scales.
///
/// A word may appear on several disjoint scales; lookups return every
/// placement in deterministic order.
#[derive(Debug, Clone, Default)]
pub struct IntensityIndex {
    scale_names: Vec<String>,
    index: HashMap<String, Vec<ScaleRank>>,
}

impl IntensityIndex {
    /// Build the index from named ordered word lists.
    ///
    /// Each scale needs at least two bands, and a word may not repeat
    /// within a single scale (its rank would be ambiguous).
    pub fn new(scales: BTreeMap<String, Vec<String>>) -> Result<Self, LexiconError> {
        let mut scale_names = Vec::with_capacity(scales.len());
        let mut index: HashMap<String, Vec<ScaleRank>> = HashMap::new();

        for (scale_id, (name, words)) in scales.into_iter().enumerate() {
            if words.len() < 2 {
                return Err(LexiconError::ShortScale { scale: name });
            }

            let mut seen = HashSet::new();
            for (rank, word) in words.into_iter().enumerate() {
                let word = word.to_lowercase();
                if !seen.insert(word.clone()) {
                    return Err(LexiconError::DuplicateScaleWord { scale: name, word });
                }
                index
                    .entry(word)
                    .or_default()
                    .push(ScaleRank { scale: scale_id, rank });
            }
            scale_names.push(name);
        }

        Ok(Self { scale_names, index })
    }

    /// Every scale placement for a word, empty when the word is unknown.
    pub fn placements(&self, word: &str) -> &[ScaleRank] {
        self.index.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of loaded scales.
    pub fn scale_count(&self) -> usize {
        self.scale_names.len()
    }

    pub fn scale_name(&self, scale: usize) -> Option<&str> {
        self.scale_names.get(scale).map(String::as_str)
    }

    fn words(&self) -> impl Iterator<Item = &String> {
        self.index.keys()
    }
}

// ============================================================================
// JSON document shapes
// ============================================================================

#[derive(Deserialize)]
struct EmbodimentDoc {
    #[serde(rename = "abstract")]
    abstract_words: Vec<String>,
    physical: Vec<String>,
}

#[derive(Deserialize)]
struct AbstractionDoc {
    abstract_terms: Vec<String>,
    concrete_terms: Vec<String>,
}

#[derive(Deserialize)]
struct IntensityDoc {
    scales: BTreeMap<String, Vec<String>>,
}

// ============================================================================
// Store
// ============================================================================

/// The immutable lexicon bundle consumed by the classifier.
#[derive(Debug, Clone)]
pub struct LexiconStore {
    /// Abstract → physical polarity (embodiment shift)
    pub embodiment: PolarityTable,
    /// Concrete → abstract polarity (abstraction increase)
    pub abstraction: PolarityTable,
    /// Ordered intensity scales (intensity shifts)
    pub intensity: IntensityIndex,
    known: HashSet<String>,
}

impl LexiconStore {
    /// Assemble a store from already-built tables. This is the injection
    /// point for synthetic test vocabularies.
    pub fn new(
        embodiment: PolarityTable,
        abstraction: PolarityTable,
        intensity: IntensityIndex,
    ) -> Self {
        let known = embodiment
            .words()
            .chain(abstraction.words())
            .chain(intensity.words())
            .cloned()
            .collect();

        Self { embodiment, abstraction, intensity, known }
    }

    /// Parse the three lexicon documents from JSON strings.
    pub fn from_json_strs(
        embodiment: &str,
        abstraction: &str,
        intensity: &str,
    ) -> Result<Self, LexiconError> {
        let embodiment: EmbodimentDoc = serde_json::from_str(embodiment)
            .map_err(|source| LexiconError::Parse { name: "embodiment", source })?;
        let abstraction: AbstractionDoc = serde_json::from_str(abstraction)
            .map_err(|source| LexiconError::Parse { name: "abstraction", source })?;
        let intensity: IntensityDoc = serde_json::from_str(intensity)
            .map_err(|source| LexiconError::Parse { name: "intensity", source })?;

        let store = Self::new(
            PolarityTable::new("embodiment", embodiment.abstract_words, embodiment.physical)?,
            PolarityTable::new("abstraction", abstraction.concrete_terms, abstraction.abstract_terms)?,
            IntensityIndex::new(intensity.scales)?,
        );

        info!(
            words = store.known.len(),
            scales = store.intensity.scale_count(),
            "lexicon store loaded"
        );

        Ok(store)
    }

    /// Load `embodiment.json`, `abstraction.json`, and `intensity.json`
    /// from a directory. Any missing or malformed document is fatal.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let dir = dir.as_ref();
        let read = |file: &str| -> Result<String, LexiconError> {
            let path = dir.join(file);
            fs::read_to_string(&path).map_err(|source| LexiconError::Io { path, source })
        };

        Self::from_json_strs(
            &read("embodiment.json")?,
            &read("abstraction.json")?,
            &read("intensity.json")?,
        )
    }

    /// Whether a word appears in any loaded vocabulary (either polarity
    /// side or any intensity scale).
    pub fn is_known(&self, word: &str) -> bool {
        self.known.contains(word)
    }
}

fn lowercase_set(words: Vec<String>) -> HashSet<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn sample_store() -> LexiconStore {
        let embodiment = PolarityTable::new(
            "embodiment",
            strs(&["tension", "burden", "dread"]),
            strs(&["hands", "face", "eyes"]),
        )
        .unwrap();
        let abstraction = PolarityTable::new(
            "abstraction",
            strs(&["coat", "boots", "lantern"]),
            strs(&["authority", "influence"]),
        )
        .unwrap();
        let mut scales = BTreeMap::new();
        scales.insert("unease".to_string(), strs(&["calm", "uneasy", "anxious", "perilous"]));
        scales.insert("strength".to_string(), strs(&["fragile", "sturdy", "unbreakable"]));
        let intensity = IntensityIndex::new(scales).unwrap();

        LexiconStore::new(embodiment, abstraction, intensity)
    }

    #[test]
    fn test_polarity_shift_applies() {
        let store = sample_store();
        assert!(store
            .embodiment
            .shift_applies(&strs(&["tension", "goblin"]), &strs(&["hands", "goblin"])));
        assert!(!store
            .embodiment
            .shift_applies(&strs(&["hands"]), &strs(&["eyes"])));
    }

    #[test]
    fn test_polarity_rejects_empty_side() {
        let result = PolarityTable::new("embodiment", vec![], strs(&["hands"]));
        assert!(matches!(result, Err(LexiconError::EmptyTable { .. })));
    }

    #[test]
    fn test_intensity_placements_and_order() {
        let store = sample_store();
        let uneasy = store.intensity.placements("uneasy");
        assert_eq!(uneasy.len(), 1);
        assert_eq!(uneasy[0].rank, 1);
        assert_eq!(store.intensity.scale_name(uneasy[0].scale), Some("unease"));
        assert!(store.intensity.placements("goblin").is_empty());
    }

    #[test]
    fn test_intensity_rejects_short_scale() {
        let mut scales = BTreeMap::new();
        scales.insert("lonely".to_string(), strs(&["only"]));
        assert!(matches!(
            IntensityIndex::new(scales),
            Err(LexiconError::ShortScale { .. })
        ));
    }

    #[test]
    fn test_intensity_rejects_duplicate_word() {
        let mut scales = BTreeMap::new();
        scales.insert("echo".to_string(), strs(&["dim", "bright", "dim"]));
        assert!(matches!(
            IntensityIndex::new(scales),
            Err(LexiconError::DuplicateScaleWord { .. })
        ));
    }

    #[test]
    fn test_known_union_covers_all_vocabularies() {
        let store = sample_store();
        assert!(store.is_known("tension"));
        assert!(store.is_known("authority"));
        assert!(store.is_known("perilous"));
        assert!(!store.is_known("goblin"));
    }

    #[test]
    fn test_from_json_strs_lowercases() {
        let store = LexiconStore::from_json_strs(
            r#"{"abstract": ["Tension"], "physical": ["Hands"]}"#,
            r#"{"abstract_terms": ["Authority"], "concrete_terms": ["Coat"]}"#,
            r#"{"scales": {"unease": ["Calm", "Uneasy"]}}"#,
        )
        .unwrap();
        assert!(store.is_known("tension"));
        assert!(store.is_known("uneasy"));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let result = LexiconStore::from_json_strs("not json", "{}", "{}");
        assert!(matches!(result, Err(LexiconError::Parse { name: "embodiment", .. })));
    }

    #[test]
    fn test_from_dir_loads_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("embodiment.json"),
            r#"{"abstract": ["tension"], "physical": ["hands"]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("abstraction.json"),
            r#"{"abstract_terms": ["authority"], "concrete_terms": ["coat"]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("intensity.json"),
            r#"{"scales": {"unease": ["calm", "uneasy"]}}"#,
        )
        .unwrap();

        let store = LexiconStore::from_dir(dir.path()).unwrap();
        assert!(store.is_known("hands"));
    }

    #[test]
    fn test_shipped_lexicons_load() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let store = LexiconStore::from_dir(&dir).unwrap();
        assert!(store.is_known("tension"));
        assert!(store.is_known("perilous"));
        assert!(store.intensity.scale_count() >= 3);
    }

    #[test]
    fn test_from_dir_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            LexiconStore::from_dir(dir.path()),
            Err(LexiconError::Io { .. })
        ));
    }
}
