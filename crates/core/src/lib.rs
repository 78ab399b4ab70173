//! # Shiftmap
//!
//! A structural shift analysis engine for comparing two generated text
//! passages. Given a baseline "A" and a current "B", it produces a
//! word-level edit script, clause-level substitution rows, a content-word
//! delta, and deterministic structural-shift labels per row.
//!
//! ## Core Concepts
//!
//! - **Sequence alignment**: an LCS edit script over whitespace tokens,
//!   with a fixed tie-break so output is deterministic
//! - **Clause rows**: contiguous change regions between stable tokens
//! - **Content-word delta**: lemmatized, stopword-filtered vocabulary
//!   difference, independent of token positions
//! - **Micro-indicators**: a closed vocabulary of rule-based labels
//!   (compression, embodiment shift, intensity ↑, …) driven by injected
//!   lexicons and per-indicator thresholds
//!
//! ## Example
//!
//! ```rust
//! use shiftmap_core::analyze_shift;
//!
//! let report = analyze_shift(
//!     "the hall fell quiet",
//!     "the hall fell silent",
//!     None,
//! ).unwrap();
//!
//! assert_eq!(report.rows.len(), 1);
//! assert_eq!(report.rows[0].removed, "quiet");
//! assert_eq!(report.rows[0].added, "silent");
//! ```
//!
//! Classification is a decorator stage: build a [`ShiftEngine`] with a
//! [`LexiconStore`] to label rows, or without one to obtain unlabeled
//! rows only.

pub mod algorithm;
pub mod clause;
pub mod config;
pub mod delta;
pub mod diff;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod lexicon;
pub mod nlp;
pub mod tokenize;

use std::sync::Arc;

// Re-export main types
pub use algorithm::{CancelToken, LcsAligner};
pub use clause::{group_rows, RowMode};
pub use config::{AnalysisConfig, IndicatorConfig};
pub use delta::{content_word_delta, ContentWordDelta};
pub use diff::{ClauseRow, EditKind, EditOp, EditScript, LabeledRow, ShiftReport};
pub use engine::ShiftEngine;
pub use error::{AnalysisError, ConfigError, LexiconError};
pub use indicators::{Indicator, RowClassifier};
pub use lexicon::{IntensityIndex, LexiconStore, PolarityTable};
pub use nlp::{EnglishAnalyzer, LanguageAnalyzer, PosTag};

/// Analyze two texts with the built-in English analyzer and no lexicons.
///
/// This is the lightweight entry point: it produces the word diff, clause
/// rows, and content-word delta, with empty indicator lists. Callers that
/// want labeled rows build a [`ShiftEngine`] with a [`LexiconStore`].
///
/// # Arguments
///
/// * `baseline` - The reference text (A)
/// * `current` - The comparison text (B)
/// * `config` - Optional configuration (uses defaults if None)
pub fn analyze_shift(
    baseline: &str,
    current: &str,
    config: Option<AnalysisConfig>,
) -> Result<ShiftReport, AnalysisError> {
    let mut engine = ShiftEngine::new(Arc::new(EnglishAnalyzer::new()));
    if let Some(config) = config {
        engine = engine.with_config(config);
    }
    engine.analyze(baseline, current)
}
