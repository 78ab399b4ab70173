//! Main analysis engine that orchestrates the shift pipeline

use std::sync::Arc;
use tracing::{debug, warn};

use crate::algorithm::{CancelToken, LcsAligner};
use crate::clause::group_rows;
use crate::config::AnalysisConfig;
use crate::delta::content_word_delta;
use crate::diff::{LabeledRow, ShiftReport};
use crate::error::AnalysisError;
use crate::indicators::RowClassifier;
use crate::lexicon::LexiconStore;
use crate::nlp::LanguageAnalyzer;
use crate::tokenize::{diff_tokens, normalize_whitespace};

/// The structural shift analysis engine.
///
/// Owns only shared immutable collaborators; every analysis call builds
/// its own buffers, so one engine serves concurrent callers. The
/// classifier stage is a decorator: without a lexicon store the engine
/// still produces the word diff, clause rows, and content-word delta,
/// with empty indicator lists.
pub struct ShiftEngine {
    analyzer: Arc<dyn LanguageAnalyzer>,
    lexicons: Option<Arc<LexiconStore>>,
    config: AnalysisConfig,
}

impl ShiftEngine {
    /// Create an engine without classification (unlabeled rows)
    pub fn new(analyzer: Arc<dyn LanguageAnalyzer>) -> Self {
        Self { analyzer, lexicons: None, config: AnalysisConfig::default() }
    }

    /// Enable the micro-indicator classifier
    pub fn with_lexicons(mut self, lexicons: Arc<LexiconStore>) -> Self {
        self.lexicons = Some(lexicons);
        self
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Analyze two texts.
    ///
    /// This is the main entry point that runs the full pipeline:
    /// 1. Normalize whitespace in both texts
    /// 2. Tokenize and compute the word-level edit script
    /// 3. Group the script into clause rows (mode-filtered)
    /// 4. Classify replacement rows, when lexicons are present
    /// 5. Compute the content-word delta
    ///
    /// Empty or identical inputs are not errors: they produce an empty
    /// script, zero rows, and an empty delta.
    pub fn analyze(&self, baseline: &str, current: &str) -> Result<ShiftReport, AnalysisError> {
        self.analyze_with_cancel(baseline, current, &CancelToken::new())
    }

    /// [`analyze`](Self::analyze) with a caller-held cancellation token.
    pub fn analyze_with_cancel(
        &self,
        baseline: &str,
        current: &str,
        cancel: &CancelToken,
    ) -> Result<ShiftReport, AnalysisError> {
        // Reject invalid per-request configuration before any work runs
        self.config.indicators.validate()?;

        let baseline = normalize_whitespace(baseline);
        let current = normalize_whitespace(current);
        let baseline_tokens = diff_tokens(&baseline);
        let current_tokens = diff_tokens(&current);

        let mut aligner = LcsAligner::new();
        if let Some(max_tokens) = self.config.max_tokens {
            aligner = aligner.with_max_tokens(max_tokens);
        }

        let word_diff = aligner
            .align(&baseline_tokens, &current_tokens, cancel)
            .inspect_err(|error| warn!(%error, "alignment aborted"))?;

        let rows = group_rows(&word_diff, self.config.row_mode);

        let labeled_rows = match &self.lexicons {
            Some(lexicons) => {
                RowClassifier::new(Arc::clone(lexicons), Arc::clone(&self.analyzer))
                    .with_config(self.config.indicators.clone())
                    .classify_rows(&rows)
            }
            None => rows.iter().map(LabeledRow::unlabeled).collect(),
        };

        let delta = content_word_delta(&baseline, &current, self.analyzer.as_ref());

        debug!(
            baseline_tokens = baseline_tokens.len(),
            current_tokens = current_tokens.len(),
            rows = rows.len(),
            "shift analysis complete"
        );

        Ok(ShiftReport { word_diff, rows, labeled_rows, delta })
    }
}
