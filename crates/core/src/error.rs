//! Error types for lexicon loading, configuration validation, and analysis

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating lexicon data.
///
/// All of these are fatal at startup: a process with a broken lexicon
/// cannot produce meaningful shift labels, so the store refuses to
/// construct rather than degrading per-request.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// A lexicon file could not be read from disk
    #[error("failed to read lexicon file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lexicon document was not valid JSON for its expected shape
    #[error("failed to parse lexicon document '{name}'")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A polarity table side contained no words
    #[error("lexicon table '{table}' has an empty '{side}' word list")]
    EmptyTable { table: &'static str, side: &'static str },

    /// An intensity scale needs at least two bands to order anything
    #[error("intensity scale '{scale}' has fewer than two bands")]
    ShortScale { scale: String },

    /// A word appeared twice within one intensity scale
    #[error("intensity scale '{scale}' lists '{word}' more than once")]
    DuplicateScaleWord { scale: String, word: String },
}

/// Errors raised when validating an [`IndicatorConfig`](crate::config::IndicatorConfig).
///
/// Invalid overrides are rejected outright; values are never silently
/// clamped into range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A ratio multiplier must be finite and strictly positive
    #[error("indicator ratio '{name}' must be a positive finite number, got {value}")]
    NonPositiveRatio { name: &'static str, value: f64 },

    /// The modality density threshold is a proportion
    #[error("modality density threshold must lie in [0, 1], got {0}")]
    DensityOutOfRange(f64),

    /// Size-based indicators need at least one token to compare
    #[error("min_tokens must be at least 1")]
    ZeroMinTokens,
}

/// Errors raised during a single analysis call.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An input exceeded the configured token budget for the aligner
    #[error("{side} text has {tokens} tokens, exceeding the limit of {limit}")]
    InputTooLarge {
        side: &'static str,
        tokens: usize,
        limit: usize,
    },

    /// The caller's cancellation token was triggered mid-alignment
    #[error("analysis cancelled")]
    Cancelled,

    /// The per-request indicator configuration failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}
