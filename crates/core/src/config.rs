//! Configuration for the shift analysis engine

use serde::{Deserialize, Serialize};

use crate::clause::RowMode;
use crate::error::ConfigError;
use crate::indicators::Indicator;

/// Tuning parameters for micro-indicator detection.
///
/// All fields carry conservative defaults; a routing layer can override
/// them per request by deserializing a partial JSON object. Overrides are
/// validated, never clamped — a non-positive ratio is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Minimum removed/added token ratio to flag compression
    pub compression_ratio: f64,

    /// Minimum added/removed token ratio to flag expansion
    pub expansion_ratio: f64,

    /// Minimum token count on the larger side before size-based
    /// indicators apply; keeps single-word swaps unflagged
    pub min_tokens: usize,

    /// Minimum change in verb+adjective density to flag a modality shift
    pub modality_density_threshold: f64,

    /// When set, only the listed indicators are evaluated
    pub enabled: Option<Vec<Indicator>>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            compression_ratio: 2.0,
            expansion_ratio: 2.0,
            min_tokens: 2,
            modality_density_threshold: 0.3,
            enabled: None,
        }
    }
}

impl IndicatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check all fields, rejecting out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("compression_ratio", self.compression_ratio),
            ("expansion_ratio", self.expansion_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveRatio { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.modality_density_threshold)
            || self.modality_density_threshold.is_nan()
        {
            return Err(ConfigError::DensityOutOfRange(self.modality_density_threshold));
        }
        if self.min_tokens == 0 {
            return Err(ConfigError::ZeroMinTokens);
        }
        Ok(())
    }

    /// Whether an indicator should be evaluated under this configuration
    pub fn is_enabled(&self, indicator: Indicator) -> bool {
        match &self.enabled {
            None => true,
            Some(enabled) => enabled.contains(&indicator),
        }
    }

    pub fn with_compression_ratio(mut self, ratio: f64) -> Self {
        self.compression_ratio = ratio;
        self
    }

    pub fn with_expansion_ratio(mut self, ratio: f64) -> Self {
        self.expansion_ratio = ratio;
        self
    }

    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    pub fn with_modality_density_threshold(mut self, threshold: f64) -> Self {
        self.modality_density_threshold = threshold;
        self
    }

    pub fn with_enabled(mut self, enabled: Vec<Indicator>) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

/// Configuration for one analysis call.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Clause-row display mode
    pub row_mode: RowMode,

    /// Micro-indicator thresholds
    pub indicators: IndicatorConfig,

    /// Per-side token budget for the aligner; `None` uses the default
    pub max_tokens: Option<usize>,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_mode(mut self, mode: RowMode) -> Self {
        self.row_mode = mode;
        self
    }

    pub fn with_indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
