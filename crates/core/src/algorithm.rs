//! Sequence alignment
//!
//! Word-level edit scripts are computed with an O(m·n) dynamic-programming
//! longest-common-subsequence table. The reconstruction walk carries a
//! fixed tie-break (Insert over Delete on equal-length paths) so that the
//! script produced for inputs with multiple longest alignments is fully
//! deterministic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::diff::{EditKind, EditOp, EditScript};
use crate::error::AnalysisError;

/// Default per-side token budget for the aligner.
///
/// The DP table is (m+1)·(n+1) cells; paragraph-length inputs are a few
/// hundred tokens, so this bound only exists to stop pathological inputs
/// from running unbounded quadratic work.
pub const DEFAULT_MAX_TOKENS: usize = 2048;

/// Cooperative cancellation flag shared with a caller.
///
/// Checked once per DP row; a triggered token aborts the alignment with
/// [`AnalysisError::Cancelled`] instead of degrading silently.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from another thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// LCS-based word aligner.
#[derive(Debug, Clone)]
pub struct LcsAligner {
    max_tokens: usize,
}

impl Default for LcsAligner {
    fn default() -> Self {
        Self::new()
    }
}

impl LcsAligner {
    pub fn new() -> Self {
        Self { max_tokens: DEFAULT_MAX_TOKENS }
    }

    /// Set the per-side token budget
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Compute the edit script between two token sequences.
    ///
    /// Deterministic for a given input pair; the script length is at most
    /// `m + n`, and filtering by kind reconstructs each input. Empty
    /// inputs produce an empty script.
    pub fn align(
        &self,
        baseline: &[String],
        current: &[String],
        cancel: &CancelToken,
    ) -> Result<EditScript, AnalysisError> {
        let m = baseline.len();
        let n = current.len();

        if m > self.max_tokens {
            return Err(AnalysisError::InputTooLarge {
                side: "baseline",
                tokens: m,
                limit: self.max_tokens,
            });
        }
        if n > self.max_tokens {
            return Err(AnalysisError::InputTooLarge {
                side: "current",
                tokens: n,
                limit: self.max_tokens,
            });
        }

        // DP table: dp[i][j] = LCS length of baseline[0..i) and current[0..j)
        let mut dp = vec![vec![0u32; n + 1]; m + 1];

        for i in 1..=m {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            for j in 1..=n {
                if baseline[i - 1] == current[j - 1] {
                    dp[i][j] = dp[i - 1][j - 1] + 1;
                } else {
                    dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
                }
            }
        }

        // Walk back from dp[m][n]. On equal-length alternative paths the
        // Insert branch wins; the reversed walk restores script order.
        let mut ops = Vec::with_capacity(m + n);
        let mut i = m;
        let mut j = n;

        while i > 0 || j > 0 {
            if i > 0 && j > 0 && baseline[i - 1] == current[j - 1] {
                ops.push(EditOp::new(EditKind::Equal, baseline[i - 1].clone()));
                i -= 1;
                j -= 1;
            } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
                ops.push(EditOp::new(EditKind::Insert, current[j - 1].clone()));
                j -= 1;
            } else {
                ops.push(EditOp::new(EditKind::Delete, baseline[i - 1].clone()));
                i -= 1;
            }
        }

        ops.reverse();
        Ok(EditScript::new(ops))
    }
}
